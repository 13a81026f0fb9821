use clap::{CommandFactory, Parser};
use ctd_presystem::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // Without a subcommand there is nothing to do but explain the tool
    if args.command.is_none() {
        if let Err(error) = Args::command().print_help() {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
        println!();
        process::exit(0);
    }

    match run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Print the whole source chain, e.g. the I/O error under a CSV error
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    commands::run(args)?;
    Ok(())
}
