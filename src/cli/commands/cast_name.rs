//! Cast-name command: filename and raw file path for the next cast

use super::series::open_registry;
use super::shared::{print_json, resolve_ship_code};
use crate::app::services::cast_name::{CastName, CastNameBuilder};
use crate::cli::args::{CastNameArgs, OutputFormat};
use crate::config::PresystemConfig;
use crate::Result;
use colored::*;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct CastNameReport {
    stem: String,
    raw_file_path: PathBuf,
    cruise_label: String,
    #[serde(flatten)]
    name: CastName,
}

/// Collect the builder fields given on the command line
pub fn builder_from_args(args: &CastNameArgs, config: &PresystemConfig) -> Result<CastNameBuilder> {
    let mut builder = CastNameBuilder::new();
    if let Some(instrument) = &args.instrument {
        builder = builder.instrument(instrument);
    }
    if let Some(serial) = &args.instrument_serial {
        builder = builder.instrument_serial(serial);
    }
    if let Some(ship) = &args.ship {
        builder = builder.ship(resolve_ship_code(config, ship)?);
    }
    if let Some(cruise) = &args.cruise {
        builder = builder.cruise(cruise);
    }
    if let Some(serno) = &args.serno {
        builder = builder.serno(serno);
    }
    if let Some(time) = args.time {
        builder = builder.timestamp(time);
    }
    Ok(builder)
}

pub fn run_cast_name(
    args: &CastNameArgs,
    config: &PresystemConfig,
    format: OutputFormat,
) -> Result<()> {
    let builder = builder_from_args(args, config)?;

    let (name, data_root) = if args.serno.is_some() {
        let data_root = match &args.scan.root {
            Some(root) => root.clone(),
            None => config.data_root(args.scan.server)?.to_path_buf(),
        };
        (builder.build()?, data_root)
    } else {
        if args.scan.root.is_none() && !args.scan.server {
            config.ensure_data_root()?;
        }
        let registry = open_registry(&args.scan, config)?;
        let name = builder.build_with_next_serno(&registry)?;
        (name, registry.root().to_path_buf())
    };

    let report = CastNameReport {
        stem: name.stem(),
        raw_file_path: name.raw_file_path(&data_root),
        cruise_label: name.cruise_label(&config.cruise_prefix),
        name,
    };

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Human => {
            println!("{}", report.stem.green().bold());
            println!("  raw file: {}", report.raw_file_path.display());
            println!("  cruise:   {}", report.cruise_label);
        }
    }
    Ok(())
}
