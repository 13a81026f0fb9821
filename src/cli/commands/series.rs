//! Series command: queries over the cast files of a data directory

use super::shared::{print_json, resolve_ship_code};
use crate::app::models::{SeriesCriteria, SeriesField};
use crate::app::services::series_registry::SeriesRegistry;
use crate::cli::args::{OutputFormat, ScanArgs, SeriesAction, SeriesArgs};
use crate::config::PresystemConfig;
use crate::Result;
use colored::*;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Open and scan the registry selected by the scan options
pub fn open_registry(scan: &ScanArgs, config: &PresystemConfig) -> Result<SeriesRegistry> {
    let root: PathBuf = match &scan.root {
        Some(root) => root.clone(),
        None => config.data_root(scan.server)?.to_path_buf(),
    };
    let options = scan.series_options(&config.series);

    let registry = SeriesRegistry::new(root, options)?;
    let stats = registry.scan()?;
    info!("{}: {}", registry.root().display(), stats.summary());
    Ok(registry)
}

/// Criteria from the command line, with a ship name mapped to its code
pub fn resolve_criteria(args: &SeriesArgs, config: &PresystemConfig) -> Result<SeriesCriteria> {
    let mut criteria = args.criteria.criteria()?;
    if let Some(ship) = criteria.get(SeriesField::Ship).map(str::to_string) {
        criteria.insert(SeriesField::Ship, resolve_ship_code(config, &ship)?);
    }
    Ok(criteria)
}

pub fn run_series(args: &SeriesArgs, config: &PresystemConfig, format: OutputFormat) -> Result<()> {
    let registry = open_registry(&args.scan, config)?;
    let criteria = resolve_criteria(args, config)?;
    let root = registry.root().display().to_string();

    match args.action {
        SeriesAction::Count => {
            let count = if criteria.is_empty() {
                registry.count()
            } else {
                registry.files_matching(&criteria).len()
            };
            match format {
                OutputFormat::Json => print_json(&json!({ "root": root, "count": count }))?,
                OutputFormat::Human => println!(
                    "{} matching files under {}",
                    count.to_string().bold(),
                    root
                ),
            }
        }
        SeriesAction::List => {
            let files = registry.files_matching(&criteria);
            match format {
                OutputFormat::Json => print_json(&files)?,
                OutputFormat::Human => {
                    for (key, file) in &files {
                        println!("{}  {}", key.cyan(), file.path.display().to_string().dimmed());
                    }
                    println!("{} files", files.len().to_string().bold());
                }
            }
        }
        SeriesAction::Latest => {
            let latest = registry.latest_serno(&criteria);
            match format {
                OutputFormat::Json => print_json(&json!({ "latest": latest }))?,
                OutputFormat::Human => match latest {
                    Some(serno) => println!("Latest series number: {}", serno.green().bold()),
                    None => println!("{}", "No matching casts".yellow()),
                },
            }
        }
        SeriesAction::Next => {
            let next = registry.next_serno(&criteria)?;
            match format {
                OutputFormat::Json => print_json(&json!({ "next": next }))?,
                OutputFormat::Human => println!("Next series number: {}", next.green().bold()),
            }
        }
        SeriesAction::Exists => {
            let file_name = registry.series_exists_file_name(&criteria);
            match format {
                OutputFormat::Json => print_json(&json!({
                    "exists": file_name.is_some(),
                    "file_name": file_name,
                }))?,
                OutputFormat::Human => match file_name {
                    Some(name) => println!("{} {}", "Series exists:".green(), name),
                    None => println!("{}", "No matching series".yellow()),
                },
            }
        }
    }

    Ok(())
}
