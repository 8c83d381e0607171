//! sort-catalog: order a catalog file by year.
//!
//! Reads a catalog JSON array, sorts it by `date` (stable), and writes it
//! back with four-space indentation.
//!
//! Built only with the `cli` feature:
//! `cargo run --features cli --bin sort-catalog -- catalog.json`.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use timeline_engine::cards::Catalog;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sort-catalog", version, about = "Sort a timeline catalog by year")]
struct Cli {
    /// Catalog JSON file.
    input: PathBuf,

    /// Write the sorted catalog here instead of stdout.
    #[arg(short, long, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Overwrite the input file.
    #[arg(short, long)]
    in_place: bool,

    /// Only report whether the file is sorted; exit with 1 if not.
    #[arg(long, conflicts_with_all = ["output", "in_place"])]
    check: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<bool> {
    let catalog = Catalog::from_path(&cli.input)
        .with_context(|| format!("failed to load catalog {}", cli.input.display()))?;

    match catalog.date_range() {
        Some((first, last)) => info!(records = catalog.len(), first, last, "catalog loaded"),
        None => warn!("catalog is empty"),
    }

    if cli.check {
        let sorted = catalog.is_sorted_by_date();
        if sorted {
            info!("catalog is sorted");
        } else {
            warn!("catalog is not sorted by date");
        }
        return Ok(sorted);
    }

    let json = catalog.sorted_by_date().to_json_pretty()?;
    let destination = if cli.in_place {
        Some(&cli.input)
    } else {
        cli.output.as_ref()
    };

    match destination {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "sorted catalog written");
        }
        None => println!("{json}"),
    }
    Ok(true)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
