//! Batch Validator CLI
//!
//! Validates every calendar definition under a directory against the data
//! contract and the schema artifact back-reference.

use std::path::PathBuf;

use clap::Parser;
use era_herald::{loader, HeraldConfig, SCHEMA_FILE_NAME};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "herald-validator")]
#[command(about = "Validate calendar definition files")]
struct Cli {
    /// Directory holding definition files (defaults to the configured one)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Path to the schema artifact (defaults to <dir>/calendar.schema.json)
    #[arg(short, long)]
    schema: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = HeraldConfig::load()?;
    let dir = cli.dir.unwrap_or(config.calendars.dir);
    let schema = cli.schema.unwrap_or_else(|| dir.join(SCHEMA_FILE_NAME));

    println!("🔍 Validating definitions in {}", dir.display());

    let outcomes = loader::validate_dir(&dir, &schema);
    if outcomes.is_empty() {
        println!("No definition files found");
        return Ok(true);
    }

    let mut all_valid = true;
    for (path, outcome) in &outcomes {
        match outcome {
            Ok(()) => println!("  ✅ {} - valid", path.display()),
            Err(e) => {
                all_valid = false;
                println!("  ❌ {} - INVALID", path.display());
                for line in e.to_string().lines() {
                    println!("     {}", line);
                }
            }
        }
    }

    println!();
    if all_valid {
        println!("✅ {} file(s) valid", outcomes.len());
    } else {
        println!("❌ Validation failures detected");
    }
    Ok(all_valid)
}
