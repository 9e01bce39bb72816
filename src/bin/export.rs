//! Schema Export CLI
//!
//! Writes the calendar definition JSON Schema artifact to its fixed
//! well-known filename.

use std::path::PathBuf;

use clap::Parser;
use era_herald::{artifact, HeraldConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "herald-export")]
#[command(about = "Generate the calendar definition schema artifact")]
struct Cli {
    /// Output directory (defaults to the configured calendars dir)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = HeraldConfig::load()?;
    let out = cli.out.unwrap_or(config.calendars.dir);

    let path = artifact::write_schema(&out)?;
    println!("✅ Schema artifact written to {}", path.display());
    Ok(())
}
