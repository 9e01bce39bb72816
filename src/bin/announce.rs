//! Announcement CLI
//!
//! Loads the dispatch list, resolves each calendar's current year, and sends
//! the rendered announcements. Every outcome is logged; failures never stop
//! the batch.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use era_herald::{dispatch, loader, timestamp, ConsoleTransport, HeraldConfig, SCHEMA_FILE_NAME};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "herald-announce")]
#[command(about = "Announce the current era/year for each dispatched calendar")]
struct Cli {
    /// Dispatch list file (defaults to the configured one)
    #[arg(short, long)]
    list: Option<PathBuf>,

    /// Directory holding definition files (defaults to the configured one)
    #[arg(short, long)]
    calendars: Option<PathBuf>,

    /// Evaluate at this instant instead of the current clock
    /// (strict grammar, e.g. 2024-01-01T00:00:00.000Z)
    #[arg(long)]
    at: Option<String>,

    /// Decimal digits of slack when snapping fractional years
    #[arg(long)]
    digits: Option<u32>,
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
    let list = cli.list.unwrap_or(config.dispatch.file);
    let calendars = cli.calendars.unwrap_or(config.calendars.dir);
    let digits = cli.digits.unwrap_or(config.dispatch.deviation_fix_digits);
    let schema = calendars.join(SCHEMA_FILE_NAME);

    let now: DateTime<Utc> = match &cli.at {
        Some(raw) => timestamp::parse(raw)
            .ok_or_else(|| anyhow::anyhow!("--at is not a valid timestamp: '{}'", raw))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let entries = loader::load_dispatch_list(&list)?;
    println!("📣 Dispatching {} calendar(s) at {}", entries.len(), now.to_rfc3339());

    let report = dispatch::run(&entries, &calendars, &schema, now, digits, &ConsoleTransport);

    println!();
    println!(
        "sent: {}  skipped: {}  failed: {}",
        report.sent, report.skipped, report.failed
    );
    if report.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
