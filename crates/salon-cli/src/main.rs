//! `salon` CLI — query staff availability and validate bookings against a
//! JSON snapshot of salon data.
//!
//! ## Usage
//!
//! ```sh
//! # Bookable slots for a staff member, date and service
//! salon --data salon.json slots --staff ana --date 2026-03-16 --service cut
//!
//! # Is 09:45 offered?
//! salon --data salon.json check --staff ana --date 2026-03-16 --time 09:45 --service cut
//!
//! # Validate a booking and print the record to store
//! salon --data salon.json book --staff ana --service cut --start 2026-03-16T09:45:00Z
//!
//! # Read the snapshot path from the environment instead
//! SALON_DATA=salon.json salon slots --staff ana --date 2026-03-16 --service cut
//! ```
//!
//! Exit codes: 0 success, 1 internal error, 2 invalid input or slot taken,
//! 3 unknown service.

mod config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use salon_availability::{
    AvailabilityCalculator, AvailabilityError, BookingRequest, ErrorClass, InMemoryStore,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "salon", version, about = "Salon availability CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON snapshot of business data
    #[arg(short, long, global = true, env = "SALON_DATA")]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable slots for a staff member, date and service
    Slots {
        /// Staff member identifier
        #[arg(long)]
        staff: String,
        /// Calendar date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Service identifier
        #[arg(long)]
        service: String,
    },
    /// Check whether a slot starting at a given time is offered
    Check {
        /// Staff member identifier
        #[arg(long)]
        staff: String,
        /// Calendar date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Slot start time (HH:mm)
        #[arg(long)]
        time: String,
        /// Service identifier
        #[arg(long)]
        service: String,
    },
    /// Validate a new booking and print the record to store
    Book {
        /// Staff member identifier
        #[arg(long)]
        staff: String,
        /// Service identifier
        #[arg(long)]
        service: String,
        /// Start instant (RFC 3339, e.g. 2026-03-16T09:45:00Z)
        #[arg(long, value_parser = parse_instant)]
        start: DateTime<Utc>,
    },
}

fn main() -> ExitCode {
    // Settings first, so a `.env` file can supply SALON_DATA to the parser.
    let config = CliConfig::load();
    let cli = Cli::parse();

    if let Err(err) = init_tracing(&config.log_filter) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let path = cli
        .data
        .context("No data file given: pass --data or set SALON_DATA")?;
    let store = load_store(&path)?;
    let calculator = AvailabilityCalculator::from_store(&store);

    match cli.command {
        Commands::Slots {
            staff,
            date,
            service,
        } => {
            let response = calculator.availability(&staff, date, &service)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Check {
            staff,
            date,
            time,
            service,
        } => {
            let available = calculator.is_slot_available(&staff, date, &time, &service)?;
            println!("{}", if available { "available" } else { "unavailable" });
        }
        Commands::Book {
            staff,
            service,
            start,
        } => {
            let request = BookingRequest {
                staff_id: staff,
                service_id: service,
                start,
            };
            let planned = calculator.plan_booking(&request)?;
            println!("{}", serde_json::to_string_pretty(&planned)?);
        }
    }

    Ok(())
}

fn load_store(path: &Path) -> Result<InMemoryStore> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let store = InMemoryStore::from_json(&json)
        .with_context(|| format!("Failed to load snapshot: {}", path.display()))?;
    debug!(path = %path.display(), "loaded snapshot");
    Ok(store)
}

/// Map an engine error class to the process exit code; anything else is internal.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<AvailabilityError>().map(AvailabilityError::class) {
        Some(ErrorClass::Client) => ExitCode::from(2),
        Some(ErrorClass::NotFound) => ExitCode::from(3),
        Some(ErrorClass::Internal) | None => ExitCode::FAILURE,
    }
}

/// Log to stderr so stdout stays machine readable. `RUST_LOG` takes precedence
/// over the configured filter.
fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("Invalid log filter: '{default_filter}'"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))
}

fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_instant(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 instant ({err})"))
}
