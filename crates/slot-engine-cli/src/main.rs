//! `slots` CLI: find meeting slots, check rosters, and explain blockers.
//!
//! ## Usage
//!
//! ```sh
//! # Search a request (stdin → stdout)
//! cat request.json | slots search
//!
//! # Search from file to file, full matches only, first five
//! slots search -i request.json -o slots.json --full-only --limit 5
//!
//! # Use a custom policy (fallback window, default step, max range)
//! slots search -i request.json --config policy.toml
//!
//! # Validate a request and list data-quality issues without scanning
//! slots check -i request.json
//!
//! # Who blocks most often?
//! slots blockers -i request.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use slot_engine::participant::ingest_roster;
use slot_engine::{
    find_meeting_slots_with, summarize, ChronoTzResolver, SchedulingPolicy, SearchRequest,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find meeting slots that respect everyone's working hours across timezones"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (SLOTS_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for candidate slots and print them as JSON
    Search {
        /// Request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Scheduling policy TOML file
        #[arg(long)]
        config: Option<String>,
        /// Only print slots where everyone is free
        #[arg(long)]
        full_only: bool,
        /// Print at most this many slots
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Validate a request and report roster data-quality issues
    Check {
        /// Request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Scheduling policy TOML file
        #[arg(long)]
        config: Option<String>,
    },
    /// Rank participants by how often they block a full match
    Blockers {
        /// Request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Scheduling policy TOML file
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Search {
            input,
            output,
            config,
            full_only,
            limit,
        } => {
            let policy = load_policy(config.as_deref())?;
            let request = read_request(input.as_deref())?;
            let mut outcome = find_meeting_slots_with(&request, &policy, &ChronoTzResolver)
                .context("Search failed")?;

            if full_only {
                outcome.slots.retain(|s| s.is_full_match);
            }
            if let Some(n) = limit {
                outcome.slots.truncate(n);
            }

            let pretty = serde_json::to_string_pretty(&outcome)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Check { input, config } => {
            let policy = load_policy(config.as_deref())?;
            let request = read_request(input.as_deref())?;
            request
                .validate(&policy, &ChronoTzResolver)
                .context("Request is invalid")?;

            let roster = ingest_roster(&request.participants, &policy, &ChronoTzResolver);
            let report = json!({
                "valid": true,
                "participants": roster.participants.len(),
                "degraded": roster.issues.iter().filter(|i| i.is_degrading()).count(),
                "issues": roster.issues,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Blockers { input, config } => {
            let policy = load_policy(config.as_deref())?;
            let request = read_request(input.as_deref())?;
            let outcome = find_meeting_slots_with(&request, &policy, &ChronoTzResolver)
                .context("Search failed")?;

            // Over every candidate, even when full matches exist.
            let ids: Vec<&str> = request.participants.iter().map(|p| p.id.as_str()).collect();
            let summary = summarize(&outcome.slots, &ids);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Initialize logging from `SLOTS_LOG` or the `--verbose` flag.
///
/// - `SLOTS_LOG` env var: full filter control (e.g. `SLOTS_LOG=slot_engine=trace`)
/// - `--verbose`: sets the engine crates to `Debug` level
/// - Otherwise: `Warn` level only, which still shows roster data-quality warnings
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.format_target(true);
    builder.format_module_path(false);

    if let Ok(filter) = std::env::var("SLOTS_LOG") {
        builder.parse_filters(&filter);
    } else if verbose {
        builder.filter_module("slot_engine", log::LevelFilter::Debug);
        builder.filter_module("slots", log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Warn);
    }

    builder.init();
}

fn load_policy(path: Option<&str>) -> Result<SchedulingPolicy> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path))?;
            toml::from_str(&raw).with_context(|| format!("Invalid config: {}", path))
        }
        None => Ok(SchedulingPolicy::default()),
    }
}

fn read_request(path: Option<&str>) -> Result<SearchRequest> {
    let json = read_input(path)?;
    SearchRequest::from_json(&json).context("Failed to parse search request")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
