//! # Till Float CLI Entry Point
//!
//! A thin terminal host over till-core.
//!
//! ## Usage
//! ```bash
//! # Reconcile a counted till against the standard AUD float
//! till plan counts.json
//!
//! # Same, but emit the raw report as JSON (for piping to other tools)
//! till plan counts.json --json
//!
//! # Cross-check a recounted takings bag against the till count
//! till check counts.json recount.json
//! ```
//!
//! Input files are JSON maps of denomination key to counted quantity:
//! ```json
//! { "n50": 1, "n20": 12, "c50": 8 }
//! ```
//! Missing keys count as zero; negative values clamp to zero.
//!
//! ## Host Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  this crate:  read file ──► till-core ──► format text ──► stdout        │
//! │                                                                         │
//! │  Session state (which report was last computed) lives HERE, in main's   │
//! │  locals. The core is stateless: `check` recomputes the expected         │
//! │  takings from the till counts instead of asking the core to remember.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod render;

use std::env;
use std::fs;
use std::process::ExitCode;

use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use till_core::{check_takings, reconcile, DenominationTable, RawCounts};

const USAGE: &str = "\
Usage:
  till plan <counts.json> [--json]   reconcile a counted till
  till check <counts.json> <recount.json>
                                     cross-check a recounted takings bag";

fn main() -> ExitCode {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let table = DenominationTable::aud();

    match args {
        [cmd, counts_path] if cmd == "plan" => plan(&table, counts_path, false),
        [cmd, counts_path, flag] if cmd == "plan" && flag == "--json" => {
            plan(&table, counts_path, true)
        }
        [cmd, counts_path, recount_path] if cmd == "check" => {
            check(&table, counts_path, recount_path)
        }
        _ => Err("expected `plan <counts.json> [--json]` or `check <counts.json> <recount.json>`"
            .to_string()),
    }
}

/// Reads a JSON counts file into the core's input type.
fn read_counts(path: &str) -> Result<RawCounts, String> {
    debug!(path, "reading counts file");
    let text = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("{path} is not a counts map: {e}"))
}

/// `till plan`: one full reconciliation, rendered or raw.
fn plan(table: &DenominationTable, counts_path: &str, as_json: bool) -> Result<(), String> {
    let counts = read_counts(counts_path)?;
    let report = reconcile(table, &counts).map_err(|e| e.to_string())?;
    info!(
        steps = report.steps.len(),
        fully_resolved = report.fully_resolved,
        expected_takings = report.summary.expected_takings.cents(),
        "reconciliation complete"
    );

    if as_json {
        let json =
            serde_json::to_string_pretty(&report).map_err(|e| format!("serialize report: {e}"))?;
        println!("{json}");
    } else {
        print!("{}", render::render_report(&report));
    }
    Ok(())
}

/// `till check`: recompute expected takings, then compare the recount.
fn check(
    table: &DenominationTable,
    counts_path: &str,
    recount_path: &str,
) -> Result<(), String> {
    let counts = read_counts(counts_path)?;
    let recount = read_counts(recount_path)?;

    let report = reconcile(table, &counts).map_err(|e| e.to_string())?;
    let result = check_takings(table, &recount, report.summary.expected_takings)
        .map_err(|e| e.to_string())?;
    info!(
        expected = report.summary.expected_takings.cents(),
        "takings double-check complete"
    );

    println!("{}", render::render_check(&result));
    Ok(())
}
