//! Battlefield compare CLI - check a trace document against expected events
//!
//! Usage:
//!     battlefield-compare
//!     battlefield-compare run/expected.jsonl run/syncer-leap.json
//!     battlefield-compare --json expected.jsonl dm.log.json
//!
//! Exit status: 0 when every expected event was found, 1 when at least one
//! was not, 2 when an input could not be read or parsed.

use std::path::PathBuf;

use battlefield_core::config::{DEFAULT_EXPECTED_PATH, DEFAULT_TRACE_PATH};
use battlefield_core::{Comparator, CompareConfig, ComparisonReport, OutputFormat};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "battlefield-compare")]
#[command(about = "Compare a firehose trace document with an expected event log")]
#[command(version)]
struct Args {
    /// Path to the expected events file (newline-delimited JSON)
    #[arg(default_value = DEFAULT_EXPECTED_PATH, env = "BATTLEFIELD_EXPECTED")]
    expected_file: PathBuf,

    /// Path to the decoded trace document (JSON array of blocks)
    #[arg(default_value = DEFAULT_TRACE_PATH, env = "BATTLEFIELD_TRACE")]
    trace_file: PathBuf,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Verbose output (log every match to stderr)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> CompareConfig {
        CompareConfig::builder()
            .expected_path(&self.expected_file)
            .trace_path(&self.trace_file)
            .output(if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            })
            .build()
    }
}

fn main() {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the report
    let default_filter = if args.verbose {
        "battlefield_core=debug"
    } else {
        "battlefield_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    std::process::exit(run(args.config()));
}

/// Run one comparison and return the process exit status
fn run(config: CompareConfig) -> i32 {
    let comparator = Comparator::new(config);
    let report = match comparator.run() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error [{}]: {}", e.error_code(), e);
            return 2;
        }
    };

    if let Err(e) = print_report(&report, comparator.config().output) {
        eprintln!("Error writing report: {}", e);
        return 2;
    }

    report.exit_code()
}

fn print_report(report: &ComparisonReport, output: OutputFormat) -> Result<(), serde_json::Error> {
    match output {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
