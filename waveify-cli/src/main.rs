//! Waveify CLI Application
//!
//! Command-line front end for the waveify library. It adds:
//! - Input selection (files or stdin)
//! - Optional TOML configuration
//! - Diagnostics for malformed lines
//! - A terminal chart renderer

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use waveify_core::{synthesize_outcome, ParseOutcome};

mod config;
mod terminal;

use config::AppConfig;
use terminal::TerminalChart;

/// Waveify - a visualization tool for log data
///
/// Each input line is `<time> <type> [<name>]`. Every distinct type becomes
/// its own step line, stacked in the order the types first appear.
#[derive(clap::Parser, Debug)]
#[command(name = "waveify")]
#[command(about = "Render timestamped log events as stacked step waveforms", long_about = None)]
#[command(version)]
struct Args {
    /// Files to read; if empty, stdin is used ("-" also means stdin)
    #[arg(short, long, value_name = "FILE", num_args = 0..)]
    files: Vec<PathBuf>,

    /// Report malformed lines and keep going instead of stopping at the first
    #[arg(long)]
    skip_malformed: bool,

    /// Horizontal resolution of the chart (columns per time unit)
    #[arg(long, value_name = "N")]
    columns_per_unit: Option<usize>,

    /// Path to configuration file (waveify.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::debug!("Waveify CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using waveify library v{}", waveify_core::VERSION);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    }
    .with_overrides(args.skip_malformed, args.columns_per_unit);
    config.validate()?;

    run(&args.files, &config)
}

/// Parse, synthesize and render once
fn run(files: &[PathBuf], config: &AppConfig) -> Result<()> {
    let parser = waveify_core::Parser::new(config.parse.clone());
    let outcome = parser
        .parse_sources(files)
        .context("Failed to read input")?;

    report_malformed(&outcome);

    let stats = outcome.database.stats();
    log::info!(
        "Parsed {} events in {} categories (max time {})",
        stats.num_events,
        stats.num_categories,
        outcome.max_time
    );

    let plot = synthesize_outcome(&outcome).context("Failed to build waveforms")?;
    if plot.is_empty() {
        log::warn!("No events parsed; the chart is empty");
    }

    let stdout = io::stdout();
    let mut chart = TerminalChart::new(stdout.lock(), config.render.columns_per_unit);
    plot.render(&mut chart).context("Failed to render chart")?;

    Ok(())
}

/// Print a diagnostic for every rejected line
///
/// Diagnostics go to stdout and do not change the exit status.
fn report_malformed(outcome: &ParseOutcome) {
    for line in &outcome.malformed {
        println!("error parsing line: {}", line.text);
    }
    if let Some(line) = outcome.halted_at() {
        log::info!("Stopped reading input at {}", line);
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
