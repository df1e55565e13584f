//! RateScope CLI
//!
//! Loads a quote file and runs one analysis command against it.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ratescope_fx::{AnalyzerConfig, FxAnalyzer};
use ratescope_loader::QuoteFile;

mod commands;
mod render;

use commands::{Command, OutputFormat};

/// RateScope CLI
#[derive(Parser, Debug)]
#[command(name = "ratescope")]
#[command(about = "FX snapshot analytics: rankings, cross rates, movements and arbitrage")]
struct Args {
    /// Quote file to load (.json or .csv)
    #[arg(short, long, global = true, default_value = "currency_data.json")]
    data: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Day change in percent above which a pair counts as a significant movement
    #[arg(long, global = true)]
    movement_threshold: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    // Load configuration
    let mut config = AnalyzerConfig::from_env();
    if let Some(threshold) = args.movement_threshold {
        config.detector.movement_threshold_pct = threshold;
    }
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let analyzer = FxAnalyzer::new(config);

    let source = QuoteFile::open(&args.data)
        .with_context(|| format!("Cannot read {}", args.data.display()))?;
    let quotes = source
        .load()
        .with_context(|| format!("Failed to load currency data from {}", args.data.display()))?;
    analyzer.load(quotes);

    debug!(command = ?args.command, "Running command");

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let output = commands::run(&analyzer, &args.command, format)?;
    print!("{}", output);

    Ok(())
}
