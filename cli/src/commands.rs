//! Subcommands and their execution.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Subcommand;
use ratescope_common::{ChangeMetric, Currency};
use ratescope_fx::{ConversionRequest, FxAnalyzer};
use serde::Serialize;
use tracing::info;

use crate::render;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the best performing pairs
    Top {
        /// Metric to rank by: "Percent Change", Weekly, Monthly, YTD or YoY
        #[arg(short, long, default_value = "Percent Change", value_parser = parse_metric)]
        metric: ChangeMetric,

        /// Number of pairs to show
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,
    },

    /// Show the worst performing pairs
    Worst {
        /// Metric to rank by: "Percent Change", Weekly, Monthly, YTD or YoY
        #[arg(short, long, default_value = "Percent Change", value_parser = parse_metric)]
        metric: ChangeMetric,

        /// Number of pairs to show
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,
    },

    /// Convert an amount between two currencies
    Convert {
        /// Source currency, e.g. USD
        from: String,

        /// Target currency, e.g. INR
        to: String,

        /// Amount in the source currency
        amount: f64,
    },

    /// Show pairs whose day change exceeds the movement threshold
    Movements,

    /// Show volatility, reversal and arbitrage signals
    Opportunities,

    /// Show every pair sorted by day change
    Rates,

    /// List available currency pairs
    Pairs,

    /// List available currencies
    Currencies,

    /// Show the derived USD base rate table
    BaseRates,

    /// Print or save the full analysis report
    Report {
        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_metric(name: &str) -> Result<ChangeMetric, String> {
    let metric = ChangeMetric::from_name(name);
    if metric.is_known() {
        Ok(metric)
    } else {
        Err(format!(
            "unknown metric '{}', expected one of: {}",
            name,
            ChangeMetric::KNOWN.map(|m| m.column_name()).join(", ")
        ))
    }
}

fn emit<T, F>(format: OutputFormat, value: &T, text: F) -> anyhow::Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => Ok(text(value)),
    }
}

/// Run `command` against the loaded analyzer and return what to print.
pub fn run(analyzer: &FxAnalyzer, command: &Command, format: OutputFormat) -> anyhow::Result<String> {
    match command {
        Command::Top { metric, count } => {
            let quotes = analyzer.top_performers(*metric, *count);
            emit(format, &quotes, |q| render::performers("Top", q, *metric))
        }

        Command::Worst { metric, count } => {
            let quotes = analyzer.worst_performers(*metric, *count);
            emit(format, &quotes, |q| render::performers("Worst", q, *metric))
        }

        Command::Convert { from, to, amount } => {
            let snapshot = analyzer.snapshot();
            let from = Currency::new(from);
            let to = Currency::new(to);

            if !snapshot.has_currency(&from) {
                bail!("Source currency '{}' not found", from);
            }
            if !snapshot.has_currency(&to) {
                bail!("Target currency '{}' not found", to);
            }

            let conversion = analyzer
                .convert(ConversionRequest::new(*amount, from, to))
                .context("Conversion failed")?;
            emit(format, &conversion, render::conversion)
        }

        Command::Movements => {
            let movements = analyzer.detect_significant_movements();
            emit(format, &movements, |m| render::movements(m))
        }

        Command::Opportunities => {
            let signals = analyzer.identify_trading_opportunities();
            emit(format, &signals, |s| render::signals(s))
        }

        Command::Rates => {
            let quotes = analyzer.all_by_metric(ChangeMetric::DayPercent);
            emit(format, &quotes, |q| render::all_rates(q))
        }

        Command::Pairs => {
            let pairs = analyzer.available_currency_pairs();
            emit(format, &pairs, |p| render::pairs(p))
        }

        Command::Currencies => {
            let currencies = analyzer.available_currencies();
            emit(format, &currencies, |c| render::currencies(c))
        }

        Command::BaseRates => {
            let table = analyzer.base_rates();
            emit(format, &table, render::base_rates)
        }

        Command::Report { output } => {
            let report = analyzer.analysis_report();
            let rendered = match format {
                OutputFormat::Json => {
                    let mut json = report.to_json()?;
                    json.push('\n');
                    json
                }
                OutputFormat::Text => report.to_string(),
            };

            match output {
                Some(path) => {
                    std::fs::write(path, rendered)
                        .with_context(|| format!("Failed to write report to {}", path.display()))?;
                    info!(path = %path.display(), "Saved analysis report");
                    Ok(format!("Analysis saved to {}\n", path.display()))
                }
                None => Ok(rendered),
            }
        }
    }
}
