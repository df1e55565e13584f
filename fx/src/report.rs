//! Analysis report combining rankings, movements and signals.

use chrono::{DateTime, Utc};
use ratescope_common::Quote;
use serde::Serialize;
use std::fmt;

use crate::detector::{Movement, TradingSignal};

/// A ranked entry in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPair {
    pub pair: String,
    pub price: f64,
    pub percent_change: f64,
}

impl From<&Quote> for RankedPair {
    fn from(quote: &Quote) -> Self {
        Self {
            pair: quote.pair_code().to_string(),
            price: quote.price(),
            percent_change: quote.percent_change(),
        }
    }
}

/// Point-in-time analysis of one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    /// Number of quotes in the analyzed snapshot.
    pub quote_count: usize,
    /// Best day-percent performers, best first.
    pub top_performers: Vec<RankedPair>,
    /// Worst day-percent performers, worst first.
    pub worst_performers: Vec<RankedPair>,
    pub movements: Vec<Movement>,
    pub signals: Vec<TradingSignal>,
}

impl AnalysisReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn write_ranked(f: &mut fmt::Formatter<'_>, title: &str, entries: &[RankedPair]) -> fmt::Result {
    writeln!(f, "{}:", title)?;
    for entry in entries {
        writeln!(f, "- {}: {:.2}%", entry.pair, entry.percent_change)?;
    }
    writeln!(f)
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Currency Analysis Report")?;
        writeln!(f, "========================")?;
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f)?;

        write_ranked(
            f,
            &format!("Top {} Daily Performers", self.top_performers.len()),
            &self.top_performers,
        )?;
        write_ranked(
            f,
            &format!("Worst {} Daily Performers", self.worst_performers.len()),
            &self.worst_performers,
        )?;

        writeln!(f, "Significant Movements:")?;
        if self.movements.is_empty() {
            writeln!(f, "No significant movements detected.")?;
        }
        for movement in &self.movements {
            writeln!(f, "- {}", movement)?;
        }
        writeln!(f)?;

        writeln!(f, "Trading Opportunities:")?;
        if self.signals.is_empty() {
            writeln!(f, "No trading opportunities identified.")?;
        }
        for signal in &self.signals {
            writeln!(f, "- {}", signal)?;
        }
        Ok(())
    }
}
