//! Change metrics used to rank quotes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percent-change metric carried by a quote.
///
/// `Unknown` stands for any name that does not match a known metric; its
/// value is always 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeMetric {
    /// Day change in percent.
    DayPercent,
    /// Weekly change in percent.
    Weekly,
    /// Monthly change in percent.
    Monthly,
    /// Year-to-date change in percent.
    Ytd,
    /// Year-over-year change in percent.
    Yoy,
    /// Unrecognized metric name.
    Unknown,
}

impl ChangeMetric {
    /// All known metrics, in menu order.
    pub const KNOWN: [ChangeMetric; 5] = [
        ChangeMetric::DayPercent,
        ChangeMetric::Weekly,
        ChangeMetric::Monthly,
        ChangeMetric::Ytd,
        ChangeMetric::Yoy,
    ];

    /// Map a metric name to its tag.
    ///
    /// Accepts the data-file column names ("Percent Change", "Weekly",
    /// "Monthly", "YTD", "YoY") and short aliases, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "percent change" | "percent-change" | "day" | "daily" => ChangeMetric::DayPercent,
            "weekly" | "week" => ChangeMetric::Weekly,
            "monthly" | "month" => ChangeMetric::Monthly,
            "ytd" => ChangeMetric::Ytd,
            "yoy" => ChangeMetric::Yoy,
            _ => ChangeMetric::Unknown,
        }
    }

    /// Column name as it appears in data files.
    pub fn column_name(self) -> &'static str {
        match self {
            ChangeMetric::DayPercent => "Percent Change",
            ChangeMetric::Weekly => "Weekly",
            ChangeMetric::Monthly => "Monthly",
            ChangeMetric::Ytd => "YTD",
            ChangeMetric::Yoy => "YoY",
            ChangeMetric::Unknown => "Unknown",
        }
    }

    /// Check if this is a recognized metric.
    pub fn is_known(self) -> bool {
        self != ChangeMetric::Unknown
    }
}

impl fmt::Display for ChangeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl From<&str> for ChangeMetric {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}
