//! Column names and value cleaning shared by the JSON and CSV readers.

use ratescope_common::{Quote, QuoteChanges};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

pub const CURRENCY_PAIR: &str = "Currency Pair";
pub const PRICE: &str = "Price";
pub const DAY_CHANGE: &str = "Day Change";
pub const PERCENT_CHANGE: &str = "Percent Change";
pub const WEEKLY: &str = "Weekly";
pub const MONTHLY: &str = "Monthly";
pub const YTD: &str = "YTD";
pub const YOY: &str = "YoY";
pub const GROUP: &str = "Group";
pub const TIMESTAMP: &str = "Timestamp";
/// Written by the scraper instead of `Timestamp`.
pub const FETCH_TIME: &str = "Fetch_Time";

/// Parse a numeric cell such as `"1,234.5"`, `"+0.30%"` or `" -2 "`.
///
/// Anything unparseable or non-finite becomes 0.0.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '%')
        .collect();

    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// One scraper record, keyed by the scraper's column names.
///
/// Numeric cells may be JSON numbers or strings; both go through
/// [`parse_number`]. Missing cells take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuoteRecord {
    #[serde(rename = "Currency Pair", deserialize_with = "text_cell")]
    pub pair: Option<String>,
    #[serde(rename = "Price", deserialize_with = "number_cell")]
    pub price: f64,
    #[serde(rename = "Day Change", deserialize_with = "number_cell")]
    pub day_change: f64,
    #[serde(rename = "Percent Change", deserialize_with = "number_cell")]
    pub percent_change: f64,
    #[serde(rename = "Weekly", deserialize_with = "number_cell")]
    pub weekly: f64,
    #[serde(rename = "Monthly", deserialize_with = "number_cell")]
    pub monthly: f64,
    #[serde(rename = "YTD", deserialize_with = "number_cell")]
    pub ytd: f64,
    #[serde(rename = "YoY", deserialize_with = "number_cell")]
    pub yoy: f64,
    #[serde(rename = "Group", deserialize_with = "text_cell")]
    pub group: Option<String>,
    #[serde(rename = "Timestamp", deserialize_with = "text_cell")]
    pub timestamp: Option<String>,
    #[serde(rename = "Fetch_Time", deserialize_with = "text_cell")]
    pub fetch_time: Option<String>,
}

impl From<QuoteRecord> for Quote {
    fn from(record: QuoteRecord) -> Self {
        let changes = QuoteChanges {
            day_abs: record.day_change,
            day_pct: record.percent_change,
            weekly_pct: record.weekly,
            monthly_pct: record.monthly,
            ytd_pct: record.ytd,
            yoy_pct: record.yoy,
        };

        let mut quote =
            Quote::new(record.pair.unwrap_or_default(), record.price).with_changes(changes);

        if let Some(group) = record.group {
            quote = quote.with_group(group);
        }
        if let Some(timestamp) = record.timestamp.or(record.fetch_time) {
            quote = quote.with_timestamp(timestamp);
        }

        quote
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Text(String),
    Number(f64),
    Flag(bool),
    Other(IgnoredAny),
}

fn number_cell<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Cell::deserialize(deserializer)? {
        Cell::Text(raw) => parse_number(&raw),
        Cell::Number(value) if value.is_finite() => value,
        Cell::Number(_) | Cell::Flag(_) | Cell::Other(_) => 0.0,
    })
}

fn text_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Cell::deserialize(deserializer)? {
        Cell::Text(raw) => raw,
        Cell::Number(value) => value.to_string(),
        Cell::Flag(flag) => flag.to_string(),
        Cell::Other(_) => return Ok(None),
    };
    Ok(non_empty(&raw))
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Build a quote from a field lookup. Missing fields take their defaults.
pub fn quote_from_fields<F>(field: F) -> Quote
where
    F: Fn(&str) -> Option<String>,
{
    let number = |name: &str| field(name).map(|raw| parse_number(&raw)).unwrap_or(0.0);
    let text = |name: &str| field(name).and_then(|raw| non_empty(&raw));

    QuoteRecord {
        pair: text(CURRENCY_PAIR),
        price: number(PRICE),
        day_change: number(DAY_CHANGE),
        percent_change: number(PERCENT_CHANGE),
        weekly: number(WEEKLY),
        monthly: number(MONTHLY),
        ytd: number(YTD),
        yoy: number(YOY),
        group: text(GROUP),
        timestamp: text(TIMESTAMP),
        fetch_time: text(FETCH_TIME),
    }
    .into()
}
