//! The quote record: one currency-pair snapshot with its change metrics.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::currency::{split_pair_code, Currency, CurrencyPair, PAIR_SEPARATOR};
use crate::metric::ChangeMetric;

/// Change metrics attached to a quote. Missing values are 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteChanges {
    /// Day change, absolute (in quote currency units).
    pub day_abs: f64,
    /// Day change in percent.
    pub day_pct: f64,
    /// Weekly change in percent.
    pub weekly_pct: f64,
    /// Monthly change in percent.
    pub monthly_pct: f64,
    /// Year-to-date change in percent.
    pub ytd_pct: f64,
    /// Year-over-year change in percent.
    pub yoy_pct: f64,
}

/// A single currency-pair quote.
///
/// Base and quote currency are derived from the pair code at construction.
/// A code without a separator leaves both empty; such a quote is kept but
/// never used for rate derivation. Deserialization goes through
/// [`Quote::new`], so serialized `base`/`quote` fields are re-derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "QuoteRecord")]
pub struct Quote {
    pair_code: String,
    base: Currency,
    quote: Currency,
    price: f64,
    #[serde(flatten)]
    changes: QuoteChanges,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

impl Quote {
    /// Create a quote from a pair code and price, with zero changes.
    ///
    /// With a separator present the code is rebuilt from the normalized
    /// sides, so `"usd/inr"` becomes `"USD/INR"`.
    pub fn new(pair_code: impl Into<String>, price: f64) -> Self {
        let raw: String = pair_code.into();
        let raw = raw.trim();
        let (pair_code, base, quote) = match split_pair_code(raw) {
            Some((base, quote)) => (format!("{}{}{}", base, PAIR_SEPARATOR, quote), base, quote),
            None => (raw.to_string(), Currency::default(), Currency::default()),
        };

        Self {
            pair_code,
            base,
            quote,
            price,
            changes: QuoteChanges::default(),
            group: None,
            timestamp: None,
        }
    }

    /// Create a quote from explicit currencies and a day percent change.
    pub fn from_currencies(base: Currency, quote: Currency, price: f64, day_pct: f64) -> Self {
        Self {
            pair_code: format!("{}{}{}", base, PAIR_SEPARATOR, quote),
            base,
            quote,
            price,
            changes: QuoteChanges {
                day_pct,
                ..QuoteChanges::default()
            },
            group: None,
            timestamp: None,
        }
    }

    /// Set all change metrics.
    pub fn with_changes(mut self, changes: QuoteChanges) -> Self {
        self.changes = changes;
        self
    }

    /// Set the group label. Empty labels are treated as absent.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = non_empty(group.into());
        self
    }

    /// Set the timestamp. Empty timestamps are treated as absent.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = non_empty(timestamp.into());
        self
    }

    pub fn pair_code(&self) -> &str {
        &self.pair_code
    }

    pub fn base(&self) -> &Currency {
        &self.base
    }

    pub fn quote(&self) -> &Currency {
        &self.quote
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn changes(&self) -> &QuoteChanges {
        &self.changes
    }

    pub fn day_change(&self) -> f64 {
        self.changes.day_abs
    }

    pub fn percent_change(&self) -> f64 {
        self.changes.day_pct
    }

    pub fn weekly_change(&self) -> f64 {
        self.changes.weekly_pct
    }

    pub fn monthly_change(&self) -> f64 {
        self.changes.monthly_pct
    }

    pub fn ytd_change(&self) -> f64 {
        self.changes.ytd_pct
    }

    pub fn yoy_change(&self) -> f64 {
        self.changes.yoy_pct
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// The validated pair, if both currencies are present and distinct.
    pub fn pair(&self) -> Option<CurrencyPair> {
        self.pair_code.parse().ok()
    }

    /// The validated pair, if the quote also has a finite, positive price.
    pub fn tradable_pair(&self) -> Option<CurrencyPair> {
        self.pair()
            .filter(|_| self.price.is_finite() && self.price > 0.0)
    }

    /// Check if the quote can be used for rate derivation and lookup.
    pub fn is_tradable(&self) -> bool {
        self.tradable_pair().is_some()
    }

    /// Update the price. The absolute day change becomes the price delta.
    pub fn set_price(&mut self, new_price: f64) {
        self.changes.day_abs = new_price - self.price;
        self.price = new_price;
    }

    /// Value of the given percent-change metric, 0.0 for `Unknown`.
    pub fn change_by_metric(&self, metric: ChangeMetric) -> f64 {
        match metric {
            ChangeMetric::DayPercent => self.changes.day_pct,
            ChangeMetric::Weekly => self.changes.weekly_pct,
            ChangeMetric::Monthly => self.changes.monthly_pct,
            ChangeMetric::Ytd => self.changes.ytd_pct,
            ChangeMetric::Yoy => self.changes.yoy_pct,
            ChangeMetric::Unknown => 0.0,
        }
    }

    /// Reciprocal quote, e.g. `USD/INR` -> `INR/USD`.
    ///
    /// Percent changes are re-expressed from the other side of the pair and
    /// the absolute day change uses the first-order approximation of d(1/x).
    /// A zero price inverts to an infinite price.
    pub fn invert(&self) -> Quote {
        let price = self.price;
        Quote {
            pair_code: format!("{}{}{}", self.quote, PAIR_SEPARATOR, self.base),
            base: self.quote.clone(),
            quote: self.base.clone(),
            price: 1.0 / price,
            changes: QuoteChanges {
                day_abs: -self.changes.day_abs / (price * price),
                day_pct: invert_percent(self.changes.day_pct),
                weekly_pct: invert_percent(self.changes.weekly_pct),
                monthly_pct: invert_percent(self.changes.monthly_pct),
                ytd_pct: invert_percent(self.changes.ytd_pct),
                yoy_pct: invert_percent(self.changes.yoy_pct),
            },
            group: self.group.clone(),
            timestamp: self.timestamp.clone(),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.4}", self.pair_code, self.price)?;
        if self.changes.day_pct != 0.0 {
            write!(f, " ({:+.2}%)", self.changes.day_pct)?;
        }
        Ok(())
    }
}

/// Wire form of a quote. Derived fields are ignored on input.
#[derive(Deserialize)]
struct QuoteRecord {
    pair_code: String,
    price: f64,
    #[serde(flatten)]
    changes: QuoteChanges,
    group: Option<String>,
    timestamp: Option<String>,
}

impl From<QuoteRecord> for Quote {
    fn from(record: QuoteRecord) -> Self {
        let mut quote = Quote::new(record.pair_code, record.price).with_changes(record.changes);
        if let Some(group) = record.group {
            quote = quote.with_group(group);
        }
        if let Some(timestamp) = record.timestamp {
            quote = quote.with_timestamp(timestamp);
        }
        quote
    }
}

/// Percent change seen from the other side of a pair.
pub fn invert_percent(pct: f64) -> f64 {
    (1.0 / (1.0 + pct / 100.0) - 1.0) * 100.0
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
