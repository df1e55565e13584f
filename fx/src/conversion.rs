//! Currency conversion records.

use chrono::{DateTime, Utc};
use ratescope_common::Currency;
use serde::Serialize;
use std::fmt;

use crate::error::FxResult;
use crate::resolver::{CrossRateResolver, RateSource, ResolvedRate};

/// A completed currency conversion.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// Source currency.
    pub from: Currency,
    /// Target currency.
    pub to: Currency,
    /// Amount in the source currency.
    pub amount: f64,
    /// Amount in the target currency.
    pub output: f64,
    /// Rate used: units of `to` per unit of `from`.
    pub rate: f64,
    /// How the rate was obtained.
    pub source: RateSource,
    /// When the conversion was computed.
    pub executed_at: DateTime<Utc>,
}

impl Conversion {
    /// Create a conversion from a resolved rate.
    pub fn new(from: Currency, to: Currency, amount: f64, resolved: ResolvedRate) -> Self {
        Self {
            from,
            to,
            amount,
            output: amount * resolved.rate,
            rate: resolved.rate,
            source: resolved.source,
            executed_at: Utc::now(),
        }
    }

    /// Get the effective rate used.
    pub fn effective_rate(&self) -> f64 {
        if self.amount == 0.0 {
            return self.rate;
        }
        self.output / self.amount
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} = {:.4} {} (1 {} = {:.6} {}, {})",
            self.amount, self.from, self.output, self.to, self.from, self.rate, self.to, self.source
        )
    }
}

/// Request to perform a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// Amount to convert.
    pub amount: f64,
    /// Source currency.
    pub from: Currency,
    /// Target currency.
    pub to: Currency,
}

impl ConversionRequest {
    /// Create a new conversion request.
    pub fn new(amount: f64, from: impl Into<Currency>, to: impl Into<Currency>) -> Self {
        Self {
            amount,
            from: from.into(),
            to: to.into(),
        }
    }

    /// Execute against a resolver.
    pub fn execute(self, resolver: &CrossRateResolver<'_>) -> FxResult<Conversion> {
        let resolved = resolver.try_rate(&self.from, &self.to)?;
        Ok(Conversion::new(self.from, self.to, self.amount, resolved))
    }
}
