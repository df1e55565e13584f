//! Currency codes and currency pairs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PairError;

/// Separator between base and quote currency in a pair code.
pub const PAIR_SEPARATOR: char = '/';

/// Currency code, e.g. `USD`.
///
/// Codes are trimmed and upper-cased on construction. An empty code is
/// representable: it is what a quote carries when its pair code had no
/// separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Check if the code is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The reference currency of the base rate table.
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn gbp() -> Self {
        Self::new("GBP")
    }

    pub fn jpy() -> Self {
        Self::new("JPY")
    }

    pub fn inr() -> Self {
        Self::new("INR")
    }

    /// Check if this is the reference currency.
    pub fn is_usd(&self) -> bool {
        self.0 == "USD"
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Split a pair code on its separator.
///
/// Returns `None` when the code has no separator. Sides are normalized as
/// currency codes but may still be empty (e.g. `"USD/"`).
pub fn split_pair_code(code: &str) -> Option<(Currency, Currency)> {
    let (base, quote) = code.split_once(PAIR_SEPARATOR)?;
    Some((Currency::new(base), Currency::new(quote)))
}

/// A validated currency pair: two distinct, non-empty currencies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Base currency (one unit of it is priced).
    pub base: Currency,
    /// Quote currency (pricing currency).
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Get the inverse pair.
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }

    /// Canonical pair code, `BASE/QUOTE`.
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.base, PAIR_SEPARATOR, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = PairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) =
            split_pair_code(s).ok_or_else(|| PairError::MissingSeparator(s.to_string()))?;

        if base.is_empty() || quote.is_empty() {
            return Err(PairError::EmptyCurrency(s.to_string()));
        }
        if base == quote {
            return Err(PairError::SameCurrency(s.to_string()));
        }

        Ok(Self::new(base, quote))
    }
}
