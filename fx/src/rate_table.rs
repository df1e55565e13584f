//! Base rate table: every reachable currency expressed against USD.
//!
//! A table value is the number of units of the currency per 1 USD, the
//! USD/X quote convention. USD itself is always 1.0.
//!
//! The table is derived from a sparse, possibly inconsistent quote set. Direct
//! USD quotes seed it, then values propagate along the remaining quotes until
//! a full pass adds nothing. When a currency is reachable along several paths
//! the first value derived in input order wins, so the result depends on
//! quote order whenever the input is inconsistent.

use std::collections::BTreeMap;

use ratescope_common::{Currency, Quote};
use serde::Serialize;
use tracing::debug;

/// Mapping from currency to units per 1 USD.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BaseRateTable {
    rates: BTreeMap<Currency, f64>,
}

impl BaseRateTable {
    /// Derive the table from a quote collection.
    pub fn build(quotes: &[Quote]) -> Self {
        let mut rates = BTreeMap::new();
        let tradable: Vec<&Quote> = quotes.iter().filter(|q| q.is_tradable()).collect();

        // Seed from direct USD quotes; later records overwrite earlier ones.
        for quote in &tradable {
            if quote.base().is_usd() {
                rates.insert(quote.quote().clone(), quote.price());
            } else if quote.quote().is_usd() {
                rates.insert(quote.base().clone(), 1.0 / quote.price());
            }
        }
        rates.insert(Currency::usd(), 1.0);

        let seeded = rates.len();
        let mut passes = 0usize;

        loop {
            passes += 1;
            let mut changed = false;

            for quote in &tradable {
                let base_rate = rates.get(quote.base()).copied();
                let quote_rate = rates.get(quote.quote()).copied();

                match (base_rate, quote_rate) {
                    (Some(base_rate), None) => {
                        rates.insert(quote.quote().clone(), base_rate * quote.price());
                        changed = true;
                    }
                    (None, Some(quote_rate)) => {
                        rates.insert(quote.base().clone(), quote_rate / quote.price());
                        changed = true;
                    }
                    _ => {}
                }
            }

            if !changed {
                break;
            }
        }

        debug!(
            quotes = quotes.len(),
            tradable = tradable.len(),
            seeded,
            derived = rates.len() - seeded,
            passes,
            "Built base rate table"
        );

        Self { rates }
    }

    /// Units of `currency` per 1 USD, if reachable.
    pub fn get(&self, currency: &Currency) -> Option<f64> {
        self.rates.get(currency).copied()
    }

    /// Check if the currency is reachable from USD.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.rates.contains_key(currency)
    }

    /// Rate from `from` to `to` chained through USD.
    pub fn cross_rate(&self, from: &Currency, to: &Currency) -> Option<f64> {
        let from_rate = self.get(from)?;
        let to_rate = self.get(to)?;
        Some(to_rate / from_rate)
    }

    /// Number of currencies in the table (USD included).
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if the table is empty. A built table always holds USD.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterate entries in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (&Currency, f64)> {
        self.rates.iter().map(|(currency, rate)| (currency, *rate))
    }
}

impl Default for BaseRateTable {
    fn default() -> Self {
        Self::build(&[])
    }
}
