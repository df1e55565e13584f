//! Cross-rate resolution.
//!
//! Lookup order for `rate(from, to)`:
//!
//! 1. `from == to` resolves to 1.0.
//! 2. A quote for `from/to` resolves to its price.
//! 3. A quote for `to/from` resolves to the reciprocal of its price.
//! 4. If both currencies are in the base rate table, the rate is chained
//!    through USD.
//!
//! Quoted rates always take precedence over the derived table.

use std::fmt;

use ratescope_common::Currency;
use serde::Serialize;
use tracing::warn;

use crate::error::{FxError, FxResult};
use crate::snapshot::QuoteSnapshot;

/// How a rate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RateSource {
    /// Same currency on both sides.
    Identity,
    /// Price of a `from/to` quote.
    Direct,
    /// Reciprocal of a `to/from` quote.
    Inverse,
    /// Chained through the base rate table.
    UsdCross,
}

impl fmt::Display for RateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RateSource::Identity => "identity",
            RateSource::Direct => "direct quote",
            RateSource::Inverse => "inverse quote",
            RateSource::UsdCross => "USD cross",
        };
        f.write_str(name)
    }
}

/// A resolved exchange rate: units of `to` per unit of `from`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedRate {
    pub rate: f64,
    pub source: RateSource,
}

/// Resolves rates between any two currencies of a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct CrossRateResolver<'a> {
    snapshot: &'a QuoteSnapshot,
}

impl<'a> CrossRateResolver<'a> {
    /// Create a resolver over a snapshot.
    pub fn new(snapshot: &'a QuoteSnapshot) -> Self {
        Self { snapshot }
    }

    /// Resolve a rate, or `None` if no conversion path exists.
    pub fn resolve(&self, from: &Currency, to: &Currency) -> Option<ResolvedRate> {
        if from == to {
            return Some(ResolvedRate {
                rate: 1.0,
                source: RateSource::Identity,
            });
        }

        if let Some(quote) = self.snapshot.find_pair(from, to) {
            return Some(ResolvedRate {
                rate: quote.price(),
                source: RateSource::Direct,
            });
        }

        if let Some(quote) = self.snapshot.find_pair(to, from) {
            return Some(ResolvedRate {
                rate: 1.0 / quote.price(),
                source: RateSource::Inverse,
            });
        }

        self.snapshot
            .base_rates()
            .cross_rate(from, to)
            .map(|rate| ResolvedRate {
                rate,
                source: RateSource::UsdCross,
            })
    }

    /// Resolve a rate, failing with `NoConversionPath`.
    pub fn try_rate(&self, from: &Currency, to: &Currency) -> FxResult<ResolvedRate> {
        self.resolve(from, to).ok_or_else(|| FxError::NoConversionPath {
            from: from.clone(),
            to: to.clone(),
        })
    }

    /// Resolve a rate, returning 0.0 when no conversion path exists.
    ///
    /// A 0.0 result means "unavailable", never a free conversion.
    pub fn rate(&self, from: &Currency, to: &Currency) -> f64 {
        match self.resolve(from, to) {
            Some(resolved) => resolved.rate,
            None => {
                warn!(from = %from, to = %to, "Could not find conversion rate");
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use ratescope_common::Quote;

    fn snapshot(pairs: &[(&str, f64)]) -> QuoteSnapshot {
        QuoteSnapshot::new(pairs.iter().map(|(code, price)| Quote::new(*code, *price)).collect())
    }

    fn usd_snapshot() -> QuoteSnapshot {
        snapshot(&[("USD/INR", 83.0), ("EUR/USD", 1.10), ("USD/JPY", 150.0)])
    }

    #[test]
    fn test_self_rate_is_one() {
        let snap = usd_snapshot();
        let resolver = snap.resolver();

        let resolved = resolver.resolve(&Currency::eur(), &Currency::eur()).unwrap();
        assert_eq!(resolved.rate, 1.0);
        assert_eq!(resolved.source, RateSource::Identity);

        // Holds even for currencies outside the dataset.
        assert_eq!(resolver.rate(&Currency::new("XYZ"), &Currency::new("XYZ")), 1.0);
    }

    #[test]
    fn test_direct_and_inverse() {
        let snap = usd_snapshot();
        let resolver = snap.resolver();

        let direct = resolver.resolve(&Currency::usd(), &Currency::inr()).unwrap();
        assert_eq!(direct.rate, 83.0);
        assert_eq!(direct.source, RateSource::Direct);

        let inverse = resolver.resolve(&Currency::inr(), &Currency::usd()).unwrap();
        assert_eq!(inverse.rate, 1.0 / 83.0);
        assert_eq!(inverse.source, RateSource::Inverse);
    }

    #[test]
    fn test_usd_cross() {
        let snap = usd_snapshot();
        let resolver = snap.resolver();

        let eur_inr = resolver.resolve(&Currency::eur(), &Currency::inr()).unwrap();
        assert_eq!(eur_inr.source, RateSource::UsdCross);
        assert_relative_eq!(eur_inr.rate, 91.3, max_relative = 1e-9);

        let inr_eur = resolver.rate(&Currency::inr(), &Currency::eur());
        assert_relative_eq!(inr_eur, 1.0 / 91.3, max_relative = 1e-9);
    }

    #[test]
    fn test_quote_overrides_derived_table() {
        // The table would give EUR/JPY = 150 * 1.10 = 165.
        let snap = snapshot(&[("EUR/USD", 1.10), ("USD/JPY", 150.0), ("EUR/JPY", 160.0)]);
        let resolver = snap.resolver();

        assert_eq!(resolver.rate(&Currency::eur(), &Currency::jpy()), 160.0);
        assert_eq!(resolver.rate(&Currency::jpy(), &Currency::eur()), 1.0 / 160.0);
    }

    #[test]
    fn test_unreachable_pair_falls_back_to_quotes() {
        let snap = snapshot(&[("USD/INR", 83.0), ("AAA/BBB", 4.0)]);
        let resolver = snap.resolver();

        assert_eq!(resolver.rate(&Currency::new("AAA"), &Currency::new("BBB")), 4.0);
        assert_eq!(resolver.rate(&Currency::new("BBB"), &Currency::new("AAA")), 0.25);
    }

    #[test]
    fn test_no_conversion_path() {
        let snap = snapshot(&[("USD/INR", 83.0), ("AAA/BBB", 4.0)]);
        let resolver = snap.resolver();

        assert_eq!(resolver.rate(&Currency::new("AAA"), &Currency::inr()), 0.0);
        assert!(resolver.resolve(&Currency::new("AAA"), &Currency::inr()).is_none());
        assert!(matches!(
            resolver.try_rate(&Currency::new("AAA"), &Currency::inr()),
            Err(FxError::NoConversionPath { .. })
        ));
    }

    #[test]
    fn test_unusable_quote_skipped() {
        // A zero-priced direct quote must not produce a zero or infinite rate.
        let snap = snapshot(&[("USD/INR", 0.0), ("USD/INR", 83.0)]);
        let resolver = snap.resolver();

        assert_eq!(resolver.rate(&Currency::usd(), &Currency::inr()), 83.0);
        assert_eq!(resolver.rate(&Currency::inr(), &Currency::usd()), 1.0 / 83.0);
    }

    #[test]
    fn test_empty_snapshot_resolves_nothing() {
        let snap = QuoteSnapshot::empty();
        assert_eq!(snap.resolver().rate(&Currency::eur(), &Currency::usd()), 0.0);
    }

    proptest! {
        #[test]
        fn prop_quoted_rates_are_exact_reciprocals(price in 0.0001f64..100_000.0) {
            let snap = QuoteSnapshot::new(vec![Quote::new("AAA/BBB", price)]);
            let resolver = snap.resolver();
            let a = Currency::new("AAA");
            let b = Currency::new("BBB");

            let forward = resolver.rate(&a, &b);
            let backward = resolver.rate(&b, &a);
            prop_assert!((forward * backward - 1.0).abs() < 1e-12);
        }
    }
}
