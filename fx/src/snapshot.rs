//! One loaded dataset: quotes plus everything derived from them on load.

use std::collections::{BTreeSet, HashMap};

use ratescope_common::{Currency, CurrencyPair, Quote};

use crate::rate_table::BaseRateTable;
use crate::resolver::CrossRateResolver;

/// Immutable view of a quote collection and its derived indexes.
///
/// Built completely before the engine publishes it, so readers never see a
/// half-loaded dataset.
#[derive(Debug, Clone)]
pub struct QuoteSnapshot {
    quotes: Vec<Quote>,
    pair_index: HashMap<CurrencyPair, usize>,
    currencies: Vec<Currency>,
    base_rates: BaseRateTable,
}

impl QuoteSnapshot {
    /// Build a snapshot from quotes in the order supplied.
    pub fn new(quotes: Vec<Quote>) -> Self {
        let mut pair_index = HashMap::new();
        let mut currencies = BTreeSet::new();

        for (idx, quote) in quotes.iter().enumerate() {
            for currency in [quote.base(), quote.quote()] {
                if !currency.is_empty() {
                    currencies.insert(currency.clone());
                }
            }

            // First tradable record for a pair wins.
            if let Some(pair) = quote.tradable_pair() {
                pair_index.entry(pair).or_insert(idx);
            }
        }

        let base_rates = BaseRateTable::build(&quotes);

        Self {
            quotes,
            pair_index,
            currencies: currencies.into_iter().collect(),
            base_rates,
        }
    }

    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// All quotes in input order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Distinct, non-empty currency codes in sorted order.
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// Pair codes in input order.
    pub fn pair_codes(&self) -> Vec<String> {
        self.quotes.iter().map(|q| q.pair_code().to_string()).collect()
    }

    /// The derived base rate table.
    pub fn base_rates(&self) -> &BaseRateTable {
        &self.base_rates
    }

    /// The first usable quote for `base/quote`, if any.
    pub fn find_pair(&self, base: &Currency, quote: &Currency) -> Option<&Quote> {
        self.pair_index
            .get(&CurrencyPair::new(base.clone(), quote.clone()))
            .map(|&idx| &self.quotes[idx])
    }

    /// The first quote whose pair code matches, case-insensitively.
    pub fn find_by_code(&self, pair_code: &str) -> Option<&Quote> {
        let wanted = pair_code.trim();
        self.quotes
            .iter()
            .find(|q| q.pair_code().eq_ignore_ascii_case(wanted))
    }

    /// Check if the currency appears in any quote.
    pub fn has_currency(&self, currency: &Currency) -> bool {
        self.currencies.binary_search(currency).is_ok()
    }

    /// Cross-rate resolver over this snapshot.
    pub fn resolver(&self) -> CrossRateResolver<'_> {
        CrossRateResolver::new(self)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl Default for QuoteSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currencies_sorted_and_distinct() {
        let snapshot = QuoteSnapshot::new(vec![
            Quote::new("USD/INR", 83.0),
            Quote::new("EUR/USD", 1.1),
            Quote::new("EURUSD", 1.1),
        ]);

        let codes: Vec<&str> = snapshot.currencies().iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec!["EUR", "INR", "USD"]);
        assert!(snapshot.has_currency(&Currency::inr()));
        assert!(!snapshot.has_currency(&Currency::jpy()));
    }

    #[test]
    fn test_pair_codes_keep_input_order() {
        let snapshot = QuoteSnapshot::new(vec![
            Quote::new("USD/JPY", 150.0),
            Quote::new("EUR/USD", 1.1),
            Quote::new("USD/JPY", 151.0),
        ]);
        assert_eq!(snapshot.pair_codes(), vec!["USD/JPY", "EUR/USD", "USD/JPY"]);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let snapshot = QuoteSnapshot::new(vec![
            Quote::new("USD/JPY", 0.0),
            Quote::new("USD/JPY", 150.0),
            Quote::new("USD/JPY", 151.0),
        ]);

        let quote = snapshot.find_pair(&Currency::usd(), &Currency::jpy()).unwrap();
        assert_eq!(quote.price(), 150.0);
    }

    #[test]
    fn test_lowercase_codes_normalized() {
        let snapshot = QuoteSnapshot::new(vec![Quote::new("usd/inr", 83.0), Quote::new("USD/USD", 1.0)]);

        assert_eq!(snapshot.pair_codes(), vec!["USD/INR", "USD/USD"]);
        assert_eq!(snapshot.currencies(), &[Currency::inr(), Currency::usd()]);
        assert_eq!(
            snapshot.find_pair(&Currency::usd(), &Currency::inr()).unwrap().pair_code(),
            "USD/INR"
        );
        assert!(snapshot.find_pair(&Currency::usd(), &Currency::usd()).is_none());
    }

    #[test]
    fn test_find_by_code() {
        let snapshot = QuoteSnapshot::new(vec![Quote::new("USD/INR", 83.0)]);
        assert!(snapshot.find_by_code("usd/inr").is_some());
        assert!(snapshot.find_by_code("INR/USD").is_none());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = QuoteSnapshot::empty();
        assert!(snapshot.is_empty());
        assert!(snapshot.currencies().is_empty());
        assert!(snapshot.pair_codes().is_empty());
        assert_eq!(snapshot.base_rates().len(), 1);
    }
}
