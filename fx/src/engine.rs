//! Main analyzer implementation.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use ratescope_common::{ChangeMetric, Currency, Quote};
use tracing::{info, instrument, warn};

use crate::arbitrage::{ArbitrageScan, ArbitrageScanner};
use crate::config::AnalyzerConfig;
use crate::conversion::{Conversion, ConversionRequest};
use crate::detector::{Movement, MovementDetector, TradingSignal};
use crate::error::{FxError, FxResult};
use crate::ranking::{self, SortOrder};
use crate::rate_table::BaseRateTable;
use crate::report::{AnalysisReport, RankedPair};
use crate::resolver::ResolvedRate;
use crate::snapshot::QuoteSnapshot;
use crate::source::QuoteSource;

/// The FX snapshot analyzer.
///
/// Holds the current dataset as an `Arc<QuoteSnapshot>`. Every query clones
/// the `Arc` once and works on that view, so a concurrent `load` never mixes
/// old and new data within one answer.
pub struct FxAnalyzer {
    snapshot: RwLock<Arc<QuoteSnapshot>>,
    config: AnalyzerConfig,
    detector: MovementDetector,
    scanner: ArbitrageScanner,
}

impl FxAnalyzer {
    /// Create an empty analyzer.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(QuoteSnapshot::empty())),
            detector: MovementDetector::new(config.detector.clone()),
            scanner: ArbitrageScanner::new(&config.detector),
            config,
        }
    }

    /// Create an empty analyzer after validating the configuration.
    pub fn try_new(config: AnalyzerConfig) -> FxResult<Self> {
        config.validate().map_err(FxError::InvalidConfig)?;
        Ok(Self::new(config))
    }

    /// Create an analyzer already loaded with `quotes`.
    pub fn with_quotes(config: AnalyzerConfig, quotes: Vec<Quote>) -> Self {
        let analyzer = Self::new(config);
        analyzer.load(quotes);
        analyzer
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The currently active snapshot.
    pub fn snapshot(&self) -> Arc<QuoteSnapshot> {
        self.snapshot.read().clone()
    }

    /// Replace the dataset. The new snapshot is fully built before it
    /// becomes visible. Returns the number of quotes loaded.
    #[instrument(skip_all, fields(quotes = quotes.len()))]
    pub fn load(&self, quotes: Vec<Quote>) -> usize {
        let snapshot = Arc::new(QuoteSnapshot::new(quotes));
        let count = snapshot.len();

        info!(
            quotes = count,
            currencies = snapshot.currencies().len(),
            derived_rates = snapshot.base_rates().len(),
            "Loaded quote snapshot"
        );

        *self.snapshot.write() = snapshot;
        count
    }

    /// Fetch from `source` and replace the dataset.
    ///
    /// On a fetch error or an empty result the previous snapshot stays active.
    #[instrument(skip_all, fields(source = source.name()))]
    pub fn reload(&self, source: &dyn QuoteSource) -> FxResult<usize> {
        let quotes = match source.fetch() {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!(error = %e, "Reload failed, keeping previous snapshot");
                return Err(e);
            }
        };

        if quotes.is_empty() {
            warn!("Source returned no quotes, keeping previous snapshot");
            return Err(FxError::EmptyDataset(source.name().to_string()));
        }

        Ok(self.load(quotes))
    }

    /// Rate from `from` to `to`, or 0.0 when no conversion path exists.
    pub fn exchange_rate(&self, from: &Currency, to: &Currency) -> f64 {
        self.snapshot().resolver().rate(from, to)
    }

    /// Rate from `from` to `to` with its source.
    pub fn try_exchange_rate(&self, from: &Currency, to: &Currency) -> FxResult<ResolvedRate> {
        self.snapshot().resolver().try_rate(from, to)
    }

    /// Convert an amount to another currency.
    #[instrument(skip(self), fields(
        from_currency = %request.from,
        to_currency = %request.to,
        amount = request.amount
    ))]
    pub fn convert(&self, request: ConversionRequest) -> FxResult<Conversion> {
        let snapshot = self.snapshot();
        let conversion = request.execute(&snapshot.resolver())?;

        info!(
            rate = conversion.rate,
            source = %conversion.source,
            output = conversion.output,
            "Conversion completed"
        );

        Ok(conversion)
    }

    /// The `n` best quotes by `metric`.
    pub fn top_performers(&self, metric: ChangeMetric, n: usize) -> Vec<Quote> {
        ranking::top_performers(self.snapshot().quotes(), metric, n)
    }

    /// The `n` worst quotes by `metric`.
    pub fn worst_performers(&self, metric: ChangeMetric, n: usize) -> Vec<Quote> {
        ranking::worst_performers(self.snapshot().quotes(), metric, n)
    }

    /// Every quote, best first by `metric`.
    pub fn all_by_metric(&self, metric: ChangeMetric) -> Vec<Quote> {
        ranking::rank(self.snapshot().quotes(), metric, SortOrder::Descending)
    }

    /// Pair codes in input order.
    pub fn available_currency_pairs(&self) -> Vec<String> {
        self.snapshot().pair_codes()
    }

    /// Distinct currency codes, sorted.
    pub fn available_currencies(&self) -> Vec<Currency> {
        self.snapshot().currencies().to_vec()
    }

    pub fn base_rates(&self) -> BaseRateTable {
        self.snapshot().base_rates().clone()
    }

    pub fn detect_significant_movements(&self) -> Vec<Movement> {
        self.detector.detect_movements(self.snapshot().quotes())
    }

    /// Per-quote signals followed by arbitrage opportunities.
    #[instrument(skip(self))]
    pub fn identify_trading_opportunities(&self) -> Vec<TradingSignal> {
        let snapshot = self.snapshot();
        let mut signals = self.detector.quote_signals(snapshot.quotes());
        let quote_signals = signals.len();

        let scan = self.scanner.scan(&snapshot);
        signals.extend(scan.opportunities.into_iter().map(TradingSignal::Arbitrage));

        info!(
            quote_signals,
            arbitrage = signals.len() - quote_signals,
            "Identified trading opportunities"
        );
        signals
    }

    /// Triangular arbitrage scan over the current snapshot.
    pub fn find_arbitrage_opportunities(&self) -> ArbitrageScan {
        self.scanner.scan(&self.snapshot())
    }

    /// Full analysis of the current snapshot.
    pub fn analysis_report(&self) -> AnalysisReport {
        let snapshot = self.snapshot();
        let quotes = snapshot.quotes();
        let n = self.config.report_top_n;

        let ranked =
            |list: Vec<Quote>| -> Vec<RankedPair> { list.iter().map(RankedPair::from).collect() };

        let mut signals = self.detector.quote_signals(quotes);
        signals.extend(
            self.scanner
                .scan(&snapshot)
                .opportunities
                .into_iter()
                .map(TradingSignal::Arbitrage),
        );

        AnalysisReport {
            generated_at: Utc::now(),
            quote_count: quotes.len(),
            top_performers: ranked(ranking::top_performers(quotes, ChangeMetric::DayPercent, n)),
            worst_performers: ranked(ranking::worst_performers(
                quotes,
                ChangeMetric::DayPercent,
                n,
            )),
            movements: self.detector.detect_movements(quotes),
            signals,
        }
    }

    /// Look up a quote by pair code, case-insensitively.
    pub fn quote(&self, pair_code: &str) -> Option<Quote> {
        self.snapshot().find_by_code(pair_code).cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl Default for FxAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::RateSource;
    use crate::source::StaticQuoteSource;
    use approx::assert_relative_eq;
    use ratescope_common::QuoteChanges;

    fn quote(code: &str, price: f64, day_pct: f64, weekly_pct: f64) -> Quote {
        Quote::new(code, price).with_changes(QuoteChanges {
            day_pct,
            weekly_pct,
            ..QuoteChanges::default()
        })
    }

    fn sample_quotes() -> Vec<Quote> {
        vec![
            quote("USD/INR", 83.0, 0.3, 0.8),
            quote("EUR/USD", 1.10, -0.75, -0.4),
            quote("USD/JPY", 150.0, 1.2, -0.6),
            quote("GBP/USD", 1.27, 0.1, 0.2),
        ]
    }

    fn setup_analyzer() -> FxAnalyzer {
        FxAnalyzer::with_quotes(AnalyzerConfig::default(), sample_quotes())
    }

    #[test]
    fn test_exchange_rate() {
        let analyzer = setup_analyzer();

        assert_eq!(analyzer.exchange_rate(&Currency::usd(), &Currency::inr()), 83.0);
        assert_relative_eq!(
            analyzer.exchange_rate(&Currency::eur(), &Currency::inr()),
            91.3,
            max_relative = 1e-9
        );
        assert_eq!(analyzer.exchange_rate(&Currency::eur(), &Currency::new("XYZ")), 0.0);

        let resolved = analyzer
            .try_exchange_rate(&Currency::gbp(), &Currency::usd())
            .unwrap();
        assert_eq!(resolved.source, RateSource::Direct);
    }

    #[test]
    fn test_convert() {
        let analyzer = setup_analyzer();
        let conversion = analyzer
            .convert(ConversionRequest::new(100.0, "USD", "JPY"))
            .unwrap();
        assert_relative_eq!(conversion.output, 15_000.0);

        let result = analyzer.convert(ConversionRequest::new(1.0, "USD", "XYZ"));
        assert!(matches!(result, Err(FxError::NoConversionPath { .. })));
    }

    #[test]
    fn test_rankings() {
        let analyzer = setup_analyzer();

        let top = analyzer.top_performers(ChangeMetric::DayPercent, 1);
        assert_eq!(top[0].pair_code(), "USD/JPY");

        let worst = analyzer.worst_performers(ChangeMetric::Weekly, 1);
        assert_eq!(worst[0].pair_code(), "USD/JPY");

        let all = analyzer.all_by_metric(ChangeMetric::DayPercent);
        let codes: Vec<&str> = all.iter().map(|q| q.pair_code()).collect();
        assert_eq!(codes, vec!["USD/JPY", "USD/INR", "GBP/USD", "EUR/USD"]);
    }

    #[test]
    fn test_listings() {
        let analyzer = setup_analyzer();

        assert_eq!(
            analyzer.available_currency_pairs(),
            vec!["USD/INR", "EUR/USD", "USD/JPY", "GBP/USD"]
        );
        let currencies: Vec<String> = analyzer
            .available_currencies()
            .iter()
            .map(|c| c.code().to_string())
            .collect();
        assert_eq!(currencies, vec!["EUR", "GBP", "INR", "JPY", "USD"]);
        assert_eq!(analyzer.base_rates().len(), 5);
        assert_eq!(analyzer.quote("usd/inr").unwrap().price(), 83.0);
        assert!(analyzer.quote("USD/XYZ").is_none());
    }

    #[test]
    fn test_movements_and_signals() {
        let analyzer = setup_analyzer();

        let movements = analyzer.detect_significant_movements();
        let pairs: Vec<&str> = movements.iter().map(|m| m.pair.as_str()).collect();
        assert_eq!(pairs, vec!["EUR/USD", "USD/JPY"]);

        // USD/JPY: volatile, and up today against a down week.
        let signals = analyzer.identify_trading_opportunities();
        assert_eq!(signals.len(), 2);
        assert!(matches!(signals[0], TradingSignal::HighVolatility { .. }));
        assert!(matches!(signals[1], TradingSignal::Reversal { .. }));
    }

    #[test]
    fn test_arbitrage_signals_follow_quote_signals() {
        let analyzer = FxAnalyzer::with_quotes(
            AnalyzerConfig::default(),
            vec![
                quote("AAA/BBB", 2.0, 1.5, 0.0),
                quote("BBB/CCC", 3.0, 0.0, 0.0),
                quote("CCC/AAA", 0.20, 0.0, 0.0),
            ],
        );

        let signals = analyzer.identify_trading_opportunities();
        assert!(matches!(signals[0], TradingSignal::HighVolatility { .. }));
        assert!(signals[1..]
            .iter()
            .all(|s| matches!(s, TradingSignal::Arbitrage(_))));
        assert_eq!(signals[1].to_string().split(' ').nth(2), Some("AAA→BBB→CCC→AAA"));

        let scan = analyzer.find_arbitrage_opportunities();
        assert_eq!(scan.opportunities.len(), 3);
        assert_eq!(scan.triples_examined, 6);
    }

    #[test]
    fn test_analysis_report() {
        let config = AnalyzerConfig {
            report_top_n: 2,
            ..AnalyzerConfig::default()
        };
        let analyzer = FxAnalyzer::with_quotes(config, sample_quotes());
        let report = analyzer.analysis_report();

        assert_eq!(report.quote_count, 4);
        assert_eq!(report.top_performers.len(), 2);
        assert_eq!(report.top_performers[0].pair, "USD/JPY");
        assert_eq!(report.worst_performers[0].pair, "EUR/USD");
        assert_eq!(report.movements.len(), 2);
        assert_eq!(report.signals.len(), 2);
    }

    #[test]
    fn test_empty_analyzer() {
        let analyzer = FxAnalyzer::default();

        assert!(analyzer.is_empty());
        assert!(analyzer.top_performers(ChangeMetric::DayPercent, 5).is_empty());
        assert!(analyzer.available_currency_pairs().is_empty());
        assert!(analyzer.available_currencies().is_empty());
        assert!(analyzer.detect_significant_movements().is_empty());
        assert!(analyzer.identify_trading_opportunities().is_empty());
        assert_eq!(analyzer.exchange_rate(&Currency::usd(), &Currency::eur()), 0.0);

        let report = analyzer.analysis_report().to_string();
        assert!(report.contains("No significant movements detected."));
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let mut config = AnalyzerConfig::default();
        config.detector.volatility_threshold_pct = -1.0;
        assert!(matches!(FxAnalyzer::try_new(config), Err(FxError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_replaces_snapshot() {
        let analyzer = setup_analyzer();
        let before = analyzer.snapshot();

        let loaded = analyzer.load(vec![Quote::new("USD/CHF", 0.9)]);
        assert_eq!(loaded, 1);
        assert_eq!(analyzer.available_currency_pairs(), vec!["USD/CHF"]);
        assert_eq!(analyzer.exchange_rate(&Currency::usd(), &Currency::inr()), 0.0);

        // A view taken before the load is unaffected.
        assert_eq!(before.len(), 4);
        assert_eq!(before.resolver().rate(&Currency::usd(), &Currency::inr()), 83.0);
    }

    #[test]
    fn test_reload_from_source() {
        let analyzer = setup_analyzer();
        let source = StaticQuoteSource::new("fixture", vec![Quote::new("USD/CHF", 0.9)]);

        assert_eq!(analyzer.reload(&source).unwrap(), 1);
        assert_eq!(analyzer.available_currency_pairs(), vec!["USD/CHF"]);
    }

    #[test]
    fn test_failed_reload_keeps_previous_snapshot() {
        let analyzer = setup_analyzer();

        let failing = StaticQuoteSource::new("fixture", Vec::new());
        failing.fail_with("file vanished");
        assert!(matches!(analyzer.reload(&failing), Err(FxError::SourceError(_))));
        assert_eq!(analyzer.len(), 4);

        let empty = StaticQuoteSource::new("empty", Vec::new());
        assert!(matches!(analyzer.reload(&empty), Err(FxError::EmptyDataset(name)) if name == "empty"));
        assert_eq!(analyzer.len(), 4);
        assert_eq!(analyzer.exchange_rate(&Currency::usd(), &Currency::inr()), 83.0);
    }
}
