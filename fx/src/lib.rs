//! RateScope FX Engine
//!
//! Analytics over a snapshot of FX quotes: cross-rate resolution through a
//! derived USD base rate table, performance rankings, movement detection and
//! triangular arbitrage scanning.
//!
//! # Features
//!
//! - Atomic snapshot replacement on load and reload
//! - Cross rates from direct, inverse or USD-chained quotes
//! - Rankings by any change metric
//! - Movement, volatility, reversal and arbitrage signals
//!
//! # Example
//!
//! ```rust,ignore
//! use ratescope_fx::{AnalyzerConfig, FxAnalyzer};
//! use ratescope_common::{ChangeMetric, Currency, Quote};
//!
//! let analyzer = FxAnalyzer::with_quotes(
//!     AnalyzerConfig::default(),
//!     vec![Quote::new("USD/INR", 83.0), Quote::new("EUR/USD", 1.10)],
//! );
//!
//! // Cross rate through USD
//! let rate = analyzer.exchange_rate(&Currency::eur(), &Currency::inr());
//!
//! // Best performers of the day
//! let top = analyzer.top_performers(ChangeMetric::DayPercent, 5);
//! ```

pub mod arbitrage;
pub mod config;
pub mod conversion;
pub mod detector;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod rate_table;
pub mod report;
pub mod resolver;
pub mod snapshot;
pub mod source;

pub use arbitrage::{ArbitrageOpportunity, ArbitrageScan, ArbitrageScanner};
pub use config::{AnalyzerConfig, DetectorConfig};
pub use conversion::{Conversion, ConversionRequest};
pub use detector::{Direction, Movement, MovementDetector, TradingSignal};
pub use engine::FxAnalyzer;
pub use error::{FxError, FxResult};
pub use ranking::SortOrder;
pub use rate_table::BaseRateTable;
pub use report::{AnalysisReport, RankedPair};
pub use resolver::{CrossRateResolver, RateSource, ResolvedRate};
pub use snapshot::QuoteSnapshot;
pub use source::QuoteSource;

#[cfg(any(test, feature = "test-utils"))]
pub use source::StaticQuoteSource;
