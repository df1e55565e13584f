//! Movement detection and trading-signal heuristics.
//!
//! Signals are informational only. Thresholds come from [`DetectorConfig`].

use ratescope_common::Quote;
use serde::Serialize;
use std::fmt;

use crate::arbitrage::ArbitrageOpportunity;
use crate::config::DetectorConfig;

/// Direction of a day move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn of(change: f64) -> Self {
        if change > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// A quote whose day change exceeded the movement threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movement {
    pub pair: String,
    pub direction: Direction,
    /// Absolute day change in percent.
    pub magnitude: f64,
    pub price: f64,
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {:.2}% to {:.4}",
            self.pair,
            self.direction.as_str().to_uppercase(),
            self.magnitude,
            self.price
        )
    }
}

/// An informational trading signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradingSignal {
    /// Large day move.
    HighVolatility { pair: String, magnitude: f64 },
    /// Day move against the weekly trend.
    Reversal {
        pair: String,
        day_change: f64,
        weekly_change: f64,
    },
    /// Profitable three-leg conversion loop.
    Arbitrage(ArbitrageOpportunity),
}

impl fmt::Display for TradingSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradingSignal::HighVolatility { pair, magnitude } => {
                write!(f, "High Volatility: {} moved {:.2}% today", pair, magnitude)
            }
            TradingSignal::Reversal {
                pair,
                day_change,
                weekly_change,
            } => write!(
                f,
                "Potential Reversal: {} is {} {:.2}% today, but {} {:.2}% this week",
                pair,
                Direction::of(*day_change).as_str(),
                day_change.abs(),
                Direction::of(*weekly_change).as_str(),
                weekly_change.abs()
            ),
            TradingSignal::Arbitrage(opportunity) => {
                write!(f, "Arbitrage Opportunity: {}", opportunity)
            }
        }
    }
}

/// Flags significant movements and per-quote trading signals.
#[derive(Debug, Clone, Default)]
pub struct MovementDetector {
    config: DetectorConfig,
}

impl MovementDetector {
    /// Create a detector with the given thresholds.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Quotes whose absolute day change exceeds the movement threshold,
    /// in input order.
    pub fn detect_movements(&self, quotes: &[Quote]) -> Vec<Movement> {
        quotes
            .iter()
            .filter(|q| q.percent_change().abs() > self.config.movement_threshold_pct)
            .map(|q| Movement {
                pair: q.pair_code().to_string(),
                direction: Direction::of(q.percent_change()),
                magnitude: q.percent_change().abs(),
                price: q.price(),
            })
            .collect()
    }

    /// High-volatility and reversal signals, per quote in input order.
    pub fn quote_signals(&self, quotes: &[Quote]) -> Vec<TradingSignal> {
        let mut signals = Vec::new();

        for quote in quotes {
            let day = quote.percent_change();
            let week = quote.weekly_change();

            if day.abs() > self.config.volatility_threshold_pct {
                signals.push(TradingSignal::HighVolatility {
                    pair: quote.pair_code().to_string(),
                    magnitude: day.abs(),
                });
            }

            if day * week < 0.0 && day.abs() > self.config.reversal_min_day_pct {
                signals.push(TradingSignal::Reversal {
                    pair: quote.pair_code().to_string(),
                    day_change: day,
                    weekly_change: week,
                });
            }
        }

        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratescope_common::QuoteChanges;

    fn quote(code: &str, price: f64, day_pct: f64, weekly_pct: f64) -> Quote {
        Quote::new(code, price).with_changes(QuoteChanges {
            day_pct,
            weekly_pct,
            ..QuoteChanges::default()
        })
    }

    #[test]
    fn test_detect_movements() {
        let detector = MovementDetector::default();
        let quotes = vec![
            quote("USD/INR", 83.0, 0.5, 0.0),
            quote("EUR/USD", 1.1, -0.75, 0.0),
            quote("USD/JPY", 150.0, 0.51, 0.0),
        ];

        let movements = detector.detect_movements(&quotes);
        assert_eq!(movements.len(), 2);

        assert_eq!(movements[0].pair, "EUR/USD");
        assert_eq!(movements[0].direction, Direction::Down);
        assert_eq!(movements[0].magnitude, 0.75);
        assert_eq!(movements[0].price, 1.1);
        assert_eq!(movements[0].to_string(), "EUR/USD: DOWN 0.75% to 1.1000");

        assert_eq!(movements[1].pair, "USD/JPY");
        assert_eq!(movements[1].direction, Direction::Up);
    }

    #[test]
    fn test_movement_threshold_is_configurable() {
        let detector = MovementDetector::new(DetectorConfig {
            movement_threshold_pct: 2.0,
            ..DetectorConfig::default()
        });
        let quotes = vec![quote("EUR/USD", 1.1, -1.5, 0.0), quote("USD/TRY", 32.0, 2.5, 0.0)];

        let movements = detector.detect_movements(&quotes);
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].pair, "USD/TRY");
    }

    #[test]
    fn test_high_volatility_signal() {
        let detector = MovementDetector::default();
        let signals = detector.quote_signals(&[quote("USD/TRY", 32.0, -1.25, -2.0)]);

        assert_eq!(
            signals,
            vec![TradingSignal::HighVolatility {
                pair: "USD/TRY".to_string(),
                magnitude: 1.25
            }]
        );
        assert_eq!(signals[0].to_string(), "High Volatility: USD/TRY moved 1.25% today");
    }

    #[test]
    fn test_reversal_signal() {
        let detector = MovementDetector::default();
        let signals = detector.quote_signals(&[
            quote("EUR/USD", 1.1, 0.6, -1.4),
            // Same sign: no reversal.
            quote("GBP/USD", 1.27, 0.6, 1.4),
            // Opposite sign but small day move.
            quote("USD/CHF", 0.9, -0.3, 2.0),
        ]);

        assert_eq!(signals.len(), 1);
        assert_eq!(
            signals[0].to_string(),
            "Potential Reversal: EUR/USD is up 0.60% today, but down 1.40% this week"
        );
    }

    #[test]
    fn test_signal_thresholds_are_strict() {
        let detector = MovementDetector::default();

        // Exactly 1.0% today with the week in the same direction: nothing.
        assert!(detector
            .quote_signals(&[quote("USD/TRY", 32.0, 1.0, 2.0)])
            .is_empty());
        let signals = detector.quote_signals(&[quote("USD/TRY", 32.0, 1.01, 2.0)]);
        assert!(matches!(signals[..], [TradingSignal::HighVolatility { .. }]));

        // Exactly 0.5% against the weekly trend: no reversal.
        assert!(detector
            .quote_signals(&[quote("EUR/USD", 1.1, 0.5, -1.4)])
            .is_empty());
        let signals = detector.quote_signals(&[quote("EUR/USD", 1.1, 0.51, -1.4)]);
        assert!(matches!(signals[..], [TradingSignal::Reversal { .. }]));
    }

    #[test]
    fn test_volatility_before_reversal_for_same_quote() {
        let detector = MovementDetector::default();
        let signals = detector.quote_signals(&[quote("USD/ZAR", 18.5, -1.8, 3.2)]);

        assert_eq!(signals.len(), 2);
        assert!(matches!(signals[0], TradingSignal::HighVolatility { .. }));
        assert!(matches!(signals[1], TradingSignal::Reversal { .. }));
    }

    #[test]
    fn test_empty_input() {
        let detector = MovementDetector::default();
        assert!(detector.detect_movements(&[]).is_empty());
        assert!(detector.quote_signals(&[]).is_empty());
    }

    #[test]
    fn test_signal_serialization() {
        let signal = TradingSignal::HighVolatility {
            pair: "USD/TRY".to_string(),
            magnitude: 1.25,
        };
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["kind"], "high_volatility");
        assert_eq!(json["pair"], "USD/TRY");
    }
}
