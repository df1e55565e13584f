//! Analyzer configuration.

/// Thresholds used by the movement and opportunity detectors.
/// All values are percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Absolute day change above which a quote counts as a significant movement.
    pub movement_threshold_pct: f64,
    /// Absolute day change above which a quote is flagged as highly volatile.
    pub volatility_threshold_pct: f64,
    /// Minimum absolute day change for a day/week reversal signal.
    pub reversal_min_day_pct: f64,
    /// Minimum implied profit for a triangular arbitrage opportunity.
    pub arbitrage_min_profit_pct: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            movement_threshold_pct: 0.5,
            volatility_threshold_pct: 1.0,
            reversal_min_day_pct: 0.5,
            arbitrage_min_profit_pct: 1.0,
        }
    }
}

impl DetectorConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        let thresholds = [
            ("movement threshold", self.movement_threshold_pct),
            ("volatility threshold", self.volatility_threshold_pct),
            ("reversal threshold", self.reversal_min_day_pct),
            ("arbitrage minimum profit", self.arbitrage_min_profit_pct),
        ];

        for (name, value) in thresholds {
            if !value.is_finite() {
                return Err(format!("{} must be finite", name));
            }
            if value < 0.0 {
                return Err(format!("{} cannot be negative", name));
            }
        }

        Ok(())
    }

    /// Minimum cycle product that counts as arbitrage, e.g. 1.01 for 1%.
    pub fn arbitrage_min_product(&self) -> f64 {
        1.0 + self.arbitrage_min_profit_pct / 100.0
    }
}

/// Main analyzer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Detector thresholds.
    pub detector: DetectorConfig,
    /// Number of top and worst performers in the analysis report.
    pub report_top_n: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            report_top_n: 5,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(value) = env_f64("RATESCOPE_MOVEMENT_THRESHOLD") {
            config.detector.movement_threshold_pct = value;
        }

        if let Some(value) = env_f64("RATESCOPE_VOLATILITY_THRESHOLD") {
            config.detector.volatility_threshold_pct = value;
        }

        if let Some(value) = env_f64("RATESCOPE_REVERSAL_THRESHOLD") {
            config.detector.reversal_min_day_pct = value;
        }

        if let Some(value) = env_f64("RATESCOPE_ARBITRAGE_MIN_PROFIT") {
            config.detector.arbitrage_min_profit_pct = value;
        }

        if let Ok(n) = std::env::var("RATESCOPE_REPORT_TOP_N") {
            if let Ok(n) = n.trim().parse() {
                config.report_top_n = n;
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.detector.validate()
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.detector.movement_threshold_pct, 0.5);
        assert_eq!(config.report_top_n, 5);
    }

    #[test]
    fn test_invalid_config() {
        let mut config = AnalyzerConfig::default();
        config.detector.movement_threshold_pct = -0.1;
        assert!(config.validate().is_err());

        let mut config = AnalyzerConfig::default();
        config.detector.arbitrage_min_profit_pct = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_arbitrage_min_product() {
        let config = DetectorConfig::default();
        assert!((config.arbitrage_min_product() - 1.01).abs() < 1e-12);
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("RATESCOPE_VOLATILITY_THRESHOLD", "2.5");
        std::env::set_var("RATESCOPE_REPORT_TOP_N", "not-a-number");

        let config = AnalyzerConfig::from_env();
        assert_eq!(config.detector.volatility_threshold_pct, 2.5);
        assert_eq!(config.report_top_n, 5);

        std::env::remove_var("RATESCOPE_VOLATILITY_THRESHOLD");
        std::env::remove_var("RATESCOPE_REPORT_TOP_N");
    }
}
