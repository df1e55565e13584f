//! FX engine error types.

use ratescope_common::Currency;
use thiserror::Error;

/// Errors that can occur in the FX engine.
///
/// Analytics queries absorb failures with safe defaults; these errors surface
/// only through the `try_*` entry points and dataset reloads.
#[derive(Debug, Error)]
pub enum FxError {
    /// Neither a quote nor the base rate table connects the two currencies.
    #[error("No conversion path from {from} to {to}")]
    NoConversionPath { from: Currency, to: Currency },

    /// A quote source produced no records.
    #[error("Quote source {0} returned no records")]
    EmptyDataset(String),

    /// A quote source failed to produce records.
    #[error("Quote source error: {0}")]
    SourceError(String),

    /// Invalid engine configuration.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
