//! Error types for RateScope common types.

use thiserror::Error;

/// Errors produced when parsing a strict currency pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairError {
    /// The pair code has no `/` separator.
    #[error("Missing separator in pair code: {0}")]
    MissingSeparator(String),

    /// One side of the pair is empty.
    #[error("Empty currency in pair code: {0}")]
    EmptyCurrency(String),

    /// Base and quote are the same currency.
    #[error("Base and quote currency are identical in pair code: {0}")]
    SameCurrency(String),
}

/// Result type alias for pair parsing.
pub type Result<T> = std::result::Result<T, PairError>;
