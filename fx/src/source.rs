//! Quote source trait and implementations.

use ratescope_common::Quote;

use crate::error::FxResult;

/// Trait for anything that can produce a full quote collection.
pub trait QuoteSource: Send + Sync {
    /// Get the source name, used in logs and errors.
    fn name(&self) -> &str;

    /// Fetch a complete quote collection.
    fn fetch(&self) -> FxResult<Vec<Quote>>;
}

/// Fixed in-memory quote source for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct StaticQuoteSource {
    name: String,
    quotes: parking_lot::Mutex<Vec<Quote>>,
    failure: parking_lot::Mutex<Option<String>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl StaticQuoteSource {
    /// Create a new static source.
    pub fn new(name: impl Into<String>, quotes: Vec<Quote>) -> Self {
        Self {
            name: name.into(),
            quotes: parking_lot::Mutex::new(quotes),
            failure: parking_lot::Mutex::new(None),
        }
    }

    /// Replace the quotes returned by the next fetch.
    pub fn set_quotes(&self, quotes: Vec<Quote>) {
        *self.quotes.lock() = quotes;
    }

    /// Make every fetch fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl QuoteSource for StaticQuoteSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> FxResult<Vec<Quote>> {
        if let Some(message) = self.failure.lock().clone() {
            return Err(crate::error::FxError::SourceError(message));
        }
        Ok(self.quotes.lock().clone())
    }
}
