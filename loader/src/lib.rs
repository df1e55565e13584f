//! RateScope Loader
//!
//! Reads quote collections from the JSON and CSV files produced by the rate
//! scraper. Numeric cells are cleaned of `%` and thousands separators; missing
//! or unparseable values default to 0.0.
//!
//! [`QuoteFile`] implements [`ratescope_fx::QuoteSource`], so an analyzer can
//! reload straight from disk.

pub mod csv_reader;
pub mod error;
pub mod fields;
pub mod file;
pub mod json;

pub use csv_reader::read_csv;
pub use error::{LoadError, LoadResult};
pub use file::{load_quotes, FileFormat, QuoteFile};
pub use json::{parse_json, read_json};
