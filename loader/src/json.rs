//! JSON quote reader.
//!
//! Two layouts are accepted: a top-level array of record objects, or a
//! scraper session document
//!
//! ```text
//! { "session_id": "...", "last_updated": "...",
//!   "data": { "<fetch time>": [ {record}, ... ], ... } }
//! ```
//!
//! from which only the most recent fetch is read.

use std::io::Read;

use ratescope_common::Quote;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{LoadError, LoadResult};
use crate::fields::QuoteRecord;

/// Read quotes from a JSON stream.
pub fn read_json<R: Read>(reader: R) -> LoadResult<Vec<Quote>> {
    let document: Value = serde_json::from_reader(reader)?;
    parse_document(document)
}

/// Read quotes from a JSON string.
pub fn parse_json(text: &str) -> LoadResult<Vec<Quote>> {
    let document: Value = serde_json::from_str(text)?;
    parse_document(document)
}

fn parse_document(document: Value) -> LoadResult<Vec<Quote>> {
    match document {
        Value::Array(records) => Ok(parse_records(records)),
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Object(fetches)) => Ok(latest_fetch(fetches)),
            _ => Err(LoadError::InvalidDocument(
                "expected an array of records or a session document with a \"data\" object"
                    .to_string(),
            )),
        },
        _ => Err(LoadError::InvalidDocument(
            "expected an array of records".to_string(),
        )),
    }
}

/// Records from the fetch with the largest key.
fn latest_fetch(fetches: Map<String, Value>) -> Vec<Quote> {
    let fetch_count = fetches.len();
    let latest = fetches.into_iter().max_by(|(a, _), (b, _)| a.cmp(b));

    match latest {
        Some((fetch_time, Value::Array(records))) => {
            debug!(fetch_time = %fetch_time, fetch_count, "Reading latest session fetch");
            parse_records(records)
        }
        Some((fetch_time, _)) => {
            warn!(fetch_time = %fetch_time, "Latest session fetch is not a record array");
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn parse_records(records: Vec<Value>) -> Vec<Quote> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            if !record.is_object() {
                warn!(index = idx, "Skipping non-object JSON record");
                return None;
            }
            match serde_json::from_value::<QuoteRecord>(record) {
                Ok(record) => Some(Quote::from(record)),
                Err(e) => {
                    warn!(index = idx, error = %e, "Skipping malformed JSON record");
                    None
                }
            }
        })
        .collect()
}
