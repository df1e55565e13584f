//! CSV quote reader.
//!
//! The first row names the columns. Cells are trimmed; rows shorter than the
//! header are padded with empty cells.

use std::collections::HashMap;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use ratescope_common::Quote;
use tracing::warn;

use crate::error::LoadResult;
use crate::fields::quote_from_fields;

/// Read quotes from a CSV stream.
pub fn read_csv<R: Read>(reader: R) -> LoadResult<Vec<Quote>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = column_index(&headers);

    let mut quotes = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;

        if record.len() != headers.len() {
            warn!(
                row = row + 1,
                values = record.len(),
                expected = headers.len(),
                "CSV row length does not match header"
            );
        }

        quotes.push(quote_from_fields(|name| {
            columns
                .get(name)
                .map(|&idx| record.get(idx).unwrap_or_default().to_string())
        }));
    }

    Ok(quotes)
}

/// Column name to index. The first column with a given name wins.
fn column_index(headers: &StringRecord) -> HashMap<String, usize> {
    let mut columns = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        columns.entry(name.to_string()).or_insert(idx);
    }
    columns
}
