//! Performance ranking by change metric.
//!
//! Sorting is stable: quotes with equal metric values keep their input order
//! in both directions.

use ratescope_common::{ChangeMetric, Quote};

/// Sort direction for a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Largest change first.
    Descending,
    /// Smallest change first.
    Ascending,
}

/// A copy of `quotes` sorted by `metric`.
pub fn rank(quotes: &[Quote], metric: ChangeMetric, order: SortOrder) -> Vec<Quote> {
    let mut ranked = quotes.to_vec();
    match order {
        SortOrder::Descending => ranked.sort_by(|a, b| {
            b.change_by_metric(metric)
                .total_cmp(&a.change_by_metric(metric))
        }),
        SortOrder::Ascending => ranked.sort_by(|a, b| {
            a.change_by_metric(metric)
                .total_cmp(&b.change_by_metric(metric))
        }),
    }
    ranked
}

/// The `n` quotes with the largest change, best first.
pub fn top_performers(quotes: &[Quote], metric: ChangeMetric, n: usize) -> Vec<Quote> {
    let mut ranked = rank(quotes, metric, SortOrder::Descending);
    ranked.truncate(n);
    ranked
}

/// The `n` quotes with the smallest change, worst first.
pub fn worst_performers(quotes: &[Quote], metric: ChangeMetric, n: usize) -> Vec<Quote> {
    let mut ranked = rank(quotes, metric, SortOrder::Ascending);
    ranked.truncate(n);
    ranked
}
