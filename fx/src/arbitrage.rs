//! Triangular arbitrage scanning.
//!
//! Every ordered triple of distinct currencies (A, B, C) is checked for
//! `rate(A,B) * rate(B,C) * rate(C,A)` above the configured minimum product.
//! The scan is O(k^3) in the number of currencies k. Pairwise rates are
//! resolved once into a dense k x k matrix before the triple loop, so each
//! triple costs three array reads.

use ratescope_common::Currency;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::config::DetectorConfig;
use crate::resolver::CrossRateResolver;
use crate::snapshot::QuoteSnapshot;

/// A profitable conversion loop A -> B -> C -> A.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageOpportunity {
    /// Loop rendered as `A→B→C→A`.
    pub path: String,
    /// The three currencies in loop order.
    pub currencies: [Currency; 3],
    /// Compounded rate around the loop.
    pub product: f64,
    /// Implied profit in percent, `(product - 1) * 100`.
    pub profit_pct: f64,
}

impl ArbitrageOpportunity {
    fn new(currencies: [Currency; 3], product: f64) -> Self {
        let [a, b, c] = &currencies;
        Self {
            path: format!("{}→{}→{}→{}", a, b, c, a),
            product,
            profit_pct: (product - 1.0) * 100.0,
            currencies,
        }
    }
}

impl fmt::Display for ArbitrageOpportunity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.6}% potential)", self.path, self.profit_pct)
    }
}

/// Result of one scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArbitrageScan {
    /// Opportunities in scan order (A, then B, then C by currency order).
    pub opportunities: Vec<ArbitrageOpportunity>,
    /// Ordered triples examined, always `k * (k - 1) * (k - 2)`.
    pub triples_examined: usize,
    /// Number of currencies scanned.
    pub currencies: usize,
}

/// Pairwise rates between the scanned currencies. Unavailable or
/// non-positive rates are stored as `None`.
struct RateMatrix {
    size: usize,
    rates: Vec<Option<f64>>,
}

impl RateMatrix {
    fn build(resolver: &CrossRateResolver<'_>, currencies: &[Currency]) -> Self {
        let size = currencies.len();
        let mut rates = vec![None; size * size];

        for (i, from) in currencies.iter().enumerate() {
            for (j, to) in currencies.iter().enumerate() {
                if i == j {
                    continue;
                }
                rates[i * size + j] = resolver
                    .resolve(from, to)
                    .map(|resolved| resolved.rate)
                    .filter(|rate| rate.is_finite() && *rate > 0.0);
            }
        }

        Self { size, rates }
    }

    fn get(&self, from: usize, to: usize) -> Option<f64> {
        self.rates[from * self.size + to]
    }
}

/// Scans a snapshot for triangular arbitrage.
#[derive(Debug, Clone)]
pub struct ArbitrageScanner {
    min_product: f64,
}

impl ArbitrageScanner {
    /// Create a scanner using the configured minimum profit.
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            min_product: config.arbitrage_min_product(),
        }
    }

    /// Scan all ordered triples of the snapshot's currencies.
    pub fn scan(&self, snapshot: &QuoteSnapshot) -> ArbitrageScan {
        let currencies = snapshot.currencies();
        let k = currencies.len();
        let matrix = RateMatrix::build(&snapshot.resolver(), currencies);

        let mut opportunities = Vec::new();
        let mut triples_examined = 0usize;

        for a in 0..k {
            for b in 0..k {
                if a == b {
                    continue;
                }
                for c in 0..k {
                    if c == a || c == b {
                        continue;
                    }
                    triples_examined += 1;

                    let (Some(ab), Some(bc), Some(ca)) =
                        (matrix.get(a, b), matrix.get(b, c), matrix.get(c, a))
                    else {
                        continue;
                    };

                    let product = ab * bc * ca;
                    if product.is_finite() && product > self.min_product {
                        opportunities.push(ArbitrageOpportunity::new(
                            [
                                currencies[a].clone(),
                                currencies[b].clone(),
                                currencies[c].clone(),
                            ],
                            product,
                        ));
                    }
                }
            }
        }

        debug!(
            currencies = k,
            triples_examined,
            opportunities = opportunities.len(),
            "Triangular arbitrage scan complete"
        );

        ArbitrageScan {
            opportunities,
            triples_examined,
            currencies: k,
        }
    }
}

impl Default for ArbitrageScanner {
    fn default() -> Self {
        Self::new(&DetectorConfig::default())
    }
}
