//! Pairwise Pearson correlation across numeric columns.
//!
//! Column eligibility here is stricter than the summary's numeric type:
//! a column joins the matrix only when most rows carry a parseable number.

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use super::classify::{Classification, ColumnScan};

/// Minimum share of all rows that must parse as numbers.
pub const CORRELATION_NUMERIC_RATIO: f64 = 0.8;

/// Fewer row-aligned pairs than this yield a coefficient of 0.
const MIN_PAIRS: usize = 2;

/// Off-diagonal Pearson coefficients, stored in both directions.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationMatrix {
    /// Eligible columns in dataset order.
    pub numeric_columns: Vec<String>,
    /// colA → colB → r, for colA ≠ colB, both levels in dataset order.
    pub correlations: IndexMap<String, IndexMap<String, f64>>,
}

impl CorrelationMatrix {
    /// Coefficient for `(a, b)`; `Some(1.0)` on the diagonal of an eligible column.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return self.numeric_columns.iter().any(|c| c == a).then_some(1.0);
        }
        self.correlations.get(a)?.get(b).copied()
    }
}

/// Pearson coefficient of `(a, b)` pairs.
///
/// Returns 0 for fewer than two pairs or when either side has no variance.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < MIN_PAIRS {
        return 0.0;
    }
    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut num = 0.0;
    let mut den_a = 0.0;
    let mut den_b = 0.0;
    for (a, b) in pairs {
        let da = a - mean_a;
        let db = b - mean_b;
        num += da * db;
        den_a += da * da;
        den_b += db * db;
    }

    let den = den_a * den_b;
    if den == 0.0 {
        return 0.0;
    }
    (num / den.sqrt()).clamp(-1.0, 1.0)
}

/// Row-aligned pairs where both columns parse; other rows are dropped.
fn aligned_pairs(a: &ColumnScan, b: &ColumnScan) -> Vec<(f64, f64)> {
    a.numeric
        .iter()
        .zip(&b.numeric)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect()
}

/// Whether a column is dense enough to correlate.
pub fn is_correlation_eligible(scan: &ColumnScan) -> bool {
    scan.total_rows > 0 && scan.numeric_row_ratio() >= CORRELATION_NUMERIC_RATIO
}

/// Correlate every ordered pair of eligible columns.
pub fn correlation_matrix(classification: &Classification) -> CorrelationMatrix {
    let eligible: Vec<&ColumnScan> = classification
        .columns
        .iter()
        .filter(|scan| is_correlation_eligible(scan))
        .collect();

    let mut correlations = IndexMap::new();
    for a in &eligible {
        let row: IndexMap<String, f64> = eligible
            .iter()
            .filter(|b| b.name != a.name)
            .map(|b| (b.name.clone(), pearson(&aligned_pairs(a, b))))
            .collect();
        correlations.insert(a.name.clone(), row);
    }

    debug!(
        "correlated {} numeric columns ({} pairs)",
        eligible.len(),
        eligible.len() * eligible.len().saturating_sub(1)
    );

    CorrelationMatrix {
        numeric_columns: eligible.iter().map(|s| s.name.clone()).collect(),
        correlations,
    }
}
