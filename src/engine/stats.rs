//! Descriptive statistics over classified columns.

use indexmap::IndexMap;
use serde::Serialize;

use super::classify::{Classification, ColumnScan, ColumnType};

/// Statistics of a numeric column, computed over parsed values only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

/// Profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,
    /// Non-null value count.
    pub total_values: usize,
    pub null_count: usize,
    pub data_type: ColumnType,
    /// Text column whose values are mostly dates.
    pub date_like: bool,
    /// Present only for numeric columns.
    #[serde(flatten)]
    pub stats: Option<NumericStats>,
}

/// Dataset-level summary; a fresh value per analysis call.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    /// Keyed by column name, in dataset column order.
    pub columns: IndexMap<String, ColumnProfile>,
}

/// Median of an already sorted slice.
///
/// Even lengths average the two central elements. `None` when empty.
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    Some(if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

/// Sorted working copy of `values`; the input is left untouched.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Compute min/max/mean/median/std over `values`. `None` when empty.
pub fn describe(values: &[f64]) -> Option<NumericStats> {
    let sorted = sorted_copy(values);
    let median = median_sorted(&sorted)?;
    let n = sorted.len() as f64;

    let mean = sorted.iter().sum::<f64>() / n;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(NumericStats {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean,
        median,
        std_dev: variance.sqrt(),
    })
}

/// Profile one classified column.
pub fn profile_column(scan: &ColumnScan) -> ColumnProfile {
    let stats = if scan.is_numeric() {
        describe(&scan.numeric_values())
    } else {
        None
    };

    ColumnProfile {
        name: scan.name.clone(),
        total_values: scan.non_null,
        null_count: scan.null_count(),
        data_type: scan.column_type,
        date_like: scan.date_like,
        stats,
    }
}

/// Summarize every column of a classification.
pub fn summarize(classification: &Classification) -> StatsSummary {
    let columns = classification
        .columns
        .iter()
        .map(|scan| (scan.name.clone(), profile_column(scan)))
        .collect();

    StatsSummary {
        total_rows: classification.total_rows,
        total_columns: classification.columns.len(),
        columns,
    }
}
