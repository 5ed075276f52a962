//! Univariate IQR outlier flagging.

use serde::Serialize;

use super::classify::{Classification, ColumnScan};
use super::stats::sorted_copy;

/// Fence width in IQRs beyond Q1/Q3.
pub const IQR_FENCE_FACTOR: f64 = 1.5;

/// Nearest-rank quartiles and the fences derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fences {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
}

impl Fences {
    /// Whether `v` lies outside the fences. Never true when IQR is 0.
    pub fn is_outlier(&self, v: f64) -> bool {
        self.iqr > 0.0 && (v < self.lower_fence || v > self.upper_fence)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierReport {
    pub column: String,
    #[serde(flatten)]
    pub fences: Fences,
    /// Total flagged values in the column.
    pub outlier_count: usize,
    /// Smallest flagged values in ascending order, truncated to the example limit.
    pub examples: Vec<f64>,
}

/// Quartiles at indices `floor(n * 0.25)` and `floor(n * 0.75)` of the sorted
/// values, no interpolation. `None` when there are no values.
pub fn iqr_fences(values: &[f64]) -> Option<Fences> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted_copy(values);
    let n = sorted.len() as f64;
    let q1 = sorted[(n * 0.25).floor() as usize];
    let q3 = sorted[(n * 0.75).floor() as usize];
    let iqr = q3 - q1;

    Some(Fences {
        q1,
        q3,
        iqr,
        lower_fence: q1 - IQR_FENCE_FACTOR * iqr,
        upper_fence: q3 + IQR_FENCE_FACTOR * iqr,
    })
}

/// Flag outliers in one numeric column.
pub fn detect_outliers(scan: &ColumnScan, example_limit: usize) -> Option<OutlierReport> {
    let sorted = sorted_copy(&scan.numeric_values());
    let fences = iqr_fences(&sorted)?;

    let flagged: Vec<f64> = sorted.into_iter().filter(|v| fences.is_outlier(*v)).collect();
    let outlier_count = flagged.len();
    let examples = flagged.into_iter().take(example_limit).collect();

    Some(OutlierReport {
        column: scan.name.clone(),
        fences,
        outlier_count,
        examples,
    })
}

/// Outlier reports for every numeric column with at least one value.
pub fn outlier_reports(classification: &Classification, example_limit: usize) -> Vec<OutlierReport> {
    classification
        .numeric_columns()
        .filter_map(|scan| detect_outliers(scan, example_limit))
        .collect()
}
