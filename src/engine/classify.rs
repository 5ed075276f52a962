//! Column classification.
//!
//! A single pass over each column records which cells are present, which
//! parse as numbers and which look like dates. The resulting [`ColumnScan`]s
//! carry an explicit [`ColumnType`] plus a date-like flag and are handed to
//! every downstream component, so no component re-inspects raw cells.

use log::debug;
use serde::Serialize;

use crate::data::model::Dataset;

/// A column is numeric when strictly more than this share of its non-null
/// values parse as numbers.
pub const NUMERIC_TYPE_RATIO: f64 = 0.5;

/// A text column is flagged date-like when strictly more than this share of
/// its non-null values parse as dates.
pub const DATE_TYPE_RATIO: f64 = 0.5;

/// Column type assigned once by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Text,
}

/// Per-column scan result.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnScan {
    pub name: String,
    /// Total rows in the dataset.
    pub total_rows: usize,
    /// Rows with a present, non-empty value.
    pub non_null: usize,
    /// Parsed number per row (`None` when missing or unparseable).
    pub numeric: Vec<Option<f64>>,
    pub numeric_count: usize,
    pub date_count: usize,
    pub column_type: ColumnType,
    /// Text column whose values are mostly dates.
    pub date_like: bool,
}

impl ColumnScan {
    pub fn null_count(&self) -> usize {
        self.total_rows - self.non_null
    }

    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }

    /// Parsed numbers in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.numeric.iter().flatten().copied().collect()
    }

    /// Numbers over non-null values; 0 for an all-null column.
    pub fn numeric_density(&self) -> f64 {
        ratio(self.numeric_count, self.non_null)
    }

    /// Numbers over all rows.
    pub fn numeric_row_ratio(&self) -> f64 {
        ratio(self.numeric_count, self.total_rows)
    }

    /// Date-like values over non-null values.
    pub fn date_density(&self) -> f64 {
        ratio(self.date_count, self.non_null)
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Classified view of a whole dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub total_rows: usize,
    /// One scan per column, in dataset column order.
    pub columns: Vec<ColumnScan>,
}

impl Classification {
    pub fn column(&self, name: &str) -> Option<&ColumnScan> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Scans classified as numeric.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &ColumnScan> {
        self.columns.iter().filter(|c| c.is_numeric())
    }
}

/// Classify every column of the dataset.
///
/// An empty dataset yields an empty classification.
pub fn classify(dataset: &Dataset) -> Classification {
    let columns: Vec<ColumnScan> = dataset
        .column_names
        .iter()
        .map(|name| classify_column(dataset, name))
        .collect();

    debug!(
        "classified {} columns over {} rows",
        columns.len(),
        dataset.len()
    );

    Classification {
        total_rows: dataset.len(),
        columns,
    }
}

/// Scan a single column.
pub fn classify_column(dataset: &Dataset, name: &str) -> ColumnScan {
    let total_rows = dataset.len();
    let mut numeric = Vec::with_capacity(total_rows);
    let mut non_null = 0;
    let mut numeric_count = 0;
    let mut date_count = 0;

    for index in 0..total_rows {
        let cell = dataset.cell(index, name);
        if cell.is_missing() {
            numeric.push(None);
            continue;
        }
        non_null += 1;

        let parsed = cell.as_f64();
        if parsed.is_some() {
            numeric_count += 1;
        } else if cell.is_date_like() {
            date_count += 1;
        }
        numeric.push(parsed);
    }

    let column_type = if numeric_count as f64 > non_null as f64 * NUMERIC_TYPE_RATIO {
        ColumnType::Numeric
    } else {
        ColumnType::Text
    };
    let date_like = column_type == ColumnType::Text
        && date_count as f64 > non_null as f64 * DATE_TYPE_RATIO;

    ColumnScan {
        name: name.to_string(),
        total_rows,
        non_null,
        numeric,
        numeric_count,
        date_count,
        column_type,
        date_like,
    }
}
