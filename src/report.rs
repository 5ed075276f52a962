//! Plain-text rendering of a column summary for terminal output.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::engine::{Classification, ColumnProfile, NumericStats, StatsSummary};

fn stat_column(profiles: &[&ColumnProfile], f: impl Fn(&NumericStats) -> f64) -> Float64Array {
    profiles
        .iter()
        .map(|p| p.stats.as_ref().map(&f))
        .collect()
}

/// Render one line per column (in dataset order) as an ASCII table.
pub fn profile_table(classification: &Classification, summary: &StatsSummary) -> Result<String> {
    let profiles: Vec<&ColumnProfile> = classification
        .columns
        .iter()
        .filter_map(|scan| summary.columns.get(&scan.name))
        .collect();

    let schema = Arc::new(Schema::new(vec![
        Field::new("column", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("values", DataType::UInt64, false),
        Field::new("nulls", DataType::UInt64, false),
        Field::new("min", DataType::Float64, true),
        Field::new("max", DataType::Float64, true),
        Field::new("mean", DataType::Float64, true),
        Field::new("median", DataType::Float64, true),
        Field::new("std_dev", DataType::Float64, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(profiles.iter().map(|p| p.name.as_str()))),
        Arc::new(StringArray::from_iter_values(
            profiles.iter().map(|p| format!("{:?}", p.data_type).to_lowercase()),
        )),
        Arc::new(UInt64Array::from_iter_values(
            profiles.iter().map(|p| p.total_values as u64),
        )),
        Arc::new(UInt64Array::from_iter_values(
            profiles.iter().map(|p| p.null_count as u64),
        )),
        Arc::new(stat_column(&profiles, |s| s.min)),
        Arc::new(stat_column(&profiles, |s| s.max)),
        Arc::new(stat_column(&profiles, |s| s.mean)),
        Arc::new(stat_column(&profiles, |s| s.median)),
        Arc::new(stat_column(&profiles, |s| s.std_dev)),
    ];

    let batch = RecordBatch::try_new(schema, columns).context("building profile table")?;
    let table = pretty_format_batches(&[batch]).context("formatting profile table")?;
    Ok(format!(
        "{} rows, {} columns\n{table}",
        summary.total_rows, summary.total_columns
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;
    use crate::engine::{classify, summarize};
    use serde_json::json;

    #[test]
    fn renders_every_column() {
        let ds = Dataset::from_json(&json!([
            {"name": "Alice", "age": 25},
            {"name": "Bob", "age": 31},
        ]))
        .unwrap();
        let c = classify(&ds);
        let table = profile_table(&c, &summarize(&c)).unwrap();
        assert!(table.starts_with("2 rows, 2 columns"));
        assert!(table.contains("| name "));
        assert!(table.contains("numeric"));
        assert!(table.contains("28"));
    }
}
