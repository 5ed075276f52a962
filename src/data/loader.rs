use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type,
    UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset, Row};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with column names, one record per line
/// * `.json`    – `[{ "col": value, ... }, ...]` (records orientation)
/// * `.parquet` – flat columns of strings, numbers, booleans or dates
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::info!(
        "loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.column_names.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, as produced by most sheet exporters):
///
/// ```json
/// [
///   { "Name": "Alice", "Age": 25, "Department": "HR" },
///   { "Name": "Bob",   "Age": 30, "Department": "Finance" }
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    Ok(Dataset::from_json(&root)?)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every other row a record.
/// Cell types are guessed per cell; empty cells are missing.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();

        rows.push(row);
    }

    Ok(Dataset::new(headers, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() {
            return CellValue::Float(f);
        }
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file, one row per record, one cell per column.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Nested columns are rendered as text.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for row in 0..batch.num_rows() {
            let mut cells = Row::new();
            for (col_idx, col_name) in column_names.iter().enumerate() {
                let value = extract_cell(batch.column(col_idx), row)
                    .with_context(|| format!("Row {row}: failed to read '{col_name}'"))?;
                cells.insert(col_name.clone(), value);
            }
            rows.push(cells);
        }
    }

    Ok(Dataset::new(column_names, rows))
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row).into()),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row).into()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row).into()),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => CellValue::Integer(col.as_primitive::<UInt8Type>().value(row).into()),
        DataType::UInt16 => CellValue::Integer(col.as_primitive::<UInt16Type>().value(row).into()),
        DataType::UInt32 => CellValue::Integer(col.as_primitive::<UInt32Type>().value(row).into()),
        DataType::UInt64 => {
            let v = col.as_primitive::<UInt64Type>().value(row);
            match i64::try_from(v) {
                Ok(i) => CellValue::Integer(i),
                Err(_) => CellValue::Float(v as f64),
            }
        }
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row).into()),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Date32 => match col.as_primitive::<Date32Type>().value_as_date(row) {
            Some(date) => CellValue::Date(date.format("%Y-%m-%d").to_string()),
            None => CellValue::Null,
        },
        DataType::Timestamp(_, _) | DataType::Date64 => {
            CellValue::Date(array_value_to_string(col, row).context("formatting temporal value")?)
        }
        _ => CellValue::String(array_value_to_string(col, row).context("formatting value")?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::{BooleanArray, Date32Array, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_guesses_cell_types() {
        let file = temp_file(".csv", "Name,Age,Score,Active\nAlice,25,1.5,true\nBob,,x,false\n");
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.column_names, vec!["Name", "Age", "Score", "Active"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.cell(0, "Age"), &CellValue::Integer(25));
        assert_eq!(ds.cell(0, "Score"), &CellValue::Float(1.5));
        assert_eq!(ds.cell(0, "Active"), &CellValue::Bool(true));
        assert_eq!(ds.cell(1, "Age"), &CellValue::Null);
        assert_eq!(ds.cell(1, "Score"), &CellValue::String("x".into()));
    }

    #[test]
    fn csv_short_records_leave_cells_missing() {
        let file = temp_file(".csv", "a,b,c\n1,2\n");
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.cell(0, "b"), &CellValue::Integer(2));
        assert_eq!(ds.cell(0, "c"), &CellValue::Null);
    }

    #[test]
    fn json_records() {
        let file = temp_file(".json", r#"[{"Name": "Alice", "Age": 25}, {"Name": "Bob"}]"#);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.column_names, vec!["Name", "Age"]);
        assert_eq!(ds.cell(1, "Age"), &CellValue::Null);
    }

    #[test]
    fn json_must_be_an_array() {
        let file = temp_file(".json", r#"{"Name": "Alice"}"#);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn unsupported_extension() {
        let file = temp_file(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn parquet_columns_become_cells() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("name", DataType::Utf8, false),
            Field::new("units", DataType::Int64, true),
            Field::new("price", DataType::Float64, false),
            Field::new("active", DataType::Boolean, false),
            Field::new("day", DataType::Date32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["a", "b"])),
                Arc::new(Int64Array::from(vec![Some(3), None])),
                Arc::new(Float64Array::from(vec![1.25, 2.5])),
                Arc::new(BooleanArray::from(vec![true, false])),
                // 19723 days after the epoch = 2024-01-01
                Arc::new(Date32Array::from(vec![19723, 19724])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.column_names, vec!["name", "units", "price", "active", "day"]);
        assert_eq!(ds.cell(0, "name"), &CellValue::String("a".into()));
        assert_eq!(ds.cell(0, "units"), &CellValue::Integer(3));
        assert_eq!(ds.cell(1, "units"), &CellValue::Null);
        assert_eq!(ds.cell(1, "price"), &CellValue::Float(2.5));
        assert_eq!(ds.cell(1, "active"), &CellValue::Bool(false));
        assert_eq!(ds.cell(0, "day"), &CellValue::Date("2024-01-01".into()));
    }
}
