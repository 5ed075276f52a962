use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a spreadsheet row
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as it arrives from a parsed sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Typed date cell (e.g. a parquet `Date32`), kept as ISO-8601 text.
    Date(String),
    Null,
}

/// Shared stand-in for cells a row does not carry.
static MISSING: CellValue = CellValue::Null;

/// Formats accepted as "date-like" text.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Absent, null and empty-string cells all count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Interpret the cell as a finite number.
    ///
    /// Typed numbers pass through. Strings are read by their leading decimal
    /// literal, so `"45%"` and `"12 kg"` are numeric. Date-like strings,
    /// booleans and dates are never numeric.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Integer(i) => *i as f64,
            CellValue::Float(v) => *v,
            CellValue::String(s) if looks_like_date(s.trim()) => return None,
            CellValue::String(s) => leading_number(s)?,
            _ => return None,
        };
        v.is_finite().then_some(v)
    }

    /// The value if the cell is a typed number (not a numeric string).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Whether the cell holds a calendar date or timestamp.
    pub fn is_date_like(&self) -> bool {
        match self {
            CellValue::Date(_) => true,
            CellValue::String(s) => looks_like_date(s.trim()),
            _ => false,
        }
    }

    pub fn from_json(val: &JsonValue) -> Self {
        match val {
            JsonValue::String(s) => CellValue::String(s.clone()),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    CellValue::Float(f)
                } else {
                    CellValue::String(n.to_string())
                }
            }
            JsonValue::Bool(b) => CellValue::Bool(*b),
            JsonValue::Null => CellValue::Null,
            other => CellValue::String(other.to_string()),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            CellValue::String(s) | CellValue::Date(s) => JsonValue::String(s.clone()),
            CellValue::Integer(i) => JsonValue::from(*i),
            // Non-finite floats have no JSON form and serialize as null.
            CellValue::Float(v) => JsonValue::from(*v),
            CellValue::Bool(b) => JsonValue::Bool(*b),
            CellValue::Null => JsonValue::Null,
        }
    }
}

/// Longest leading decimal literal of `s` (sign, digits, fraction,
/// exponent), after leading whitespace. Trailing text is ignored.
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let is_digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    while is_digit(end) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let mut j = end + 1;
        while is_digit(j) {
            j += 1;
        }
        digits += j - end - 1;
        if digits > 0 {
            end = j;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while is_digit(j) {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse().ok()
}

fn looks_like_date(s: &str) -> bool {
    if s.len() < 8 {
        return false;
    }
    DateTime::parse_from_rfc3339(s).is_ok()
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
}

// ---------------------------------------------------------------------------
// Row / Dataset
// ---------------------------------------------------------------------------

/// One record of the sheet: column_name → value.
pub type Row = BTreeMap<String, CellValue>;

/// An ordered set of rows plus the column order taken from the first row.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub rows: Vec<Row>,
    /// Column names in source order.
    pub column_names: Vec<String>,
}

impl Dataset {
    pub fn new(column_names: Vec<String>, rows: Vec<Row>) -> Self {
        Dataset { rows, column_names }
    }

    /// Build a dataset from a JSON array of row objects.
    ///
    /// The column set comes from the first row's keys, in document order.
    pub fn from_json(root: &JsonValue) -> Result<Self, EngineError> {
        let records = root
            .as_array()
            .ok_or_else(|| EngineError::InvalidInput("dataset must be an array of rows".into()))?;

        let mut column_names = Vec::new();
        let mut rows = Vec::with_capacity(records.len());

        for (i, rec) in records.iter().enumerate() {
            let obj = rec.as_object().ok_or_else(|| {
                EngineError::InvalidInput(format!("row {i} is not an object"))
            })?;
            if i == 0 {
                column_names = obj.keys().cloned().collect();
            }
            let row: Row = obj
                .iter()
                .map(|(key, val)| (key.clone(), CellValue::from_json(val)))
                .collect();
            rows.push(row);
        }

        Ok(Dataset { rows, column_names })
    }

    /// Value of `column` in row `index`; absent keys read as missing.
    pub fn cell(&self, index: usize, column: &str) -> &CellValue {
        self.rows
            .get(index)
            .and_then(|row| row.get(column))
            .unwrap_or(&MISSING)
    }

    /// Serialize a row back to a JSON object, dataset columns first.
    pub fn row_to_json(&self, row: &Row) -> JsonValue {
        let mut obj = JsonMap::with_capacity(row.len());
        for col in &self.column_names {
            if let Some(val) = row.get(col) {
                obj.insert(col.clone(), val.to_json());
            }
        }
        for (col, val) in row {
            if !obj.contains_key(col) {
                obj.insert(col.clone(), val.to_json());
            }
        }
        JsonValue::Object(obj)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_cells() {
        assert!(CellValue::Null.is_missing());
        assert!(CellValue::String(String::new()).is_missing());
        assert!(!CellValue::String(" ".into()).is_missing());
        assert!(!CellValue::Integer(0).is_missing());
        assert!(!CellValue::Bool(false).is_missing());
    }

    #[test]
    fn numeric_parsing() {
        assert_eq!(CellValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(CellValue::String(" 2.5 ".into()).as_f64(), Some(2.5));
        assert_eq!(CellValue::String("1e3".into()).as_f64(), Some(1000.0));
        assert_eq!(CellValue::String("NaN".into()).as_f64(), None);
        assert_eq!(CellValue::String("inf".into()).as_f64(), None);
        assert_eq!(CellValue::String("1e999".into()).as_f64(), None);
        assert_eq!(CellValue::Bool(true).as_f64(), None);
        assert_eq!(CellValue::String("2024-01-05".into()).as_f64(), None);
    }

    #[test]
    fn numeric_prefix_with_trailing_units() {
        assert_eq!(CellValue::String("45%".into()).as_f64(), Some(45.0));
        assert_eq!(CellValue::String("12 kg".into()).as_f64(), Some(12.0));
        assert_eq!(CellValue::String(" 3.5 USD".into()).as_f64(), Some(3.5));
        assert_eq!(CellValue::String("12abc".into()).as_f64(), Some(12.0));
        assert_eq!(CellValue::String("-.5e2x".into()).as_f64(), Some(-50.0));
        assert_eq!(CellValue::String("7e".into()).as_f64(), Some(7.0));
        assert_eq!(CellValue::String("5.".into()).as_f64(), Some(5.0));
        assert_eq!(CellValue::String("abc12".into()).as_f64(), None);
        assert_eq!(CellValue::String("-".into()).as_f64(), None);
        assert_eq!(CellValue::String(".".into()).as_f64(), None);
        assert_eq!(CellValue::String("01/31/2024".into()).as_f64(), None);
    }

    #[test]
    fn typed_numbers_only() {
        assert_eq!(CellValue::Float(1.5).as_number(), Some(1.5));
        assert_eq!(CellValue::String("1.5".into()).as_number(), None);
    }

    #[test]
    fn date_detection() {
        assert!(CellValue::String("2024-01-05".into()).is_date_like());
        assert!(CellValue::String("2024/01/05".into()).is_date_like());
        assert!(CellValue::String("01/31/2024".into()).is_date_like());
        assert!(CellValue::String("2024-01-05T10:30:00Z".into()).is_date_like());
        assert!(CellValue::String("2024-01-05 10:30:00".into()).is_date_like());
        assert!(CellValue::Date("2024-01-05".into()).is_date_like());
        assert!(!CellValue::String("2024".into()).is_date_like());
        assert!(!CellValue::String("hello world".into()).is_date_like());
        assert!(!CellValue::Integer(20240105).is_date_like());
    }

    #[test]
    fn display_forms() {
        assert_eq!(CellValue::Float(3.0).to_string(), "3");
        assert_eq!(CellValue::Float(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Integer(-7).to_string(), "-7");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::Null.to_string(), "");
    }

    #[test]
    fn dataset_from_json_keeps_first_row_column_order() {
        let root = json!([
            {"zeta": 1, "alpha": "a", "mid": true},
            {"alpha": "b"}
        ]);
        let ds = Dataset::from_json(&root).unwrap();
        assert_eq!(ds.column_names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.cell(1, "zeta"), &CellValue::Null);
        assert_eq!(ds.cell(0, "mid"), &CellValue::Bool(true));
    }

    #[test]
    fn dataset_from_json_rejects_non_arrays() {
        assert!(matches!(
            Dataset::from_json(&json!({"a": 1})),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            Dataset::from_json(&json!([{"a": 1}, 5])),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn row_round_trips_through_json() {
        let root = json!([{"b": 2, "a": "x", "c": null}]);
        let ds = Dataset::from_json(&root).unwrap();
        let back = ds.row_to_json(&ds.rows[0]);
        assert_eq!(back, json!({"b": 2, "a": "x", "c": null}));
        let keys: Vec<&String> = back.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }
}
