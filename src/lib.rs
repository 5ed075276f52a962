//! # sheet-lens
//!
//! Analysis engine for spreadsheet-style tabular data: rows arrive already
//! parsed (column name → scalar) and leave as column profiles, correlations,
//! trend labels, outlier flags or a filtered/sorted view.
//!
//! ## Modules
//!
//! - [`data`]: Dataset model, file loaders (CSV / JSON / Parquet), filter & sort
//! - [`engine`]: Column classifier, descriptive statistics, Pearson correlation,
//!   trend estimation, IQR outliers, summary insights
//! - [`service`]: `analyze` / `filter` request handlers with JSON wire shapes
//! - [`report`]: Terminal table rendering of a column summary
//! - [`config`]: Reporting limits
//! - [`error`]: Error types
//!
//! Every call is a pure function of its inputs; nothing is cached between
//! calls, so concurrent analyses need no coordination.
//!
//! ```
//! use serde_json::json;
//! use sheet_lens::data::model::Dataset;
//! use sheet_lens::engine::{classify, correlation_matrix};
//!
//! let data = json!([{"x": 1, "y": 2}, {"x": 2, "y": 4}, {"x": 3, "y": 6}]);
//! let dataset = Dataset::from_json(&data).unwrap();
//! let matrix = correlation_matrix(&classify(&dataset));
//!
//! assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
//! assert_eq!(matrix.get("x", "x"), Some(1.0));
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod report;
pub mod service;
