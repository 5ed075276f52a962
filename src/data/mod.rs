/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Row>, column order from the first row
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  search / column match / sort → row indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
