//! Analysis engine: pure functions from a dataset to derived reports.
//!
//! ```text
//!        Dataset
//!           │
//!           ▼
//!    ┌────────────┐
//!    │  classify   │  one scan per column, ColumnType assigned once
//!    └────────────┘
//!           │
//!     ┌─────┼──────────┬──────────┐
//!     ▼     ▼          ▼          ▼
//!  stats  correlation  trend    outlier
//!     │                           │
//!     └────────► insights ◄───────┘
//! ```
//!
//! Each component applies its own density threshold to the shared scans.

pub mod classify;
pub mod correlation;
pub mod insights;
pub mod outlier;
pub mod stats;
pub mod trend;

pub use classify::{classify, Classification, ColumnScan, ColumnType};
pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use insights::{generate_insights, Insight, InsightKind};
pub use outlier::{outlier_reports, OutlierReport};
pub use stats::{summarize, ColumnProfile, NumericStats, StatsSummary};
pub use trend::{trend_report, Trend, TrendReport};
