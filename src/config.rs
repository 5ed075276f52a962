//! Tunable reporting knobs for analysis runs.
//!
//! Column density thresholds are fixed per component and live next to the
//! code that applies them; only presentation limits are configurable here.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Reporting configuration, loadable from a JSON file.
///
/// Every field is optional in the file; absent ones take the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Maximum flagged values kept per column in an outlier report.
    pub outlier_example_limit: usize,
    /// Flagged values quoted in an outlier insight message.
    pub insight_example_count: usize,
    /// Row count above which the "large dataset" note is emitted.
    pub large_dataset_rows: usize,
    /// Null share above which a column gets a missing-values warning.
    pub missing_warning_ratio: f64,
    /// Relative |mean - median| gap above which a column is called skewed.
    pub skew_ratio: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            outlier_example_limit: 5,
            insight_example_count: 3,
            large_dataset_rows: 1000,
            missing_warning_ratio: 0.10,
            skew_ratio: 0.25,
        }
    }
}

impl AnalysisConfig {
    /// Read a config file, falling back to defaults for absent keys.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: AnalysisConfig =
            serde_json::from_str(&text).context("parsing config JSON")?;
        log::debug!("loaded analysis config from {}: {config:?}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"outlierExampleLimit": 10}}"#).unwrap();

        let config = AnalysisConfig::from_path(file.path()).unwrap();
        assert_eq!(config.outlier_example_limit, 10);
        assert_eq!(config.large_dataset_rows, 1000);
        assert!((config.missing_warning_ratio - 0.10).abs() < 1e-12);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AnalysisConfig::from_path(Path::new("/nonexistent/sheet-lens.json"));
        assert!(err.is_err());
    }
}
