//! Human-readable notes attached to a summary analysis.

use serde::Serialize;

use super::classify::Classification;
use super::outlier::detect_outliers;
use super::stats::StatsSummary;
use crate::config::AnalysisConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Info,
    Warning,
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Generate insights for a classified dataset and its summary.
///
/// Order: the large-dataset note, then per column (dataset order) the
/// missing-value warning, skew suggestion and outlier note.
pub fn generate_insights(
    classification: &Classification,
    summary: &StatsSummary,
    config: &AnalysisConfig,
) -> Vec<Insight> {
    let mut insights = Vec::new();
    let total_rows = classification.total_rows;

    if total_rows > config.large_dataset_rows {
        insights.push(Insight::new(
            InsightKind::Info,
            "Large dataset detected - consider data optimization",
        ));
    }

    for scan in &classification.columns {
        let null_count = scan.null_count();
        if null_count as f64 > total_rows as f64 * config.missing_warning_ratio {
            let pct = (null_count as f64 / total_rows as f64 * 100.0).round();
            insights.push(Insight::new(
                InsightKind::Warning,
                format!("Column '{}' has {pct}% missing values", scan.name),
            ));
        }

        let Some(stats) = summary
            .columns
            .get(&scan.name)
            .and_then(|profile| profile.stats.as_ref())
        else {
            continue;
        };

        let baseline = if stats.median == 0.0 { 1.0 } else { stats.median.abs() };
        if (stats.mean - stats.median).abs() / baseline > config.skew_ratio {
            insights.push(Insight::new(
                InsightKind::Suggestion,
                format!(
                    "{} appears skewed (mean differs from median). Consider log transform or review outliers.",
                    scan.name
                ),
            ));
        }

        if let Some(report) = detect_outliers(scan, config.insight_example_count) {
            if report.outlier_count > 0 {
                let examples: Vec<String> = report.examples.iter().map(f64::to_string).collect();
                insights.push(Insight::new(
                    InsightKind::Info,
                    format!(
                        "Found {} potential outliers in {} (examples: {}).",
                        report.outlier_count,
                        scan.name,
                        examples.join(", ")
                    ),
                ));
            }
        }
    }

    insights
}
