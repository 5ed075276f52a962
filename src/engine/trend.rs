//! Coarse trend direction per numeric column.
//!
//! Values are taken in row order, split into two halves by count and the
//! relative change between the half means is bucketed into a label.

use serde::Serialize;

use super::classify::{Classification, ColumnScan};

/// Minimum numeric density (numbers over non-null values) for a trend.
pub const TREND_NUMERIC_DENSITY: f64 = 0.7;

/// Columns whose non-null values are date-like beyond this share are
/// reported as date columns and get no trend.
pub const TREND_DATE_RATIO: f64 = 0.7;

/// Relative change beyond which a column is increasing / decreasing.
pub const TREND_CHANGE_THRESHOLD: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnTrend {
    pub column: String,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub date_columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub trends: Vec<ColumnTrend>,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Classify the direction of `values` (row order).
///
/// A zero first-half mean is decided by the sign of the second-half mean:
/// positive is increasing, negative is decreasing, zero is stable.
pub fn estimate_trend(values: &[f64]) -> Trend {
    if values.len() < 2 {
        return Trend::InsufficientData;
    }
    let (first, second) = values.split_at(values.len() / 2);
    let first_mean = mean(first);
    let second_mean = mean(second);

    if first_mean == 0.0 {
        return match second_mean.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Greater) => Trend::Increasing,
            Some(std::cmp::Ordering::Less) => Trend::Decreasing,
            _ => Trend::Stable,
        };
    }

    let change = (second_mean - first_mean) / first_mean;
    if change > TREND_CHANGE_THRESHOLD {
        Trend::Increasing
    } else if change < -TREND_CHANGE_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

fn is_date_column(scan: &ColumnScan) -> bool {
    scan.non_null > 0 && scan.date_density() > TREND_DATE_RATIO
}

fn is_trend_eligible(scan: &ColumnScan) -> bool {
    scan.non_null > 0 && scan.numeric_density() >= TREND_NUMERIC_DENSITY
}

/// Build the trend report for every qualifying column.
pub fn trend_report(classification: &Classification) -> TrendReport {
    let mut report = TrendReport::default();

    for scan in &classification.columns {
        if is_date_column(scan) {
            report.date_columns.push(scan.name.clone());
        } else if is_trend_eligible(scan) {
            report.numeric_columns.push(scan.name.clone());
            report.trends.push(ColumnTrend {
                column: scan.name.clone(),
                trend: estimate_trend(&scan.numeric_values()),
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;
    use crate::engine::classify::classify;
    use serde_json::json;

    #[test]
    fn step_up_is_increasing() {
        assert_eq!(estimate_trend(&[1.0, 1.0, 1.0, 10.0, 10.0, 10.0]), Trend::Increasing);
    }

    #[test]
    fn step_down_is_decreasing() {
        assert_eq!(estimate_trend(&[10.0, 10.0, 5.0, 5.0]), Trend::Decreasing);
    }

    #[test]
    fn small_change_is_stable() {
        // +10% exactly is not above the threshold.
        assert_eq!(estimate_trend(&[10.0, 11.0]), Trend::Stable);
        assert_eq!(estimate_trend(&[10.0, 10.5, 9.8, 10.2]), Trend::Stable);
    }

    #[test]
    fn odd_length_gives_first_half_the_smaller_share() {
        // first = [2], second = [2, 20] -> mean 11 -> increasing
        assert_eq!(estimate_trend(&[2.0, 2.0, 20.0]), Trend::Increasing);
    }

    #[test]
    fn too_few_values() {
        assert_eq!(estimate_trend(&[]), Trend::InsufficientData);
        assert_eq!(estimate_trend(&[4.0]), Trend::InsufficientData);
    }

    #[test]
    fn zero_baseline() {
        assert_eq!(estimate_trend(&[0.0, 0.0, 3.0, 4.0]), Trend::Increasing);
        assert_eq!(estimate_trend(&[0.0, 0.0, -3.0, -4.0]), Trend::Decreasing);
        assert_eq!(estimate_trend(&[0.0, 0.0, 0.0, 0.0]), Trend::Stable);
        assert_eq!(estimate_trend(&[-1.0, 1.0, 2.0, 2.0]), Trend::Increasing);
    }

    #[test]
    fn report_splits_date_and_numeric_columns() {
        let ds = Dataset::from_json(&json!([
            {"day": "2024-01-01", "sales": 1, "name": "a", "sparse": 1},
            {"day": "2024-01-02", "sales": 1, "name": "b", "sparse": "x"},
            {"day": "2024-01-03", "sales": 9, "name": "c", "sparse": "y"},
            {"day": "2024-01-04", "sales": 9, "name": "d", "sparse": 2},
        ]))
        .unwrap();
        let report = trend_report(&classify(&ds));
        assert_eq!(report.date_columns, vec!["day"]);
        assert_eq!(report.numeric_columns, vec!["sales"]);
        assert_eq!(
            report.trends,
            vec![ColumnTrend { column: "sales".into(), trend: Trend::Increasing }]
        );
    }

    #[test]
    fn single_value_column_is_insufficient() {
        let ds = Dataset::from_json(&json!([{"v": 5}, {"v": null}, {"v": ""}])).unwrap();
        let report = trend_report(&classify(&ds));
        assert_eq!(report.trends[0].trend, Trend::InsufficientData);
    }

    #[test]
    fn trend_label_wire_form() {
        let v = serde_json::to_value(Trend::InsufficientData).unwrap();
        assert_eq!(v, json!("insufficient_data"));
    }
}
