//! Request/response layer over the engine.
//!
//! Requests arrive as JSON documents (`{"data": [...], "analysisType": ...}`
//! or `{"data": [...], "filters": {...}}`) and are answered with
//! `{"success": true, ...}` bodies, or an error body and a 400 status when
//! the dataset is absent or malformed.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::config::AnalysisConfig;
use crate::data::filter::{filter_rows, FilterSpec};
use crate::data::model::Dataset;
use crate::engine::{
    classify, correlation_matrix, generate_insights, outlier_reports, summarize, trend_report,
    CorrelationMatrix, Insight, OutlierReport, StatsSummary, TrendReport,
};
use crate::error::{EngineError, EngineResult};

/// Which analysis to run. Unknown names fall back to [`AnalysisType::Stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    Summary,
    Correlation,
    Trends,
    Outliers,
    Stats,
}

impl AnalysisType {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("summary") => AnalysisType::Summary,
            Some("correlation") => AnalysisType::Correlation,
            Some("trends") => AnalysisType::Trends,
            Some("outliers") => AnalysisType::Outliers,
            _ => AnalysisType::Stats,
        }
    }
}

/// Summary plus generated insights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryAnalysis {
    #[serde(flatten)]
    pub summary: StatsSummary,
    pub insights: Vec<Insight>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierAnalysis {
    pub outliers: Vec<OutlierReport>,
}

/// Result of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    Summary(SummaryAnalysis),
    Correlation(CorrelationMatrix),
    Trends(TrendReport),
    Outliers(OutlierAnalysis),
    Stats(StatsSummary),
}

/// Run one analysis over the full dataset.
pub fn analyze(dataset: &Dataset, kind: AnalysisType, config: &AnalysisConfig) -> Analysis {
    let classification = classify(dataset);
    log::debug!("running {kind:?} analysis over {} rows", dataset.len());

    match kind {
        AnalysisType::Summary => {
            let summary = summarize(&classification);
            let insights = generate_insights(&classification, &summary, config);
            Analysis::Summary(SummaryAnalysis { summary, insights })
        }
        AnalysisType::Correlation => Analysis::Correlation(correlation_matrix(&classification)),
        AnalysisType::Trends => Analysis::Trends(trend_report(&classification)),
        AnalysisType::Outliers => Analysis::Outliers(OutlierAnalysis {
            outliers: outlier_reports(&classification, config.outlier_example_limit),
        }),
        AnalysisType::Stats => Analysis::Stats(summarize(&classification)),
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub data: Option<JsonValue>,
    pub analysis_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterRequest {
    pub data: Option<JsonValue>,
    #[serde(default)]
    pub filters: FilterSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResponse {
    pub success: bool,
    pub data: Vec<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl From<&EngineError> for ErrorResponse {
    fn from(err: &EngineError) -> Self {
        ErrorResponse {
            success: false,
            error: err.to_string(),
        }
    }
}

fn dataset_from(data: Option<&JsonValue>) -> EngineResult<Dataset> {
    match data {
        None | Some(JsonValue::Null) => {
            Err(EngineError::InvalidInput("dataset is missing".into()))
        }
        Some(root) => Dataset::from_json(root),
    }
}

pub fn handle_analyze(
    request: &AnalyzeRequest,
    config: &AnalysisConfig,
) -> EngineResult<AnalyzeResponse> {
    let dataset = dataset_from(request.data.as_ref())?;
    let kind = AnalysisType::from_name(request.analysis_type.as_deref());
    Ok(AnalyzeResponse {
        success: true,
        analysis: analyze(&dataset, kind, config),
    })
}

pub fn handle_filter(request: &FilterRequest) -> EngineResult<FilterResponse> {
    let dataset = dataset_from(request.data.as_ref())?;
    let data = filter_rows(&dataset, &request.filters)
        .into_iter()
        .map(|row| dataset.row_to_json(row))
        .collect();
    Ok(FilterResponse {
        success: true,
        data,
    })
}

/// Collapse a handler result into `(status, body)`.
pub fn respond<T: Serialize>(result: EngineResult<T>) -> (u16, JsonValue) {
    let rendered = match &result {
        Ok(body) => serde_json::to_value(body).map(|v| (200, v)),
        Err(err) => {
            log::warn!("rejecting request: {err}");
            serde_json::to_value(ErrorResponse::from(err)).map(|v| (err.status_code(), v))
        }
    };
    rendered.unwrap_or_else(|e| {
        log::error!("failed to serialize response: {e}");
        (
            500,
            serde_json::json!({"success": false, "error": "internal serialization error"}),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analyze_json(body: JsonValue) -> (u16, JsonValue) {
        let request: AnalyzeRequest = serde_json::from_value(body).unwrap();
        respond(handle_analyze(&request, &AnalysisConfig::default()))
    }

    fn filter_json(body: JsonValue) -> (u16, JsonValue) {
        let request: FilterRequest = serde_json::from_value(body).unwrap();
        respond(handle_filter(&request))
    }

    #[test]
    fn analysis_type_names() {
        assert_eq!(AnalysisType::from_name(Some("summary")), AnalysisType::Summary);
        assert_eq!(AnalysisType::from_name(Some("trends")), AnalysisType::Trends);
        assert_eq!(AnalysisType::from_name(Some("bogus")), AnalysisType::Stats);
        assert_eq!(AnalysisType::from_name(None), AnalysisType::Stats);
    }

    #[test]
    fn summary_includes_insights() {
        let (status, body) = analyze_json(json!({
            "data": [{"a": 1, "b": null}, {"a": 2, "b": "x"}],
            "analysisType": "summary"
        }));
        assert_eq!(status, 200);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["analysis"]["totalRows"], json!(2));
        assert_eq!(body["analysis"]["columns"]["a"]["mean"], json!(1.5));
        assert_eq!(
            body["analysis"]["insights"][0]["message"],
            json!("Column 'b' has 50% missing values")
        );
    }

    #[test]
    fn default_type_is_plain_stats() {
        let (_, body) = analyze_json(json!({"data": [{"a": 1}], "analysisType": "whatever"}));
        assert!(body["analysis"].get("insights").is_none());
        assert_eq!(body["analysis"]["totalColumns"], json!(1));
    }

    #[test]
    fn correlation_and_trends() {
        let data = json!([{"x": 1, "y": 2}, {"x": 2, "y": 4}, {"x": 3, "y": 6}]);
        let (_, body) = analyze_json(json!({"data": data, "analysisType": "correlation"}));
        assert_eq!(body["analysis"]["correlations"]["x"]["y"], json!(1.0));

        let (_, body) = analyze_json(json!({"data": data, "analysisType": "trends"}));
        assert_eq!(body["analysis"]["trends"][0], json!({"column": "x", "trend": "increasing"}));
    }

    #[test]
    fn outliers_analysis() {
        let data = json!([{"v": 1}, {"v": 2}, {"v": 3}, {"v": 4}, {"v": 100}]);
        let (_, body) = analyze_json(json!({"data": data, "analysisType": "outliers"}));
        assert_eq!(body["analysis"]["outliers"][0]["examples"], json!([100.0]));
    }

    #[test]
    fn empty_dataset_is_an_empty_summary() {
        let (status, body) = analyze_json(json!({"data": [], "analysisType": "summary"}));
        assert_eq!(status, 200);
        assert_eq!(body["analysis"]["totalRows"], json!(0));
        assert_eq!(body["analysis"]["insights"], json!([]));
    }

    #[test]
    fn missing_or_malformed_dataset_is_rejected() {
        let (status, body) = analyze_json(json!({"analysisType": "summary"}));
        assert_eq!(status, 400);
        assert_eq!(body["success"], json!(false));

        let (status, _) = analyze_json(json!({"data": "rows"}));
        assert_eq!(status, 400);

        let (status, _) = filter_json(json!({"data": {"a": 1}, "filters": {}}));
        assert_eq!(status, 400);
    }

    #[test]
    fn filter_returns_matching_rows_in_order() {
        let (status, body) = filter_json(json!({
            "data": [{"x": "a", "n": 10}, {"x": "b", "n": 1000}, {"x": "a", "n": 12}],
            "filters": {"column": "x", "value": "a"}
        }));
        assert_eq!(status, 200);
        assert_eq!(
            body["data"],
            json!([{"x": "a", "n": 10}, {"x": "a", "n": 12}])
        );
    }

    #[test]
    fn filter_without_filters_is_passthrough() {
        let (_, body) = filter_json(json!({"data": [{"a": 2}, {"a": 1}]}));
        assert_eq!(body["data"], json!([{"a": 2}, {"a": 1}]));
    }
}
