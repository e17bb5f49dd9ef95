use serde::{Deserialize, Serialize};

/// Request body for the GA4 Data API `runReport` method. Only the fields
/// this job sends; the API tolerates the rest being absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    pub date_ranges: Vec<ApiDateRange>,
    pub dimensions: Vec<ApiDimension>,
    pub metrics: Vec<ApiMetric>,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDateRange {
    pub start_date: String, // relative forms allowed, e.g. "28daysAgo"
    pub end_date: String,   // e.g. "today"
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiDimension {
    pub name: String, // "pagePath" | "pageTitle"
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiMetric {
    pub name: String, // "screenPageViews"
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunReportResponse {
    #[serde(default)]
    pub rows: Vec<ApiRow>,
}

/// One report row: dimension values in request order (path, then title),
/// metric values likewise. The API returns metrics as strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRow {
    #[serde(default)]
    pub dimension_values: Vec<ApiValue>,
    #[serde(default)]
    pub metric_values: Vec<ApiValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiValue {
    #[serde(default)]
    pub value: String,
}
