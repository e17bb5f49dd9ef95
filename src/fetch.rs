use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::*;

/// A raw report row before normalization: both dimensions plus the
/// views metric exactly as the API returned them (views still a string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPageRow {
    pub path: String,
    pub title: String,
    pub views: String,
}

/// An aggregation window, in the API's relative date forms.
#[derive(Debug, Clone)]
pub struct ReportWindow {
    pub start_date: String,
    pub end_date: String,
}

impl ReportWindow {
    /// Last 28 days up to today.
    pub fn recent() -> Self {
        Self {
            start_date: "28daysAgo".to_string(),
            end_date: "today".to_string(),
        }
    }

    /// The 28 days before the recent window.
    pub fn previous() -> Self {
        Self {
            start_date: "56daysAgo".to_string(),
            end_date: "28daysAgo".to_string(),
        }
    }
}

/// Where page-view rows come from. The production impl talks to the GA4
/// Data API; tests drive the pipeline with a canned source.
#[async_trait]
pub trait PageViewSource {
    async fn fetch_page_views(&self, window: &ReportWindow, limit: u32) -> Result<Vec<RawPageRow>>;
}

/// GA4 Data API client. Constructed once by main and passed down; holds
/// the property resource id and a bearer token minted by the caller.
pub struct AnalyticsClient {
    client: Client,
    base_url: String,
    resource_id: String,
    access_token: String,
}

const DEFAULT_BASE_URL: &str = "https://analyticsdata.googleapis.com/v1beta";

impl AnalyticsClient {
    pub fn new(resource_id: String, access_token: String) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: DEFAULT_BASE_URL.to_string(),
            resource_id,
            access_token,
        })
    }
}

#[async_trait]
impl PageViewSource for AnalyticsClient {
    async fn fetch_page_views(&self, window: &ReportWindow, limit: u32) -> Result<Vec<RawPageRow>> {
        let url = format!(
            "{}/properties/{}:runReport",
            self.base_url, self.resource_id
        );
        let request = RunReportRequest {
            date_ranges: vec![ApiDateRange {
                start_date: window.start_date.clone(),
                end_date: window.end_date.clone(),
            }],
            dimensions: vec![
                ApiDimension { name: "pagePath".to_string() },
                ApiDimension { name: "pageTitle".to_string() },
            ],
            metrics: vec![ApiMetric { name: "screenPageViews".to_string() }],
            limit,
        };

        let start = std::time::Instant::now();
        debug!(
            "Fetching page views - window={}..{}, limit={}",
            window.start_date, window.end_date, limit
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Request failed for {}", url))?;

        let resp = resp
            .error_for_status()
            .with_context(|| format!("HTTP error for {}", url))?;

        let report: RunReportResponse = resp
            .json()
            .await
            .with_context(|| format!("Decoding JSON for {}", url))?;

        let rows: Vec<RawPageRow> = report
            .rows
            .into_iter()
            .map(|r| RawPageRow {
                path: r.dimension_values.first().map(|v| v.value.clone()).unwrap_or_default(),
                title: r.dimension_values.get(1).map(|v| v.value.clone()).unwrap_or_default(),
                views: r.metric_values.first().map(|v| v.value.clone()).unwrap_or_default(),
            })
            .collect();

        let elapsed = start.elapsed();
        info!(
            "Report fetch completed - window={}..{}, duration={:.2}s, rows={}",
            window.start_date,
            window.end_date,
            elapsed.as_secs_f32(),
            rows.len()
        );

        Ok(rows)
    }
}
