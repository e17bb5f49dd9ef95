use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::normalize::ExclusionRules;

/// Runtime configuration, resolved from environment variables (a local
/// `.env` is honored) with CLI overrides applied on top by main.
#[derive(Debug, Clone)]
pub struct Config {
    /// GA4 property id, the numeric part of `properties/<id>`.
    pub resource_id: String,
    /// OAuth bearer token for the Data API. Minted outside this job
    /// (service-account exchange happens in the CI wrapper).
    pub access_token: String,
    /// Where the Markdown page for the site generator lands.
    pub export_dir: PathBuf,
    /// Where the snapshot CSV log lives.
    pub data_dir: PathBuf,
    /// Minimum views (exclusive) for a page to be considered.
    pub min_views: u64,
    /// Ranking depth of the published list.
    pub top_n: usize,
    /// Row limit requested per report window; wider than top_n so the
    /// trend detector sees beyond the published list.
    pub report_limit: u32,
    /// Site-name tag the upstream appends to every page title.
    pub title_suffix: String,
    pub exclusions: ExclusionRules,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("{} is not a valid value for {}", v, name)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let resource_id =
            std::env::var("RESOURCE_ID").context("RESOURCE_ID not set (GA4 property id)")?;
        let access_token =
            std::env::var("GA_ACCESS_TOKEN").context("GA_ACCESS_TOKEN not set (Data API bearer token)")?;
        let export_dir = std::env::var("EXPORT_DIR").unwrap_or_else(|_| "out".to_string());
        let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let title_suffix =
            std::env::var("TITLE_SUFFIX").unwrap_or_else(|_| " - Code and Me".to_string());

        Ok(Self {
            resource_id,
            access_token,
            export_dir: PathBuf::from(export_dir),
            data_dir: PathBuf::from(data_dir),
            min_views: env_or("MIN_VIEWS", 50)?,
            top_n: env_or("TOP_N", 10)?,
            report_limit: env_or("REPORT_LIMIT", 100)?,
            title_suffix,
            exclusions: ExclusionRules::default(),
        })
    }
}
