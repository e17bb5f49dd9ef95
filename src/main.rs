mod api_types;
mod config;
mod dedup;
mod fetch;
mod models;
mod normalize;
mod orchestrator;
mod rank;
mod render;
mod snapshot;
mod trending;

use anyhow::Result;
use chrono::{Datelike, Duration, Timelike, Utc};
use chrono_tz::Asia::Taipei;
use clap::Parser;
use tracing::{debug, info};

use config::Config;
use fetch::AnalyticsClient;
use orchestrator::run_daily;
use snapshot::CsvSnapshotStore;

/// top-pages - daily top-10 ranking and trending report for the blog
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output directory for the Markdown page (overrides EXPORT_DIR)
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Directory holding the snapshot CSV log (overrides DATA_DIR)
    #[arg(long)]
    data_dir: Option<String>,

    /// Ranking depth (overrides TOP_N)
    #[arg(long)]
    top_n: Option<usize>,

    /// Minimum views for a page to be considered (overrides MIN_VIEWS)
    #[arg(long)]
    min_views: Option<u64>,

    /// Site-name tag to strip from titles (overrides TITLE_SUFFIX)
    #[arg(long)]
    title_suffix: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_line_number(true)
        .init();

    info!("Starting top-pages");

    // .env is optional; CI provides real environment variables.
    if dotenvy::dotenv().is_ok() {
        debug!("Loaded .env");
    }

    let args = Args::parse();
    let mut cfg = Config::from_env()?;
    if let Some(dir) = args.output_dir {
        cfg.export_dir = dir.into();
    }
    if let Some(dir) = args.data_dir {
        cfg.data_dir = dir.into();
    }
    if let Some(n) = args.top_n {
        cfg.top_n = n;
    }
    if let Some(v) = args.min_views {
        cfg.min_views = v;
    }
    if let Some(s) = args.title_suffix {
        cfg.title_suffix = s;
    }

    // Dates in the site's timezone; the analytics property is configured
    // for Taipei and the updated-at line is reader-facing.
    let now = Utc::now().with_timezone(&Taipei);
    let today = now.date_naive();
    let yesterday = today - Duration::days(1);
    let ymd_today = format!("{:04}-{:02}-{:02}", today.year(), today.month(), today.day());
    let ymd_yesterday = format!(
        "{:04}-{:02}-{:02}",
        yesterday.year(),
        yesterday.month(),
        yesterday.day()
    );
    let updated_at = format!(
        "{:04}/{:02}/{:02} {:02}:{:02}",
        today.year(),
        today.month(),
        today.day(),
        now.hour(),
        now.minute()
    );

    info!(
        "Run dates - today={}, yesterday={}, export_dir={}",
        ymd_today,
        ymd_yesterday,
        cfg.export_dir.display()
    );

    let client = AnalyticsClient::new(cfg.resource_id.clone(), cfg.access_token.clone())?;

    std::fs::create_dir_all(&cfg.data_dir)?;
    let mut store = CsvSnapshotStore::new(cfg.data_dir.join("index.csv"));

    run_daily(
        &client,
        &mut store,
        &cfg,
        &ymd_today,
        &ymd_yesterday,
        &updated_at,
    )
    .await
}
