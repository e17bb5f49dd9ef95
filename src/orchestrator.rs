use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::dedup::to_view_map;
use crate::fetch::{PageViewSource, ReportWindow};
use crate::models::PageViewRecord;
use crate::normalize::normalize;
use crate::rank::annotate;
use crate::render::render_markdown;
use crate::snapshot::SnapshotStore;
use crate::trending::find_trending;

/// One full report run: fetch both windows, normalize, detect trends,
/// annotate today's ranking against yesterday's snapshot, persist the
/// snapshot and write the Markdown page. Strictly sequential; the data
/// volume is tens of rows.
pub async fn run_daily(
    source: &dyn PageViewSource,
    store: &mut dyn SnapshotStore,
    cfg: &Config,
    today: &str,      // "YYYY-MM-DD"
    yesterday: &str,  // "YYYY-MM-DD"
    updated_at: &str, // "YYYY/MM/DD HH:MM", site-local time
) -> Result<()> {
    let pipeline_start = std::time::Instant::now();
    info!(
        "Pipeline started - today={}, top_n={}, threshold={}",
        today, cfg.top_n, cfg.min_views
    );

    // 1) fetch both report windows
    let fetch_start = std::time::Instant::now();
    let prev_raw = source
        .fetch_page_views(&ReportWindow::previous(), cfg.report_limit)
        .await
        .context("Fetching previous window")?;
    let recent_raw = source
        .fetch_page_views(&ReportWindow::recent(), cfg.report_limit)
        .await
        .context("Fetching recent window")?;
    let fetch_elapsed = fetch_start.elapsed();
    info!(
        "Window fetch completed - duration={:.2}s, prev_rows={}, recent_rows={}",
        fetch_elapsed.as_secs_f32(),
        prev_raw.len(),
        recent_raw.len()
    );

    // 2) normalize both windows
    let prev = normalize(&prev_raw, &cfg.exclusions, &cfg.title_suffix, cfg.min_views)?;
    let recent = normalize(&recent_raw, &cfg.exclusions, &cfg.title_suffix, cfg.min_views)?;
    debug!(
        "Normalization - prev: {} -> {}, recent: {} -> {}",
        prev_raw.len(),
        prev.len(),
        recent_raw.len(),
        recent.len()
    );

    // 3) trending: percentage change across the two windows
    let trend_start = std::time::Instant::now();
    let prev_map = to_view_map(&prev);
    let recent_map = to_view_map(&recent);
    let trending = find_trending(&prev_map, &recent_map, cfg.top_n);
    info!(
        "Trend detection completed - duration={:.2}s, trending={}",
        trend_start.elapsed().as_secs_f32(),
        trending.len()
    );

    // 4) today's ranking, annotated against yesterday's snapshot.
    // Ranking runs over the deduplicated recent list so a path that the
    // API returned twice cannot occupy two positions.
    let current: Vec<PageViewRecord> = recent_map
        .iter()
        .map(|(path, (title, views))| PageViewRecord {
            path: path.clone(),
            title: title.clone(),
            views: *views,
        })
        .collect();
    let prior_ranks = store
        .load_day_ranks(yesterday)
        .context("Loading yesterday's ranks")?;
    let ranked = annotate(&current, &prior_ranks, cfg.top_n);
    info!(
        "Ranking completed - ranked={}, with_prior={}",
        ranked.len(),
        prior_ranks.len()
    );

    // 5) persist today's snapshot (no-op on same-day re-run)
    store
        .append_daily(&ranked, today)
        .context("Appending today's snapshot")?;

    // 6) render and write the Markdown page
    let persist_start = std::time::Instant::now();
    let md = render_markdown(&ranked, &trending, cfg.top_n, updated_at);
    std::fs::create_dir_all(&cfg.export_dir)
        .with_context(|| format!("Creating export dir {}", cfg.export_dir.display()))?;
    let md_path = cfg.export_dir.join("index.md");
    std::fs::write(&md_path, md.as_bytes())
        .with_context(|| format!("Writing {}", md_path.display()))?;
    debug!("Wrote {}", md_path.display());
    info!(
        "Output persisted - duration={:.2}s, file={}",
        persist_start.elapsed().as_secs_f32(),
        md_path.display()
    );

    info!(
        "Pipeline completed successfully - total_duration={:.2}s, ranked={}, trending={}",
        pipeline_start.elapsed().as_secs_f32(),
        ranked.len(),
        trending.len()
    );
    Ok(())
}
