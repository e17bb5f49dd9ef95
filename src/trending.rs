use std::cmp::Ordering;

use indexmap::IndexMap;
use tracing::debug;

use crate::dedup::ViewEntry;
use crate::models::TrendingEntry;

/// Pages whose views grew between the two windows, steepest change
/// first, at most `limit` entries.
///
/// Only paths present in both windows participate; a page new in the
/// recent window has no baseline and is not "trending". A zero baseline
/// cannot happen for rows that passed the views threshold, but if one
/// shows up it is treated as missing prior data and skipped.
pub fn find_trending(
    prev: &IndexMap<String, ViewEntry>,
    recent: &IndexMap<String, ViewEntry>,
    limit: usize,
) -> Vec<TrendingEntry> {
    let mut entries: Vec<TrendingEntry> = Vec::new();
    for (path, (title, recent_views)) in recent {
        let Some((_, prev_views)) = prev.get(path) else {
            continue;
        };
        if *prev_views == 0 {
            debug!("Skipping zero-baseline path in trend detection - path={}", path);
            continue;
        }
        let change = (*recent_views as f64 - *prev_views as f64) / *prev_views as f64;
        if change > 0.0 {
            entries.push(TrendingEntry {
                path: path.clone(),
                title: title.clone(),
                percent_change: change,
            });
        }
    }

    // Descending by change; equal changes order by path so the result is
    // deterministic across runs.
    entries.sort_by(|a, b| {
        b.percent_change
            .partial_cmp(&a.percent_change)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.path.cmp(&b.path))
    });
    entries.truncate(limit);
    entries
}

/// Render a change ratio as the percentage string the report embeds,
/// e.g. 0.5 → "50.0%".
pub fn format_change(change: f64) -> String {
    format!("{:.1}%", change * 100.0)
}
