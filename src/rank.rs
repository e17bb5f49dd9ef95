use std::collections::HashMap;

use crate::models::{PageViewRecord, RankDelta, RankedPage};

/// Assign 1-based ranks to the current ordered list, capped at `limit`,
/// and annotate each page with its movement against yesterday's
/// path → rank lookup.
pub fn annotate(
    current: &[PageViewRecord],
    prior_ranks: &HashMap<String, u32>,
    limit: usize,
) -> Vec<RankedPage> {
    current
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, page)| {
            let rank = (i + 1) as u32;
            let delta = match prior_ranks.get(&page.path) {
                None => RankDelta::New,
                Some(&prior) if prior > rank => RankDelta::Risen(prior - rank),
                Some(&prior) if prior == rank => RankDelta::Unchanged,
                Some(_) => RankDelta::Fallen,
            };
            RankedPage {
                rank,
                page: page.clone(),
                delta,
            }
        })
        .collect()
}
