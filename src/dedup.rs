use indexmap::IndexMap;

use crate::models::PageViewRecord;

/// (title, views) for one deduplicated path.
pub type ViewEntry = (String, u64);

/// Collapse an ordered record list into a path-keyed map. First
/// occurrence of a path wins; later duplicates (paginated or re-sliced
/// API results) are dropped, not merged. Insertion order is kept so
/// downstream iteration matches the API's views-descending order.
pub fn to_view_map(records: &[PageViewRecord]) -> IndexMap<String, ViewEntry> {
    let mut map: IndexMap<String, ViewEntry> = IndexMap::with_capacity(records.len());
    for rec in records {
        map.entry(rec.path.clone())
            .or_insert_with(|| (rec.title.clone(), rec.views));
    }
    map
}
