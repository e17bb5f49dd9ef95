use serde::{Deserialize, Serialize};

/// One page that survived normalization. Title has the site-name suffix
/// already stripped; path always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViewRecord {
    pub path: String,
    pub title: String,
    pub views: u64,
}

/// Movement of a page's rank relative to the previous day's snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDelta {
    /// Not present in yesterday's top list.
    New,
    Unchanged,
    /// Moved up by this many positions.
    Risen(u32),
    /// Moved down; magnitude not reported.
    Fallen,
}

impl RankDelta {
    /// Textual marker appended to a ranked line in the Markdown report.
    /// These exact tokens are consumed by the downstream site renderer.
    pub fn marker(&self) -> String {
        match self {
            RankDelta::New => " NEW".to_string(),
            RankDelta::Unchanged => String::new(),
            RankDelta::Risen(n) => format!(" +{}", n),
            RankDelta::Fallen => " ↓".to_string(),
        }
    }
}

/// A page with its 1-based position in today's ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPage {
    pub rank: u32,
    pub page: PageViewRecord,
    pub delta: RankDelta,
}

/// A page whose views grew between the previous and recent windows.
/// `percent_change` is the raw ratio, e.g. 0.5 for +50%; formatting to
/// one decimal place happens only at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub path: String,
    pub title: String,
    pub percent_change: f64,
}

/// One row of the append-only snapshot log: the top-N ranking recorded
/// for a single calendar day. Never mutated after write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankSnapshot {
    pub path: String,
    pub title: String,
    pub views: u64,
    pub rank: u32,
    pub date: String, // "YYYY-MM-DD"
}
