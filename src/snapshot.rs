use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::models::{RankSnapshot, RankedPage};

/// Append-only log of daily top-N rankings. The CSV implementation is
/// the production backend; the trait keeps the ranking logic unaware of
/// the storage so a real database could replace the flat file.
pub trait SnapshotStore {
    /// Record today's top list. Calling again for a date already
    /// recorded is a no-op, which makes same-day re-runs safe.
    fn append_daily(&mut self, top: &[RankedPage], date: &str) -> Result<()>;

    /// path → rank for the rows recorded on `date` (normally yesterday).
    /// Rows with an unparsable rank are skipped, not fatal.
    fn load_day_ranks(&self, date: &str) -> Result<HashMap<String, u32>>;
}

const HEADER: [&str; 5] = ["path", "title", "views", "rank", "date"];

/// Flat CSV file, one row per (path, day), columns `path,title,views,rank,date`.
pub struct CsvSnapshotStore {
    path: PathBuf,
}

impl CsvSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Date of the last data row, or None for a missing/empty file.
    fn last_recorded_date(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Opening snapshot log {}", self.path.display()))?;
        let mut last = None;
        for record in reader.records() {
            let record = record
                .with_context(|| format!("Reading snapshot log {}", self.path.display()))?;
            if let Some(date) = record.get(4) {
                last = Some(date.to_string());
            }
        }
        Ok(last)
    }
}

impl SnapshotStore for CsvSnapshotStore {
    fn append_daily(&mut self, top: &[RankedPage], date: &str) -> Result<()> {
        if self.last_recorded_date()?.as_deref() == Some(date) {
            info!("Snapshot already recorded for {} - skipping append", date);
            return Ok(());
        }

        let new_file = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Opening snapshot log {}", self.path.display()))?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        if new_file {
            writer.write_record(HEADER)?;
        }
        for ranked in top {
            let row = RankSnapshot {
                path: ranked.page.path.clone(),
                title: ranked.page.title.clone(),
                views: ranked.page.views,
                rank: ranked.rank,
                date: date.to_string(),
            };
            writer.serialize(&row)?;
        }
        writer
            .flush()
            .with_context(|| format!("Flushing snapshot log {}", self.path.display()))?;

        debug!("Snapshot appended - date={}, rows={}", date, top.len());
        Ok(())
    }

    fn load_day_ranks(&self, date: &str) -> Result<HashMap<String, u32>> {
        let mut ranks = HashMap::new();
        if !self.path.exists() {
            debug!("No snapshot log at {} - starting fresh", self.path.display());
            return Ok(ranks);
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Opening snapshot log {}", self.path.display()))?;
        for record in reader.records() {
            let record = record
                .with_context(|| format!("Reading snapshot log {}", self.path.display()))?;
            let (Some(path), Some(rank), Some(row_date)) =
                (record.get(0), record.get(3), record.get(4))
            else {
                warn!("Short snapshot row skipped - fields={}", record.len());
                continue;
            };
            if row_date != date {
                continue;
            }
            match rank.parse::<u32>() {
                Ok(rank) => {
                    // Duplicate path on one day should not happen; last read wins.
                    ranks.insert(path.to_string(), rank);
                }
                Err(_) => {
                    warn!("Malformed rank {:?} for {} - row skipped", rank, path);
                }
            }
        }
        debug!("Prior ranks loaded - date={}, paths={}", date, ranks.len());
        Ok(ranks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageViewRecord, RankDelta};

    fn ranked(path: &str, views: u64, rank: u32) -> RankedPage {
        RankedPage {
            rank,
            page: PageViewRecord {
                path: path.to_string(),
                title: path.trim_matches('/').to_uppercase(),
                views,
            },
            delta: RankDelta::New,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> CsvSnapshotStore {
        CsvSnapshotStore::new(dir.path().join("index.csv"))
    }

    #[test]
    fn round_trips_a_daily_ranking() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let top = vec![ranked("/a/", 100, 1), ranked("/b/", 80, 2)];
        store.append_daily(&top, "2026-08-27").unwrap();

        let ranks = store.load_day_ranks("2026-08-27").unwrap();
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks["/a/"], 1);
        assert_eq!(ranks["/b/"], 2);
    }

    #[test]
    fn same_day_rerun_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let top = vec![ranked("/a/", 100, 1)];
        store.append_daily(&top, "2026-08-27").unwrap();
        let once = std::fs::read_to_string(store.path()).unwrap();

        store.append_daily(&top, "2026-08-27").unwrap();
        let twice = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn consecutive_days_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.append_daily(&[ranked("/a/", 100, 1)], "2026-08-26").unwrap();
        store.append_daily(&[ranked("/b/", 120, 1)], "2026-08-27").unwrap();

        assert_eq!(store.load_day_ranks("2026-08-26").unwrap()["/a/"], 1);
        assert_eq!(store.load_day_ranks("2026-08-27").unwrap()["/b/"], 1);
        assert!(store.load_day_ranks("2026-08-25").unwrap().is_empty());
    }

    #[test]
    fn malformed_rank_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.csv");
        std::fs::write(
            &path,
            "path,title,views,rank,date\n\
             /a/,A,100,1,2026-08-27\n\
             /bad/,Bad,90,not-a-rank,2026-08-27\n\
             /b/,B,80,2,2026-08-27\n",
        )
        .unwrap();

        let store = CsvSnapshotStore::new(path);
        let ranks = store.load_day_ranks("2026-08-27").unwrap();
        assert_eq!(ranks.len(), 2);
        assert!(!ranks.contains_key("/bad/"));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load_day_ranks("2026-08-27").unwrap().is_empty());
    }
}
