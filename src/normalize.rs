use anyhow::{Context, Result};

use crate::fetch::RawPageRow;
use crate::models::PageViewRecord;

/// Path filter: the exact root path plus section prefixes that are index
/// pages rather than articles. Configuration, not derived data.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    pub exact: Vec<String>,
    pub prefixes: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            exact: vec!["/".to_string()],
            prefixes: [
                "/archives/",
                "/ranking/",
                "/tags/",
                "/categories/",
                "/series/",
                "/subscribe/",
                "/page/",
                "/django/",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ExclusionRules {
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exact.iter().any(|e| e == path)
            || self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

/// Strip the upstream site-name tag from a page title. Prefers a literal
/// suffix match; when the title does not carry the literal tag the same
/// number of trailing characters is dropped, which is the length contract
/// agreed with the data source.
pub fn strip_title_suffix(title: &str, suffix: &str) -> String {
    if let Some(stripped) = title.strip_suffix(suffix) {
        return stripped.to_string();
    }
    let keep = title.chars().count().saturating_sub(suffix.chars().count());
    title.chars().take(keep).collect()
}

/// Turn raw API rows into canonical records: strip the title tag, parse
/// the views metric, drop excluded paths and rows at or below the views
/// threshold. Input order is preserved; the API already sorts by views
/// descending and no re-sort happens here.
///
/// A non-numeric views field aborts the run: it means the upstream
/// report contract changed, not that one row is bad.
pub fn normalize(
    raw_rows: &[RawPageRow],
    rules: &ExclusionRules,
    title_suffix: &str,
    threshold: u64,
) -> Result<Vec<PageViewRecord>> {
    let mut out = Vec::with_capacity(raw_rows.len());
    for row in raw_rows {
        let views: u64 = row
            .views
            .parse()
            .with_context(|| format!("Non-numeric views value {:?} for {}", row.views, row.path))?;
        if rules.is_excluded(&row.path) || views <= threshold {
            continue;
        }
        out.push(PageViewRecord {
            path: row.path.clone(),
            title: strip_title_suffix(&row.title, title_suffix),
            views,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUFFIX: &str = " - Code and Me";

    fn raw(path: &str, title: &str, views: &str) -> RawPageRow {
        RawPageRow {
            path: path.to_string(),
            title: title.to_string(),
            views: views.to_string(),
        }
    }

    #[test]
    fn keeps_rows_above_threshold_and_strips_suffix() {
        let rows = vec![
            raw("/a/", "A - Code and Me", "100"),
            raw("/b/", "B - Code and Me", "30"),
        ];
        let got = normalize(&rows, &ExclusionRules::default(), SUFFIX, 50).unwrap();
        assert_eq!(
            got,
            vec![PageViewRecord {
                path: "/a/".to_string(),
                title: "A".to_string(),
                views: 100,
            }]
        );
    }

    #[test]
    fn threshold_is_exclusive() {
        let rows = vec![raw("/a/", "A - Code and Me", "50")];
        let got = normalize(&rows, &ExclusionRules::default(), SUFFIX, 50).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn excludes_root_and_prefixed_paths() {
        let rows = vec![
            raw("/", "Home - Code and Me", "999"),
            raw("/tags/rust/", "Tag rust - Code and Me", "500"),
            raw("/page/2/", "Page 2 - Code and Me", "400"),
            raw("/real-post/", "Real post - Code and Me", "300"),
        ];
        let got = normalize(&rows, &ExclusionRules::default(), SUFFIX, 50).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].path, "/real-post/");
    }

    #[test]
    fn non_numeric_views_is_an_error() {
        let rows = vec![raw("/a/", "A - Code and Me", "(other)")];
        let err = normalize(&rows, &ExclusionRules::default(), SUFFIX, 50);
        assert!(err.is_err());
    }

    #[test]
    fn preserves_input_order() {
        let rows = vec![
            raw("/c/", "C - Code and Me", "300"),
            raw("/a/", "A - Code and Me", "200"),
            raw("/b/", "B - Code and Me", "100"),
        ];
        let got = normalize(&rows, &ExclusionRules::default(), SUFFIX, 50).unwrap();
        let paths: Vec<&str> = got.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/c/", "/a/", "/b/"]);
    }

    #[test]
    fn length_fallback_strips_same_char_count() {
        // Upstream sometimes localizes the tag; the 14-char contract holds.
        let got = strip_title_suffix("標題 - Code and Me", SUFFIX);
        assert_eq!(got, "標題");
        let fallback = strip_title_suffix("标题XXXXXXXXXXXXXX", SUFFIX);
        assert_eq!(fallback, "标题");
    }
}
