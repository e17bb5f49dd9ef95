// src/render.rs
use crate::models::{RankedPage, TrendingEntry};
use crate::trending::format_change;

/// Build the full Markdown page the site generator publishes at /top/.
/// The front-matter keys, delta markers and the updated-at line are part
/// of the contract with the downstream theme; do not reword them.
pub fn render_markdown(
    ranked: &[RankedPage],
    trending: &[TrendingEntry],
    top_n: usize,
    updated_at: &str, // "YYYY/MM/DD HH:MM"
) -> String {
    let mut md = String::new();
    md.push_str("---\n");
    md.push_str("title: 熱門文章\n");
    md.push_str("layout: page\n");
    md.push_str("comments: false\n");
    md.push_str("permalink: /top/\n");
    md.push_str("---\n");
    md.push_str(&format!("# 本站熱門文章 TOP {}\n\n", top_n));
    md.push_str("排名依據：**最近 28 天瀏覽數**\n\n");

    for r in ranked {
        md.push_str(&format!(
            "{}. [{}]({}){}\n",
            r.rank,
            r.page.title,
            r.page.path,
            r.delta.marker()
        ));
    }

    if !trending.is_empty() {
        md.push_str("\n## 趨勢上升文章\n\n");
        md.push_str("依據：**前後 28 天瀏覽數成長率**\n\n");
        for (i, t) in trending.iter().enumerate() {
            md.push_str(&format!(
                "{}. [{}]({})（{}）\n",
                i + 1,
                t.title,
                t.path,
                format_change(t.percent_change)
            ));
        }
    }

    md.push_str(&format!(
        "\n每日更新。最近更新時間：`{}`\n",
        updated_at
    ));

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageViewRecord, RankDelta};

    fn ranked(path: &str, title: &str, rank: u32, delta: RankDelta) -> RankedPage {
        RankedPage {
            rank,
            page: PageViewRecord {
                path: path.to_string(),
                title: title.to_string(),
                views: 100,
            },
            delta,
        }
    }

    #[test]
    fn emits_front_matter_and_exact_delta_markers() {
        let ranked = vec![
            ranked("/a/", "A", 1, RankDelta::Risen(2)),
            ranked("/b/", "B", 2, RankDelta::Unchanged),
            ranked("/c/", "C", 3, RankDelta::Fallen),
            ranked("/d/", "D", 4, RankDelta::New),
        ];
        let md = render_markdown(&ranked, &[], 10, "2026/08/28 06:00");

        assert!(md.starts_with("---\ntitle: 熱門文章\n"));
        assert!(md.contains("permalink: /top/\n"));
        assert!(md.contains("# 本站熱門文章 TOP 10\n"));
        assert!(md.contains("1. [A](/a/) +2\n"));
        assert!(md.contains("2. [B](/b/)\n"));
        assert!(md.contains("3. [C](/c/) ↓\n"));
        assert!(md.contains("4. [D](/d/) NEW\n"));
        assert!(md.ends_with("每日更新。最近更新時間：`2026/08/28 06:00`\n"));
    }

    #[test]
    fn trending_section_formats_change_with_one_decimal() {
        let trending = vec![TrendingEntry {
            path: "/a/".to_string(),
            title: "A".to_string(),
            percent_change: 0.5,
        }];
        let md = render_markdown(&[], &trending, 10, "2026/08/28 06:00");
        assert!(md.contains("1. [A](/a/)（50.0%）\n"));
    }

    #[test]
    fn no_trending_section_when_empty() {
        let md = render_markdown(&[], &[], 10, "2026/08/28 06:00");
        assert!(!md.contains("趨勢上升文章"));
    }
}
