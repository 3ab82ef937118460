//! Keyword resolution over a snapshot series.
//!
//! Turns a free-text keyword into the rank history of the item that best
//! represents it at each point in time. Snapshots where nothing matches are
//! skipped; the gaps mark the keyword being off the list.

use serde::Serialize;

use crate::models::{Item, Snapshot, TrendPoint, parse_instant};

/// Picks the item representing a keyword within one snapshot.
pub trait MatchStrategy {
    /// Select at most one item for an already normalized keyword.
    fn select<'a>(&self, items: &'a [Item], keyword: &str) -> Option<&'a Item>;
}

/// Exact title match first, then the best-ranked title containing the keyword.
///
/// Both comparisons are case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactThenSubstring;

impl MatchStrategy for ExactThenSubstring {
    fn select<'a>(&self, items: &'a [Item], keyword: &str) -> Option<&'a Item> {
        let folded: Vec<(String, &Item)> = items
            .iter()
            .map(|item| (item.title.to_lowercase(), item))
            .collect();

        let best = |pred: &dyn Fn(&str) -> bool| {
            folded
                .iter()
                .filter(|(title, _)| pred(title.as_str()))
                .map(|(_, item)| *item)
                .min_by_key(|item| item.rank)
        };

        best(&|title: &str| title == keyword)
            .or_else(|| best(&|title: &str| title.contains(keyword)))
    }
}

/// Trim and case-fold a keyword.
pub fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

/// Resolve a keyword with the default matching policy.
pub fn resolve(series: &[Snapshot], keyword: &str) -> Vec<TrendPoint> {
    resolve_with(series, keyword, &ExactThenSubstring)
}

/// Resolve a keyword with a custom matching policy.
pub fn resolve_with(
    series: &[Snapshot],
    keyword: &str,
    strategy: &dyn MatchStrategy,
) -> Vec<TrendPoint> {
    let keyword = normalize_keyword(keyword);
    if keyword.is_empty() {
        return Vec::new();
    }

    series
        .iter()
        .filter_map(|snapshot| {
            strategy
                .select(&snapshot.items, &keyword)
                .map(|item| TrendPoint {
                    timestamp: snapshot.timestamp.clone(),
                    rank: item.rank,
                    hot_value: item.hot_value.unwrap_or(0.0),
                })
        })
        .collect()
}

/// Headline figures of a resolved trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    /// Timestamp of the first matching snapshot
    pub first_seen: String,
    /// Rank in the last matching snapshot
    pub current_rank: u32,
    /// Best (lowest) rank reached
    pub best_rank: u32,
    /// Minutes between the first and last matching snapshot
    pub duration_minutes: i64,
    pub samples: usize,
}

/// Summarize a resolved trend, `None` when the keyword never matched.
pub fn summarize(points: &[TrendPoint]) -> Option<TrendSummary> {
    let first = points.first()?;
    let last = points.last()?;
    let best_rank = points.iter().map(|p| p.rank).min()?;

    let duration_minutes = match (parse_instant(&first.timestamp), parse_instant(&last.timestamp)) {
        (Some(start), Some(end)) => {
            let minutes = (end - start).num_milliseconds() as f64 / 60_000.0;
            (minutes.round() as i64).max(0)
        }
        _ => 0,
    };

    Some(TrendSummary {
        first_seen: first.timestamp.clone(),
        current_rank: last.rank,
        best_rank,
        duration_minutes,
        samples: points.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(rank: u32, title: &str, hot_value: Option<f64>) -> Item {
        Item {
            rank,
            title: title.to_string(),
            hot_value,
            url: None,
            category: None,
        }
    }

    fn snap(timestamp: &str, items: Vec<Item>) -> Snapshot {
        Snapshot {
            timestamp: timestamp.to_string(),
            items,
        }
    }

    fn series() -> Vec<Snapshot> {
        vec![
            snap(
                "2026-02-01T10:00:00+08:00",
                vec![
                    item(1, "Breaking: Rust trends", Some(900.0)),
                    item(2, "rust", Some(500.0)),
                ],
            ),
            snap("2026-02-01T10:20:00+08:00", vec![item(1, "Go release", None)]),
            snap(
                "2026-02-01T10:40:00+08:00",
                vec![item(1, "Other", None), item(2, "Why RUST wins", None)],
            ),
        ]
    }

    #[test]
    fn test_exact_match_beats_substring() {
        let points = resolve(&series(), "Rust");
        assert_eq!(points[0].rank, 2);
        assert_eq!(points[0].hot_value, 500.0);
    }

    #[test]
    fn test_substring_fallback_and_gaps() {
        let points = resolve(&series(), "  rust ");
        let timestamps: Vec<&str> = points.iter().map(|p| p.timestamp.as_str()).collect();
        assert_eq!(
            timestamps,
            vec!["2026-02-01T10:00:00+08:00", "2026-02-01T10:40:00+08:00"]
        );
        assert_eq!(points[1].rank, 2);
        assert_eq!(points[1].hot_value, 0.0);
    }

    #[test]
    fn test_substring_picks_best_rank() {
        let snapshots = vec![snap(
            "2026-02-01T10:00:00+08:00",
            vec![item(3, "cat videos", None), item(1, "cat memes", None)],
        )];
        assert_eq!(resolve(&snapshots, "cat")[0].rank, 1);
    }

    #[test]
    fn test_empty_keyword() {
        assert!(resolve(&series(), "").is_empty());
        assert!(resolve(&series(), "   ").is_empty());
    }

    #[test]
    fn test_at_most_one_point_per_snapshot() {
        let s = series();
        let points = resolve(&s, "r");
        assert!(points.len() <= s.len());

        let mut cursor = s.iter();
        for point in &points {
            assert!(cursor.any(|snapshot| snapshot.timestamp == point.timestamp));
        }
    }

    #[test]
    fn test_custom_strategy() {
        struct Exact;
        impl MatchStrategy for Exact {
            fn select<'a>(&self, items: &'a [Item], keyword: &str) -> Option<&'a Item> {
                items.iter().find(|i| i.title.to_lowercase() == keyword)
            }
        }

        let points = resolve_with(&series(), "rust", &Exact);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_summarize() {
        let points = vec![
            TrendPoint {
                timestamp: "2026-02-01T10:00:00+08:00".into(),
                rank: 5,
                hot_value: 0.0,
            },
            TrendPoint {
                timestamp: "2026-02-01T10:20:00+08:00".into(),
                rank: 2,
                hot_value: 0.0,
            },
            TrendPoint {
                timestamp: "2026-02-01T11:30:00+08:00".into(),
                rank: 4,
                hot_value: 0.0,
            },
        ];

        let summary = summarize(&points).unwrap();
        assert_eq!(summary.first_seen, "2026-02-01T10:00:00+08:00");
        assert_eq!(summary.current_rank, 4);
        assert_eq!(summary.best_rank, 2);
        assert_eq!(summary.duration_minutes, 90);
        assert_eq!(summary.samples, 3);

        assert!(summarize(&[]).is_none());
    }
}
