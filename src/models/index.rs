//! Index and status documents published by the collection job.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Source used when the index lists none.
pub const DEFAULT_SOURCE: &str = "weibo";

/// Catalog of sources and the days collected for each.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    #[serde(default)]
    pub last_updated: String,

    #[serde(default)]
    pub sources: Vec<String>,

    /// Day identifiers (`YYYY-MM-DD`) per source
    #[serde(default)]
    pub dates: HashMap<String, Vec<String>>,
}

impl IndexDocument {
    /// Days known for a source, in the order the index lists them.
    pub fn days_for(&self, source: &str) -> &[String] {
        self.dates.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The most recent day collected for a source.
    pub fn latest_day(&self, source: &str) -> Option<&str> {
        self.days_for(source).iter().max().map(String::as_str)
    }

    /// Pick the source to show: the requested one if indexed, else the first.
    pub fn resolve_source<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(source) if self.sources.iter().any(|s| s == source) => source,
            _ => self
                .sources
                .first()
                .map(String::as_str)
                .unwrap_or(DEFAULT_SOURCE),
        }
    }
}

/// Latest run of the external collection job.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    #[serde(default)]
    pub ok: Option<bool>,

    #[serde(default)]
    pub last_run_at: Option<String>,

    #[serde(default)]
    pub last_success_at: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub source_results: Vec<SourceResult>,
}

/// Per-source outcome of a collection run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceResult {
    pub source: String,
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub error: String,
}

/// Human-readable name for a source identifier.
pub fn source_display_name(source: &str) -> &str {
    match source {
        "weibo" => "微博热搜",
        "zhihu" => "知乎热榜",
        "bilibili" => "B站热榜",
        "baidu" => "百度热搜",
        "douyin" => "抖音热榜",
        "toutiao" => "头条热榜",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> IndexDocument {
        serde_json::from_str(
            r#"{
                "lastUpdated": "2026-02-02T10:00:00+08:00",
                "sources": ["weibo", "zhihu"],
                "dates": {"weibo": ["2026-02-02", "2026-02-01"], "zhihu": []}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_days_for() {
        let index = sample_index();
        assert_eq!(index.days_for("weibo").len(), 2);
        assert!(index.days_for("zhihu").is_empty());
        assert!(index.days_for("baidu").is_empty());
    }

    #[test]
    fn test_latest_day_ignores_listing_order() {
        let index = sample_index();
        assert_eq!(index.latest_day("weibo"), Some("2026-02-02"));
        assert_eq!(index.latest_day("zhihu"), None);
    }

    #[test]
    fn test_resolve_source() {
        let index = sample_index();
        assert_eq!(index.resolve_source(Some("zhihu")), "zhihu");
        assert_eq!(index.resolve_source(Some("douyin")), "weibo");
        assert_eq!(index.resolve_source(None), "weibo");
        assert_eq!(IndexDocument::default().resolve_source(None), DEFAULT_SOURCE);
    }

    #[test]
    fn test_status_with_missing_fields() {
        let status: StatusRecord = serde_json::from_str(r#"{"message": "partial"}"#).unwrap();
        assert_eq!(status.ok, None);
        assert_eq!(status.last_run_at, None);
        assert!(status.source_results.is_empty());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(source_display_name("weibo"), "微博热搜");
        assert_eq!(source_display_name("custom"), "custom");
    }
}
