//! Item library: the lifecycle summary of every topic a source has listed.
//!
//! The library is produced out of band by the collection job and is only
//! ever read here.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::de::null_as_default;
use super::snapshot::parse_instant;

/// Whether a topic is on the latest snapshot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    OnList,
    OffList,
    /// Any value the engine does not recognise, including none at all
    #[default]
    #[serde(other)]
    Unknown,
}

/// Lifecycle summary for one topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ItemStatus,

    #[serde(default, deserialize_with = "null_as_default")]
    pub first_seen_at: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub last_seen_at: String,

    /// Best (lowest) rank ever reached
    #[serde(default)]
    pub peak_rank: Option<u32>,

    /// Number of snapshots the topic appeared in
    #[serde(default, deserialize_with = "null_as_default")]
    pub appearance_count: u32,

    /// Times the topic re-entered the list after dropping off
    #[serde(default, deserialize_with = "null_as_default")]
    pub comeback_count: u32,

    /// Total time spent on the list
    #[serde(default)]
    pub on_list_duration_minutes: Option<u64>,

    #[serde(default)]
    pub current_rank: Option<u32>,

    #[serde(default)]
    pub current_hot_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl LibraryItem {
    /// Parsed `lastSeenAt`, `None` when absent or malformed.
    pub fn last_seen(&self) -> Option<DateTime<FixedOffset>> {
        parse_instant(&self.last_seen_at)
    }
}

/// Per-source item library document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemLibrary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub generated_at: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub total_items: usize,

    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<LibraryItem>,
}

impl ItemLibrary {
    /// A well-formed library with no items.
    pub fn empty(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_library() {
        let json = r#"{
            "source": "weibo",
            "generatedAt": "2026-02-01T10:20:00+08:00",
            "totalItems": 2,
            "items": [
                {"title": "A", "status": "on_list", "firstSeenAt": "2026-02-01T08:00:00+08:00",
                 "lastSeenAt": "2026-02-01T10:20:00+08:00", "peakRank": 1, "appearanceCount": 8,
                 "comebackCount": 1, "onListDurationMinutes": 140, "currentRank": 3,
                 "currentHotValue": 99000},
                {"title": "B", "status": "off_list", "firstSeenAt": "2026-02-01T08:00:00+08:00",
                 "lastSeenAt": "2026-02-01T09:00:00+08:00", "peakRank": null,
                 "comebackCount": 0, "onListDurationMinutes": null, "currentRank": null}
            ]
        }"#;

        let library: ItemLibrary = serde_json::from_str(json).unwrap();
        assert_eq!(library.total_items, 2);
        assert_eq!(library.items[0].status, ItemStatus::OnList);
        assert_eq!(library.items[0].on_list_duration_minutes, Some(140));
        assert_eq!(library.items[1].status, ItemStatus::OffList);
        assert_eq!(library.items[1].peak_rank, None);
        assert_eq!(library.items[1].appearance_count, 0);
    }

    #[test]
    fn test_unknown_status_degrades() {
        let json = r#"{"title": "X", "status": "archived"}"#;
        let item: LibraryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.status, ItemStatus::Unknown);
        assert!(item.last_seen().is_none());
    }

    #[test]
    fn test_missing_or_null_status_is_unknown() {
        let item: LibraryItem = serde_json::from_str(r#"{"title": "X"}"#).unwrap();
        assert_eq!(item.status, ItemStatus::Unknown);

        let item: LibraryItem = serde_json::from_str(r#"{"title": "X", "status": null}"#).unwrap();
        assert_eq!(item.status, ItemStatus::Unknown);
    }

    #[test]
    fn test_null_fields_degrade_per_field() {
        let json = r#"{
            "items": [
                {"title": "A", "status": "on_list", "lastSeenAt": "2026-02-01T10:20:00+08:00",
                 "comebackCount": 2},
                {"title": "B", "status": "off_list", "firstSeenAt": null, "lastSeenAt": null,
                 "appearanceCount": null, "comebackCount": null}
            ],
            "generatedAt": null,
            "totalItems": null
        }"#;

        let library: ItemLibrary = serde_json::from_str(json).unwrap();
        assert_eq!(library.items.len(), 2);
        assert_eq!(library.generated_at, "");
        assert_eq!(library.total_items, 0);

        let b = &library.items[1];
        assert_eq!(b.status, ItemStatus::OffList);
        assert_eq!(b.first_seen_at, "");
        assert!(b.last_seen().is_none());
        assert_eq!(b.appearance_count, 0);
        assert_eq!(b.comeback_count, 0);
        assert_eq!(library.items[0].comeback_count, 2);
    }

    #[test]
    fn test_empty_library() {
        let library = ItemLibrary::empty("zhihu");
        assert_eq!(library.source, "zhihu");
        assert_eq!(library.generated_at, "");
        assert_eq!(library.total_items, 0);
        assert!(library.is_empty());
    }
}
