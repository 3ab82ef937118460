//! Ranking snapshot data structures.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::de::null_as_default;

/// One ranked topic within a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Position on the list, starting at 1
    pub rank: u32,

    /// Topic title; identity within a snapshot
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Source-specific hotness score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_value: Option<f64>,

    /// Link to the topic on the source platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Label some sources attach to an entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A point-in-time capture of one source's ranked list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    /// ISO 8601 capture time, offset included; empty when the job wrote none
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,

    /// Items ordered by rank ascending
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

impl Snapshot {
    /// Parsed capture time, `None` when the timestamp is not valid RFC 3339.
    pub fn instant(&self) -> Option<DateTime<FixedOffset>> {
        parse_instant(&self.timestamp)
    }

    /// Whether the job recorded a capture time at all.
    pub fn has_timestamp(&self) -> bool {
        !self.timestamp.trim().is_empty()
    }

    /// Whether every item holds a distinct rank.
    pub fn has_unique_ranks(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.items.len());
        self.items.iter().all(|item| seen.insert(item.rank))
    }
}

/// All snapshots collected for one source on one calendar day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub snapshots: Vec<Snapshot>,
}

/// One sample of a resolved keyword's position over time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub timestamp: String,
    pub rank: u32,
    pub hot_value: f64,
}

/// Parse an ISO 8601 instant leniently.
///
/// Accepts RFC 3339 text as written by the collection job. Anything else
/// yields `None`, which callers treat as the earliest possible instant.
pub fn parse_instant(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(text).ok()
}
