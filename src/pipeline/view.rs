//! Filtering and ordering of the item library for display.
//!
//! The view is recomputed from the full library on every call.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{ItemLibrary, ItemStatus, LibraryItem};

/// Which lifecycle states to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    OnList,
    OffList,
    /// Topics that re-entered the list at least once
    Comeback,
}

impl StatusFilter {
    pub fn matches(self, item: &LibraryItem) -> bool {
        match self {
            Self::All => true,
            Self::OnList => item.status == ItemStatus::OnList,
            Self::OffList => item.status == ItemStatus::OffList,
            Self::Comeback => item.comeback_count > 0,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "on_list" | "on" => Ok(Self::OnList),
            "off_list" | "off" => Ok(Self::OffList),
            "comeback" => Ok(Self::Comeback),
            other => Err(AppError::validation(format!(
                "Unknown status filter '{}' (expected all, on_list, off_list or comeback)",
                other
            ))),
        }
    }
}

/// Display order of the library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Best peak rank first, topics without one last
    PeakRankAsc,
    /// Longest time on the list first
    DurationDesc,
    /// Most comebacks first
    ComebackDesc,
    /// Most recently seen first
    #[default]
    LastSeenDesc,
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "peakRankAsc" | "peak" => Ok(Self::PeakRankAsc),
            "durationDesc" | "duration" => Ok(Self::DurationDesc),
            "comebackDesc" | "comeback" => Ok(Self::ComebackDesc),
            "lastSeenDesc" | "last_seen" | "" => Ok(Self::LastSeenDesc),
            other => Err(AppError::validation(format!(
                "Unknown sort key '{}' (expected peakRankAsc, durationDesc, comebackDesc or lastSeenDesc)",
                other
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PeakRankAsc => "peakRankAsc",
            Self::DurationDesc => "durationDesc",
            Self::ComebackDesc => "comebackDesc",
            Self::LastSeenDesc => "lastSeenDesc",
        };
        f.write_str(name)
    }
}

/// Filter criteria for the library view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryFilter {
    /// Case-insensitive title substring; blank matches everything
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub status: StatusFilter,
}

impl LibraryFilter {
    pub fn new(text: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }
}

/// Filter and order library items for display.
///
/// Sorting is stable, so items that tie keep the library's own order.
pub fn view<'a>(library: &'a ItemLibrary, filter: &LibraryFilter, sort: SortKey) -> Vec<&'a LibraryItem> {
    let needle = filter.text.trim().to_lowercase();

    let mut items: Vec<&LibraryItem> = library
        .items
        .iter()
        .filter(|item| needle.is_empty() || item.title.to_lowercase().contains(&needle))
        .filter(|item| filter.status.matches(item))
        .collect();

    match sort {
        SortKey::PeakRankAsc => {
            items.sort_by_key(|item| (item.peak_rank.is_none(), item.peak_rank));
        }
        SortKey::DurationDesc => {
            items.sort_by_key(|item| Reverse(item.on_list_duration_minutes.unwrap_or(0)));
        }
        SortKey::ComebackDesc => {
            items.sort_by_key(|item| Reverse(item.comeback_count));
        }
        SortKey::LastSeenDesc => {
            items.sort_by_cached_key(|item| Reverse(item.last_seen()));
        }
    }

    items
}
