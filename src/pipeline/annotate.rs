//! Rank-change annotation between consecutive snapshots.
//!
//! Compares the current snapshot with the one immediately before it and
//! classifies every current item as new, moved up, moved down or unchanged.
//! No history beyond the previous snapshot is considered.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Item, Snapshot};

/// How an item moved since the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankChange {
    /// Not present in the previous snapshot
    New,
    /// Climbed by the given number of places
    Up(u32),
    /// Fell by the given number of places
    Down(u32),
    Unchanged,
}

impl RankChange {
    /// Classify a move from `previous` to `current` rank.
    pub fn between(current: u32, previous: Option<u32>) -> Self {
        match previous {
            None => Self::New,
            Some(prev) if current < prev => Self::Up(prev - current),
            Some(prev) if current > prev => Self::Down(current - prev),
            Some(_) => Self::Unchanged,
        }
    }
}

impl fmt::Display for RankChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::Up(n) => write!(f, "↑ {}", n),
            Self::Down(n) => write!(f, "↓ {}", n),
            Self::Unchanged => write!(f, "-"),
        }
    }
}

/// Change classification per item title.
pub type RankChanges = HashMap<String, RankChange>;

/// An item of the current snapshot with its change classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedItem {
    #[serde(flatten)]
    pub item: Item,
    pub change: RankChange,
}

/// Look up ranks of the previous snapshot by title.
///
/// When a title repeats, its last occurrence wins.
fn previous_ranks(previous: Option<&Snapshot>) -> HashMap<&str, u32> {
    previous
        .map(|snap| {
            snap.items
                .iter()
                .map(|item| (item.title.as_str(), item.rank))
                .collect()
        })
        .unwrap_or_default()
}

/// Classify every item of `current` against `previous`.
pub fn annotate(current: &Snapshot, previous: Option<&Snapshot>) -> RankChanges {
    let prev_ranks = previous_ranks(previous);
    current
        .items
        .iter()
        .map(|item| {
            let change = RankChange::between(item.rank, prev_ranks.get(item.title.as_str()).copied());
            (item.title.clone(), change)
        })
        .collect()
}

/// Annotate `current` keeping its rank order, for display.
pub fn annotate_items(current: &Snapshot, previous: Option<&Snapshot>) -> Vec<AnnotatedItem> {
    let prev_ranks = previous_ranks(previous);
    current
        .items
        .iter()
        .map(|item| AnnotatedItem {
            item: item.clone(),
            change: RankChange::between(item.rank, prev_ranks.get(item.title.as_str()).copied()),
        })
        .collect()
}

/// Annotate the last snapshot of a chronological series against the one
/// before it. Returns `None` for an empty series.
pub fn annotate_latest(series: &[Snapshot]) -> Option<(&Snapshot, Vec<AnnotatedItem>)> {
    let (latest, earlier) = series.split_last()?;
    Some((latest, annotate_items(latest, earlier.last())))
}
