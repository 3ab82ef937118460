//! Pure computations over already-fetched documents.
//!
//! - `annotate`: rank changes between consecutive snapshots
//! - `resolve`: a keyword's rank history across a series
//! - `view`: library filtering and ordering
//! - `freshness`: collection job health

pub mod annotate;
pub mod freshness;
pub mod resolve;
pub mod view;

pub use annotate::{AnnotatedItem, RankChange, RankChanges, annotate, annotate_items, annotate_latest};
pub use freshness::{Freshness, FreshnessEvaluator, stale_minutes};
pub use resolve::{
    ExactThenSubstring, MatchStrategy, TrendSummary, normalize_keyword, resolve, resolve_with,
    summarize,
};
pub use view::{LibraryFilter, SortKey, StatusFilter, view};
