// src/engine.rs

//! Trend engine: the query surface exposed to the rendering layer.
//!
//! Owns the document store and the session caches and answers every query
//! the CLI needs. Cache-backed queries go through the repository and library
//! provider; everything else is a pure function from `pipeline`.

use std::sync::Arc;

use crate::cache::SessionCaches;
use crate::error::Result;
use crate::models::{
    Config, DayDocument, IndexDocument, ItemLibrary, LibraryItem, Snapshot, StatusRecord,
    TrendPoint,
};
use crate::pipeline::{
    AnnotatedItem, ExactThenSubstring, Freshness, FreshnessEvaluator, LibraryFilter,
    MatchStrategy, SortKey, annotate_latest, resolve_with, view,
};
use crate::services::{LibraryProvider, SnapshotRepository};
use crate::storage::{self, DocumentStore};

/// Latest snapshot of a source with rank changes against the one before it.
#[derive(Debug, Clone)]
pub struct LatestBoard {
    pub timestamp: String,
    pub rows: Vec<AnnotatedItem>,
}

/// Session-scoped trend engine.
pub struct TrendEngine {
    repository: SnapshotRepository,
    library: LibraryProvider,
    freshness: FreshnessEvaluator,
    matcher: Box<dyn MatchStrategy + Send + Sync>,
}

impl TrendEngine {
    /// Create an engine over `store` with injected caches.
    pub fn new(store: Arc<dyn DocumentStore>, caches: SessionCaches, config: &Config) -> Self {
        let repository = SnapshotRepository::new(Arc::clone(&store), caches.days, caches.series)
            .with_concurrency(config.http.max_concurrent);
        let library = LibraryProvider::new(store, caches.library);

        Self {
            repository,
            library,
            freshness: FreshnessEvaluator::with_config(config.freshness.clone()),
            matcher: Box::new(ExactThenSubstring),
        }
    }

    /// Create an engine with fresh caches over the store selected by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = storage::from_config(config)?;
        Ok(Self::new(store, SessionCaches::default(), config))
    }

    /// Replace the keyword matching policy.
    pub fn with_matcher(mut self, matcher: impl MatchStrategy + Send + Sync + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub async fn get_index(&self) -> Result<IndexDocument> {
        self.repository.get_index().await
    }

    pub async fn get_status(&self) -> Option<StatusRecord> {
        self.repository.get_status().await
    }

    pub async fn get_day(&self, source: &str, day: &str) -> Result<Arc<DayDocument>> {
        self.repository.get_day(source, day).await
    }

    pub async fn get_merged_series(&self, source: &str) -> Result<Arc<Vec<Snapshot>>> {
        self.repository.get_merged_series(source).await
    }

    pub async fn get_library(&self, source: &str) -> Arc<ItemLibrary> {
        self.library.get_library(source).await
    }

    /// Rank history of a keyword across every collected day of a source.
    pub async fn trend(&self, source: &str, keyword: &str) -> Result<Vec<TrendPoint>> {
        let series = self.get_merged_series(source).await?;
        Ok(resolve_with(&series, keyword, self.matcher.as_ref()))
    }

    /// The newest snapshot of a source, annotated against the previous one.
    pub async fn latest(&self, source: &str) -> Result<Option<LatestBoard>> {
        let series = self.get_merged_series(source).await?;
        Ok(annotate_latest(&series).map(|(snapshot, rows)| LatestBoard {
            timestamp: snapshot.timestamp.clone(),
            rows,
        }))
    }

    /// Filtered and ordered library items of a source.
    pub async fn library_view(
        &self,
        source: &str,
        filter: &LibraryFilter,
        sort: SortKey,
    ) -> Vec<LibraryItem> {
        let library = self.get_library(source).await;
        view(&library, filter, sort).into_iter().cloned().collect()
    }

    /// Health of the collection job as of now.
    pub async fn freshness(&self) -> Freshness {
        let status = self.get_status().await;
        self.freshness.evaluate(status.as_ref())
    }

    pub fn evaluator(&self) -> &FreshnessEvaluator {
        &self.freshness
    }
}
