// src/services/repository.rs

//! Snapshot repository.
//!
//! Loads day documents on demand and merges a source's days into one
//! chronological series. Day documents and merged series are cached for the
//! session; the index is re-read on every merge so newly collected days are
//! picked up.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::cache::{DayCache, DayKey, SeriesCache, SeriesKey};
use crate::error::Result;
use crate::models::{DayDocument, IndexDocument, Snapshot, StatusRecord};
use crate::storage::{DocumentStore, paths, read_json};

const DEFAULT_CONCURRENCY: usize = 5;

/// Cache-backed access to ranking snapshots.
pub struct SnapshotRepository {
    store: Arc<dyn DocumentStore>,
    days: Arc<DayCache>,
    series: Arc<SeriesCache>,
    max_concurrent: usize,
}

impl SnapshotRepository {
    /// Create a repository over `store` using the given caches.
    pub fn new(store: Arc<dyn DocumentStore>, days: Arc<DayCache>, series: Arc<SeriesCache>) -> Self {
        Self {
            store,
            days,
            series,
            max_concurrent: DEFAULT_CONCURRENCY,
        }
    }

    /// Bound the number of day documents fetched at once.
    pub fn with_concurrency(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Fetch the index of sources and collected days.
    pub async fn get_index(&self) -> Result<IndexDocument> {
        read_json(self.store.as_ref(), paths::INDEX).await
    }

    /// Fetch the collection job status, if it can be read.
    pub async fn get_status(&self) -> Option<StatusRecord> {
        match read_json(self.store.as_ref(), paths::STATUS).await {
            Ok(status) => Some(status),
            Err(e) => {
                log::warn!("Status document unavailable: {}", e);
                None
            }
        }
    }

    /// Get one day of snapshots for a source, fetching it on first use.
    pub async fn get_day(&self, source: &str, day: &str) -> Result<Arc<DayDocument>> {
        let key = DayKey::new(source, day);
        if let Some(doc) = self.days.get(&key) {
            log::debug!("Day cache hit: {}/{}", source, day);
            return Ok(doc);
        }

        let mut doc: DayDocument =
            read_json(self.store.as_ref(), &paths::day_key(source, day)).await?;

        let before = doc.snapshots.len();
        doc.snapshots.retain(Snapshot::has_timestamp);
        if doc.snapshots.len() < before {
            log::warn!(
                "Skipped {} snapshots without a timestamp in {}/{}",
                before - doc.snapshots.len(),
                source,
                day
            );
        }

        for snapshot in doc.snapshots.iter().filter(|s| !s.has_unique_ranks()) {
            log::warn!(
                "Snapshot {} of {}/{} repeats a rank",
                snapshot.timestamp,
                source,
                day
            );
        }

        log::debug!(
            "Loaded {}/{} with {} snapshots",
            source,
            day,
            doc.snapshots.len()
        );
        Ok(self.days.insert(key, doc))
    }

    /// Merge every indexed day of a source into one chronological series.
    pub async fn get_merged_series(&self, source: &str) -> Result<Arc<Vec<Snapshot>>> {
        let index = self.get_index().await?;
        self.merge_days(source, index.days_for(source)).await
    }

    /// Merge the given days of a source into one chronological series.
    ///
    /// Days are fetched concurrently and every fetch runs to completion, so
    /// days that loaded are cached even when another day fails; the first
    /// failure in day order is returned. Snapshots are concatenated in day
    /// order and then stably sorted by timestamp, so the result does not
    /// depend on which fetch finished first. Unparsable timestamps sort
    /// first.
    pub async fn merge_days(&self, source: &str, days: &[String]) -> Result<Arc<Vec<Snapshot>>> {
        if days.is_empty() {
            log::info!("No collected days for {}", source);
            return Ok(Arc::new(Vec::new()));
        }

        let key = SeriesKey::new(source, days);
        if let Some(series) = self.series.get(&key) {
            log::debug!("Series cache hit: {} ({} days)", source, key.days.len());
            return Ok(series);
        }

        let mut results: Vec<(usize, Result<Arc<DayDocument>>)> =
            stream::iter(key.days.iter().enumerate())
                .map(|(position, day)| async move { (position, self.get_day(source, day).await) })
                .buffer_unordered(self.max_concurrent)
                .collect()
                .await;
        results.sort_by_key(|(position, _)| *position);

        let fetched = results
            .into_iter()
            .map(|(_, result)| result)
            .collect::<Result<Vec<_>>>()?;

        let mut snapshots: Vec<Snapshot> = fetched
            .iter()
            .flat_map(|doc| doc.snapshots.iter().cloned())
            .collect();
        snapshots.sort_by_cached_key(Snapshot::instant);

        log::info!(
            "Merged {} snapshots across {} days for {}",
            snapshots.len(),
            key.days.len(),
            source
        );
        Ok(self.series.insert(key, snapshots))
    }
}
