//! Session caches for fetched and derived documents.
//!
//! Every cache is write-once per key with no eviction and no expiry. Values
//! are handed out as `Arc`s so a cached document is never copied or mutated.
//! Locks are only held for the map operation itself, never across an await.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::{DayDocument, ItemLibrary, Snapshot};

/// Thread-safe key/value store without eviction.
#[derive(Debug)]
pub struct MemoryCache<K, V> {
    entries: Mutex<HashMap<K, Arc<V>>>,
}

impl<K: Eq + Hash, V> MemoryCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Arc<V>>> {
        // A poisoned map still holds complete entries: values are only ever
        // inserted whole.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.lock().get(key).cloned()
    }

    /// Store a value and return the shared handle.
    ///
    /// A concurrent fetch of the same key may already have filled the slot;
    /// the newer value replaces it since both describe the same document.
    pub fn insert(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.lock().insert(key, Arc::clone(&value));
        value
    }
}

impl<K: Eq + Hash, V> Default for MemoryCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies one day of one source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DayKey {
    pub source: String,
    pub day: String,
}

impl DayKey {
    pub fn new(source: &str, day: &str) -> Self {
        Self {
            source: source.to_string(),
            day: day.to_string(),
        }
    }
}

/// Identifies a merged series: a source plus the sorted set of days merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub source: String,
    pub days: Vec<String>,
}

impl SeriesKey {
    pub fn new(source: &str, days: &[String]) -> Self {
        let mut days = days.to_vec();
        days.sort();
        days.dedup();
        Self {
            source: source.to_string(),
            days,
        }
    }
}

pub type DayCache = MemoryCache<DayKey, DayDocument>;
pub type SeriesCache = MemoryCache<SeriesKey, Vec<Snapshot>>;
pub type LibraryCache = MemoryCache<String, ItemLibrary>;

/// The set of caches backing one engine session.
#[derive(Debug, Clone, Default)]
pub struct SessionCaches {
    pub days: Arc<DayCache>,
    pub series: Arc<SeriesCache>,
    pub library: Arc<LibraryCache>,
}
