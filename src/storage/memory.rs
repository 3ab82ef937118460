//! In-memory document store.
//!
//! Holds documents that were fetched or built elsewhere, and counts reads per
//! key so callers can observe how often a document was requested.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::storage::DocumentStore;

/// Document store backed by a map of keys to bytes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, Vec<u8>>>,
    delays: Mutex<HashMap<String, Duration>>,
    reads: Mutex<HashMap<String, usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under a key, replacing any previous document.
    pub fn insert_bytes(&self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        lock(&self.documents).insert(key.into(), bytes.into());
    }

    /// Serialize and store a document.
    pub fn insert_json<T: Serialize + ?Sized>(&self, key: impl Into<String>, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.insert_bytes(key, bytes);
        Ok(())
    }

    /// Hold every read of `key` for `delay` before answering.
    pub fn set_delay(&self, key: impl Into<String>, delay: Duration) {
        lock(&self.delays).insert(key.into(), delay);
    }

    /// Number of reads issued for `key`, found or not.
    pub fn read_count(&self, key: &str) -> usize {
        lock(&self.reads).get(key).copied().unwrap_or(0)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read_bytes_optional(&self, key: &str) -> Result<Option<Vec<u8>>> {
        *lock(&self.reads).entry(key.to_string()).or_default() += 1;

        let delay = lock(&self.delays).get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(lock(&self.documents).get(key).cloned())
    }

    fn describe(&self, key: &str) -> String {
        format!("memory://{}", key)
    }
}
