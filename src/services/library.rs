// src/services/library.rs

//! Item library provider.
//!
//! The library is produced by an out-of-band job and may lag behind or be
//! missing entirely, so any failure here degrades to an empty library.

use std::sync::Arc;

use crate::cache::LibraryCache;
use crate::models::ItemLibrary;
use crate::storage::{DocumentStore, paths, read_json};

/// Cache-backed access to per-source item libraries.
pub struct LibraryProvider {
    store: Arc<dyn DocumentStore>,
    cache: Arc<LibraryCache>,
}

impl LibraryProvider {
    pub fn new(store: Arc<dyn DocumentStore>, cache: Arc<LibraryCache>) -> Self {
        Self { store, cache }
    }

    /// Get the item library for a source.
    ///
    /// Loaded libraries are kept for the session. A failed load yields an
    /// empty library and is not cached, so the next call tries again.
    pub async fn get_library(&self, source: &str) -> Arc<ItemLibrary> {
        let cache_key = source.to_string();
        if let Some(library) = self.cache.get(&cache_key) {
            log::debug!("Library cache hit: {}", source);
            return library;
        }

        match read_json::<ItemLibrary>(self.store.as_ref(), &paths::library_key(source)).await {
            Ok(mut library) => {
                if library.source.is_empty() {
                    library.source = source.to_string();
                }
                if library.total_items != library.items.len() {
                    log::warn!(
                        "Library for {} declares {} items but lists {}",
                        source,
                        library.total_items,
                        library.items.len()
                    );
                }
                log::debug!("Loaded library for {} ({} items)", source, library.items.len());
                self.cache.insert(cache_key, library)
            }
            Err(e) => {
                log::warn!("Item library for {} unavailable: {}", source, e);
                Arc::new(ItemLibrary::empty(source))
            }
        }
    }
}
