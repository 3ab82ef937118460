//! Document stores for the collection job's published output.
//!
//! Both backends serve the same layout, addressed by relative keys:
//!
//! ```text
//! {root}/
//! ├── index.json                  # Sources and collected days
//! ├── status.json                 # Latest job run (optional)
//! ├── raw/
//! │   └── {source}/
//! │       └── YYYY-MM-DD.json     # Snapshots of one day
//! └── derived/
//!     └── {source}/
//!         └── items.json          # Item library (optional)
//! ```

pub mod http;
pub mod local;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{AppError, NOT_FOUND, Result};
use crate::models::Config;
use crate::utils::http::create_async_client;

// Re-export for convenience
pub use http::HttpStore;
pub use local::LocalStore;
pub use memory::MemoryStore;

/// Read-only access to published documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read raw bytes, `None` if no document exists under `key`.
    async fn read_bytes_optional(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Human-readable location of a key, for logs.
    fn describe(&self, key: &str) -> String;
}

/// Read and decode a required JSON document.
///
/// A missing document is a fetch error; undecodable content is a parse error.
pub async fn read_json<T: DeserializeOwned>(store: &dyn DocumentStore, key: &str) -> Result<T> {
    let bytes = store
        .read_bytes_optional(key)
        .await?
        .ok_or_else(|| AppError::fetch(store.describe(key), NOT_FOUND))?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::parse(store.describe(key), e))
}

/// Build the store selected by configuration.
pub fn from_config(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    match &config.store.base_url {
        Some(base) => {
            let client = create_async_client(&config.http)?;
            Ok(Arc::new(HttpStore::new(client, base)?))
        }
        None => Ok(Arc::new(LocalStore::new(&config.store.root))),
    }
}

/// Key layout of the published data directory.
pub mod paths {
    pub const INDEX: &str = "index.json";
    pub const STATUS: &str = "status.json";

    /// Key of one day's snapshots for a source.
    pub fn day_key(source: &str, day: &str) -> String {
        format!("raw/{}/{}.json", source, day)
    }

    /// Key of a source's item library.
    pub fn library_key(source: &str) -> String {
        format!("derived/{}/items.json", source)
    }
}
