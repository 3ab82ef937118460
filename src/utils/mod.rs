//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::Result;

/// Resolve a store key against a base URL.
///
/// Leading slashes are dropped so keys always stay under the base path.
pub fn join_key(base: &Url, key: &str) -> Result<Url> {
    Ok(base.join(key.trim_start_matches('/'))?)
}
