// src/models/mod.rs

//! Domain models for the trend engine.
//!
//! This module contains the documents read from the collection job's output
//! and the values computed from them.

mod config;
mod de;
mod index;
mod library;
mod snapshot;

// Re-export all public types
pub use config::{Config, FreshnessConfig, HttpConfig, LoggingConfig, StoreConfig};
pub use index::{
    DEFAULT_SOURCE, IndexDocument, SourceResult, StatusRecord, source_display_name,
};
pub use library::{ItemLibrary, ItemStatus, LibraryItem};
pub use snapshot::{DayDocument, Item, Snapshot, TrendPoint, parse_instant};
