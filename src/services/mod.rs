// src/services/mod.rs

//! Cache-backed services that perform document I/O.

pub mod library;
pub mod repository;

pub use library::LibraryProvider;
pub use repository::SnapshotRepository;
