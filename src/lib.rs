// src/lib.rs

//! toptrend: hot-topic leaderboard trend engine

pub mod cache;
pub mod engine;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

pub use engine::{LatestBoard, TrendEngine};
