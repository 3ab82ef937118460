//! Freshness check for the external collection job.
//!
//! The job is expected to run roughly every 20 minutes. A run older than the
//! staleness threshold (50 minutes by default, two missed cycles plus slack)
//! flags the job as possibly stalled.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::{FreshnessConfig, StatusRecord, parse_instant};

/// Health of the collection job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// No status document is available
    Unknown,
    /// The last run reported failure, with its message
    Failed(String),
    /// The last run is older than the threshold; `None` means its time is
    /// missing or unreadable and the job counts as stale indefinitely
    Stale(Option<i64>),
    Healthy,
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown: no status document"),
            Self::Failed(message) if message.is_empty() => write!(f, "failed"),
            Self::Failed(message) => write!(f, "failed: {}", message),
            Self::Stale(Some(minutes)) => write!(f, "stale: last run {} minutes ago", minutes),
            Self::Stale(None) => write!(f, "stale: no recorded run time"),
            Self::Healthy => write!(f, "healthy"),
        }
    }
}

/// Decides whether the collection job looks healthy.
#[derive(Debug, Clone, Default)]
pub struct FreshnessEvaluator {
    config: FreshnessConfig,
}

impl FreshnessEvaluator {
    /// Create an evaluator with default thresholds.
    pub fn new() -> Self {
        Self::with_config(FreshnessConfig::default())
    }

    pub fn with_config(config: FreshnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FreshnessConfig {
        &self.config
    }

    /// Evaluate a status record against the current time.
    pub fn evaluate(&self, status: Option<&StatusRecord>) -> Freshness {
        self.evaluate_at(status, Utc::now())
    }

    /// Evaluate a status record against a given time.
    pub fn evaluate_at(&self, status: Option<&StatusRecord>, now: DateTime<Utc>) -> Freshness {
        let Some(status) = status else {
            return Freshness::Unknown;
        };

        if status.ok == Some(false) {
            return Freshness::Failed(status.message.clone().unwrap_or_default());
        }

        match stale_minutes(status.last_run_at.as_deref(), now) {
            Some(minutes) if minutes > self.config.stale_after_minutes => {
                Freshness::Stale(Some(minutes))
            }
            Some(_) => Freshness::Healthy,
            None => Freshness::Stale(None),
        }
    }
}

/// Whole minutes elapsed since `last_run_at`, rounded down.
///
/// `None` when the time is absent or unparsable.
pub fn stale_minutes(last_run_at: Option<&str>, now: DateTime<Utc>) -> Option<i64> {
    let last_run = parse_instant(last_run_at?)?;
    let elapsed_ms = (now - last_run.with_timezone(&Utc)).num_milliseconds();
    Some(elapsed_ms.div_euclid(60_000))
}
