//! Configuration for the tile map controller.

use std::fmt;
use std::str::FromStr;

use crate::grid::DEFAULT_KEY_PRECISION;
use crate::viewport::DEFAULT_SINE_DELTA_THRESHOLD;

/// How results of overlapping fetches are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResultPolicy {
    /// Apply every successful result; whichever fetch resolves last wins.
    #[default]
    LastResolvedWins,

    /// Apply a result only if no newer fetch has been dispatched since.
    LatestRequestOnly,
}

impl StaleResultPolicy {
    /// Config-file spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaleResultPolicy::LastResolvedWins => "last_resolved_wins",
            StaleResultPolicy::LatestRequestOnly => "latest_request_only",
        }
    }
}

impl fmt::Display for StaleResultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaleResultPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last_resolved_wins" => Ok(StaleResultPolicy::LastResolvedWins),
            "latest_request_only" => Ok(StaleResultPolicy::LatestRequestOnly),
            other => Err(format!(
                "unknown stale policy '{}' (expected last_resolved_wins or latest_request_only)",
                other
            )),
        }
    }
}

/// Settings for a [`TileMap`](super::TileMap).
#[derive(Debug, Clone, PartialEq)]
pub struct TileMapConfig {
    /// Sine-delta threshold for the viewport detector.
    pub sine_delta_threshold: f64,

    /// Decimal places used when deriving tile keys.
    pub key_precision: usize,

    /// Overlapping fetch reconciliation.
    pub stale_policy: StaleResultPolicy,

    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
}

impl Default for TileMapConfig {
    fn default() -> Self {
        Self {
            sine_delta_threshold: DEFAULT_SINE_DELTA_THRESHOLD,
            key_precision: DEFAULT_KEY_PRECISION,
            stale_policy: StaleResultPolicy::default(),
            event_capacity: 64,
        }
    }
}

impl TileMapConfig {
    /// Set the detector threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.sine_delta_threshold = threshold;
        self
    }

    /// Set the tile key precision.
    pub fn with_key_precision(mut self, precision: usize) -> Self {
        self.key_precision = precision;
        self
    }

    /// Set the stale result policy.
    pub fn with_stale_policy(mut self, policy: StaleResultPolicy) -> Self {
        self.stale_policy = policy;
        self
    }
}
