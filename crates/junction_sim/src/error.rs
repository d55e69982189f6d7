//! # Simulation Error Types
//!
//! All errors that can occur around the light controller. The running core
//! itself has no recoverable failures: sends always succeed and waits block
//! until satisfied. What can go wrong is configuration and lifecycle misuse.

use thiserror::Error;

/// Errors produced while validating or loading a [`TogglerConfig`](crate::TogglerConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The dwell range is empty or inverted.
    #[error("invalid dwell range: min {min_ms}ms, max {max_ms}ms")]
    InvalidDwellRange {
        /// Configured lower bound.
        min_ms: u64,
        /// Configured upper bound.
        max_ms: u64,
    },

    /// The poll interval would make the toggle loop spin.
    #[error("poll interval must be at least 1ms")]
    ZeroPollInterval,

    /// The TOML source did not parse.
    #[error("config parse failed: {0}")]
    Parse(String),
}

/// Errors from [`TrafficLight`](crate::TrafficLight) lifecycle operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightError {
    /// `start` was called while the toggle thread is already running.
    ///
    /// A second uncoordinated toggle thread would corrupt the alternation
    /// invariant, so this is rejected instead of spawned.
    #[error("toggle loop already running")]
    AlreadyRunning,

    /// `shutdown` was called before `start`.
    #[error("toggle loop not running")]
    NotRunning,
}

/// Result type for light lifecycle operations.
pub type LightResult<T> = Result<T, LightError>;
