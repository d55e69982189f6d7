//! # Toggler Configuration
//!
//! Production runs a 4-6 second dwell and a 1ms poll. Both are tunables,
//! loaded once at startup and validated before the toggle thread ever
//! spawns. The simulation tests run the same controller with a dwell range
//! two orders of magnitude shorter.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the toggle loop.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TogglerConfig {
    /// Minimum dwell before a toggle (ms).
    pub dwell_min_ms: u64,
    /// Maximum dwell before a toggle (ms).
    pub dwell_max_ms: u64,
    /// Sleep between elapsed-time checks (ms). Bounds toggle latency and CPU
    /// use without a timer facility.
    pub poll_interval_ms: u64,
    /// Fixed RNG seed for reproducible dwell sequences. `None` seeds from
    /// the system clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TogglerConfig {
    fn default() -> Self {
        Self {
            dwell_min_ms: 4_000,
            dwell_max_ms: 6_000,
            poll_interval_ms: 1,
            seed: None,
        }
    }
}

impl TogglerConfig {
    /// Short-dwell config for tests and demos.
    ///
    /// Same controller, two orders of magnitude faster, so a full
    /// red-green-red observation fits in well under a second.
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            dwell_min_ms: 60,
            dwell_max_ms: 120,
            poll_interval_ms: 1,
            seed: None,
        }
    }

    /// Checks the configured values for nonsense.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidDwellRange`] if the range is empty, inverted, or
    /// starts at zero; [`ConfigError::ZeroPollInterval`] if the loop would
    /// spin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dwell_min_ms == 0 || self.dwell_min_ms > self.dwell_max_ms {
            return Err(ConfigError::InvalidDwellRange {
                min_ms: self.dwell_min_ms,
                max_ms: self.dwell_max_ms,
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Parses and validates a TOML config.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed TOML, plus everything
    /// [`TogglerConfig::validate`] rejects.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The poll interval as a [`Duration`].
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
