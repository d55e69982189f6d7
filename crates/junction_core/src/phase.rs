//! # Light Phase
//!
//! The two-valued state of the traffic light and its atomic cell.
//!
//! The phase is written by exactly one thread (the toggle loop) and read by
//! arbitrarily many. [`AtomicPhase`] makes that cross-thread read safe by
//! construction: the value lives in an `AtomicU8` with release stores and
//! acquire loads, so no reader ever sees a torn or stale-beyond-one-toggle
//! value and no lock is involved on the read path.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// The phase of the traffic light.
///
/// Exactly two states exist. A plain value type, copied by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Phase {
    /// Vehicles must stop.
    Red = 0,
    /// Vehicles may cross.
    Green = 1,
}

impl Phase {
    /// Returns the other phase.
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Red,
        }
    }

    /// Returns true if vehicles may cross.
    #[inline]
    #[must_use]
    pub const fn is_green(self) -> bool {
        matches!(self, Self::Green)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
        }
    }
}

/// A phase cell readable from any thread without locking.
///
/// One writer (the toggle loop), many readers. Stores use `Release` and loads
/// use `Acquire` so a reader that observes a new phase also observes every
/// write the toggler made before publishing it.
#[derive(Debug)]
pub struct AtomicPhase(AtomicU8);

impl AtomicPhase {
    /// Creates a cell holding `phase`.
    #[must_use]
    pub const fn new(phase: Phase) -> Self {
        Self(AtomicU8::new(phase as u8))
    }

    /// Returns the current phase. Never blocks.
    #[inline]
    #[must_use]
    pub fn load(&self) -> Phase {
        // Only `Phase as u8` values are ever stored; decode is total.
        match self.0.load(Ordering::Acquire) {
            0 => Phase::Red,
            _ => Phase::Green,
        }
    }

    /// Publishes a new phase.
    #[inline]
    pub fn store(&self, phase: Phase) {
        self.0.store(phase as u8, Ordering::Release);
    }
}

impl Default for AtomicPhase {
    fn default() -> Self {
        Self::new(Phase::Red)
    }
}
