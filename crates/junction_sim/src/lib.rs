//! # JUNCTION Simulation
//!
//! A single intersection controlled by an autonomous traffic light.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌──────────────────────────────┐
//!                  │         TrafficLight         │
//!                  │                              │
//!                  │  ┌────────────┐  ┌────────┐  │
//!                  │  │ AtomicPhase│  │Broadcast│ │
//!                  │  └─────▲──────┘  └───▲────┘  │
//!                  │        │             │       │
//!                  │  ┌─────┴─────────────┴────┐  │
//!                  │  │      toggle loop       │  │
//!                  │  │  (dedicated thread)    │  │
//!                  │  └────────────────────────┘  │
//!                  └──────────────────────────────┘
//!                       │                  │
//!              current_phase()      wait_for_green()
//!                       │                  │
//!                  ┌────┴────┐     ┌───────┴────────┐
//!                  │ anyone  │     │ vehicle threads │
//!                  └─────────┘     └────────────────┘
//! ```
//!
//! The toggle loop owns its timing state (baseline instant, RNG, current
//! dwell threshold) as locals. It publishes each flip twice: into the atomic
//! phase cell for snapshot reads, then onto the broadcast for waiters.
//!
//! ## Example
//!
//! ```rust,ignore
//! use junction_sim::{TogglerConfig, TrafficLight};
//!
//! let mut light = TrafficLight::new();
//! light.start()?;
//! light.wait_for_green(); // blocks until the next toggle to green
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod light;
pub mod vehicle;

pub use config::TogglerConfig;
pub use error::{ConfigError, LightError};
pub use light::{ToggleStats, TrafficLight};
pub use vehicle::{Crossing, Vehicle};

pub use junction_core::Phase;
