//! # Vehicle Glue
//!
//! A vehicle is a thread that arrives at the intersection, snapshots the
//! phase, blocks in `wait_for_green` when the light is red, then crosses and
//! reports back. Deliberately thin: everything interesting lives in the
//! light; this is the collaborator that exercises it.

use crate::light::TrafficLight;
use junction_core::Phase;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Record of one vehicle clearing the intersection.
#[derive(Clone, Copy, Debug)]
pub struct Crossing {
    /// Which vehicle crossed.
    pub vehicle_id: u32,
    /// True if the vehicle arrived at a red light and had to wait.
    pub waited: bool,
    /// Time from arrival to crossing.
    pub wait_time: Duration,
}

/// A vehicle approaching the intersection.
#[derive(Clone, Copy, Debug)]
pub struct Vehicle {
    id: u32,
}

impl Vehicle {
    /// Creates a vehicle with the given id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Drives up to the light on its own thread.
    ///
    /// Arrives, waits for green if the light is red, then reports a
    /// [`Crossing`] on `report`. A closed report channel is ignored; the
    /// vehicle has already crossed.
    pub fn drive(
        self,
        light: Arc<TrafficLight>,
        report: crossbeam_channel::Sender<Crossing>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            let arrived = Instant::now();

            let waited = light.current_phase() != Phase::Green;
            if waited {
                light.wait_for_green();
            }

            let _ = report.send(Crossing {
                vehicle_id: self.id,
                waited,
                wait_time: arrived.elapsed(),
            });
        })
    }
}
