//! # Traffic Light Controller
//!
//! Owns the phase state machine and the dedicated thread that drives it.
//!
//! ## Toggle loop
//!
//! The loop sleeps one poll interval, checks elapsed time against the current
//! dwell threshold, and on expiry: flips the phase, publishes it (atomic cell
//! first, then broadcast), resets the baseline and redraws the threshold.
//! Each cycle's dwell is an independent uniform draw, so consecutive red and
//! green dwells are unrelated.
//!
//! Timing state - the baseline `Instant`, the RNG, the drawn threshold - is
//! local to the loop. No other thread can reach it.
//!
//! ## Waiters
//!
//! `wait_for_green` subscribes to the broadcast and drains its private queue
//! until a green arrives. Every concurrent waiter holds its own queue, so a
//! single toggle to green releases all of them; nobody competes for a
//! consume-once item.

use crate::config::TogglerConfig;
use crate::error::{LightError, LightResult};
use junction_core::{AtomicPhase, Broadcast, Phase, Subscription};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Observed toggle timing statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToggleStats {
    /// Toggles performed since start.
    pub total_toggles: u64,
    /// Shortest observed dwell (ms).
    pub min_dwell_ms: u64,
    /// Longest observed dwell (ms).
    pub max_dwell_ms: u64,
    /// Most recent dwell (ms).
    pub last_dwell_ms: u64,
}

/// The traffic light: phase state plus the autonomous toggle loop.
///
/// Constructed red with no thread running. [`TrafficLight::start`] spawns
/// exactly one toggle thread; a second call is an error rather than a second
/// uncoordinated toggler. Dropping the light stops and joins the thread.
#[derive(Debug)]
pub struct TrafficLight {
    /// Current phase, readable from any thread.
    phase: Arc<AtomicPhase>,
    /// Fan-out of toggle events, shared with the toggle thread.
    events: Arc<Broadcast<Phase>>,
    /// Toggle thread handle.
    toggler: Option<JoinHandle<()>>,
    /// Stop flag checked once per poll.
    shutdown: Arc<AtomicBool>,
    /// Timing tunables.
    config: TogglerConfig,
    /// Observed toggle timings.
    stats: Arc<Mutex<ToggleStats>>,
}

impl TrafficLight {
    /// Creates a red light with the default 4-6s dwell range.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TogglerConfig::default())
    }

    /// Creates a red light with the given (already validated) config.
    ///
    /// Call [`TogglerConfig::validate`] first when the values come from
    /// outside; the constructor trusts them.
    #[must_use]
    pub fn with_config(config: TogglerConfig) -> Self {
        Self {
            phase: Arc::new(AtomicPhase::new(Phase::Red)),
            events: Arc::new(Broadcast::new()),
            toggler: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            config,
            stats: Arc::new(Mutex::new(ToggleStats {
                total_toggles: 0,
                min_dwell_ms: u64::MAX,
                max_dwell_ms: 0,
                last_dwell_ms: 0,
            })),
        }
    }

    /// Starts the autonomous toggle loop.
    ///
    /// # Errors
    ///
    /// [`LightError::AlreadyRunning`] if the loop is already up.
    pub fn start(&mut self) -> LightResult<()> {
        if self.toggler.is_some() {
            return Err(LightError::AlreadyRunning);
        }
        self.shutdown.store(false, Ordering::SeqCst);

        let phase = Arc::clone(&self.phase);
        let events = Arc::clone(&self.events);
        let shutdown = Arc::clone(&self.shutdown);
        let stats = Arc::clone(&self.stats);
        let config = self.config.clone();

        self.toggler = Some(thread::spawn(move || {
            Self::toggle_loop(&phase, &events, &shutdown, &stats, &config);
        }));

        tracing::info!(
            "toggle loop started (dwell {}..={}ms, poll {}ms)",
            self.config.dwell_min_ms,
            self.config.dwell_max_ms,
            self.config.poll_interval_ms
        );
        Ok(())
    }

    /// Toggle thread main loop.
    fn toggle_loop(
        phase: &AtomicPhase,
        events: &Broadcast<Phase>,
        shutdown: &AtomicBool,
        stats: &Mutex<ToggleStats>,
        config: &TogglerConfig,
    ) {
        // Timing state stays on this stack frame. Nothing outside the loop
        // may touch the baseline or the RNG.
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(clock_seed));
        let mut baseline = Instant::now();
        let mut dwell = Duration::from_millis(rng.gen_range(config.dwell_min_ms..=config.dwell_max_ms));
        let poll = config.poll_interval();

        while !shutdown.load(Ordering::Relaxed) {
            thread::sleep(poll);

            let elapsed = baseline.elapsed();
            if elapsed < dwell {
                continue;
            }

            // Cell first, broadcast second: a waiter woken by the event must
            // already see the new phase through the snapshot accessor.
            let next = phase.load().toggled();
            phase.store(next);
            events.send(next);
            tracing::debug!("phase -> {} after {}ms", next, elapsed.as_millis());

            {
                let observed = elapsed.as_millis() as u64;
                let mut s = stats.lock();
                s.total_toggles += 1;
                s.min_dwell_ms = s.min_dwell_ms.min(observed);
                s.max_dwell_ms = s.max_dwell_ms.max(observed);
                s.last_dwell_ms = observed;
            }

            baseline = Instant::now();
            dwell = Duration::from_millis(rng.gen_range(config.dwell_min_ms..=config.dwell_max_ms));
        }
    }

    /// Returns the instantaneous phase. Never blocks.
    #[inline]
    #[must_use]
    pub fn current_phase(&self) -> Phase {
        self.phase.load()
    }

    /// Blocks until the light toggles to green.
    ///
    /// Strictly event-based: called while the light is already green, this
    /// waits for the *next* green. Callers that want the fast path snapshot
    /// [`TrafficLight::current_phase`] first, as [`Vehicle`](crate::Vehicle)
    /// does. Blocks forever if the toggle loop was never started; starting
    /// the producer is the caller's contract.
    pub fn wait_for_green(&self) {
        let sub = self.events.subscribe();
        loop {
            if sub.receive().is_green() {
                return;
            }
        }
    }

    /// Subscribes to the ordered stream of toggle events.
    ///
    /// Every toggle from now on is delivered to the returned subscription in
    /// send order, independent of any other subscriber.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<Phase> {
        self.events.subscribe()
    }

    /// Returns a snapshot of the toggle statistics.
    ///
    /// `min_dwell_ms` is `u64::MAX` until the first toggle.
    #[must_use]
    pub fn stats(&self) -> ToggleStats {
        *self.stats.lock()
    }

    /// Returns the timing configuration.
    #[must_use]
    pub const fn config(&self) -> &TogglerConfig {
        &self.config
    }

    /// Stops the toggle loop and joins its thread.
    ///
    /// After this returns no further events are broadcast. The light can be
    /// started again.
    ///
    /// # Errors
    ///
    /// [`LightError::NotRunning`] if the loop was never started (or already
    /// stopped).
    pub fn shutdown(&mut self) -> LightResult<()> {
        match self.toggler.take() {
            Some(handle) => {
                self.shutdown.store(true, Ordering::SeqCst);
                let _ = handle.join();
                tracing::info!("toggle loop stopped");
                Ok(())
            }
            None => Err(LightError::NotRunning),
        }
    }
}

impl Default for TrafficLight {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TrafficLight {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.toggler.take() {
            let _ = handle.join();
        }
    }
}

/// Seeds the dwell RNG from the system clock when no fixed seed is set.
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}
