//! # JUNCTION Core Primitives
//!
//! Synchronization building blocks for the intersection simulation:
//! - One background producer, any number of waiting consumer threads
//! - Wake-on-arrival, never poll a shared buffer
//! - No waiter can observe a torn or out-of-domain value
//!
//! ## Architecture Rules
//!
//! 1. **All buffer access happens under the queue's own lock** - never a
//!    caller-supplied one
//! 2. **Condvar waits release the lock while suspended** - and reacquire it
//!    before touching the buffer again
//! 3. **Shared scalars are atomics** - the phase cell is readable from any
//!    thread without blocking
//!
//! ## Example
//!
//! ```rust,ignore
//! use junction_core::{EventQueue, Phase};
//!
//! let queue = EventQueue::new();
//! queue.send(Phase::Green);
//! assert_eq!(queue.receive(), Phase::Green);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod broadcast;
pub mod phase;
pub mod queue;

pub use broadcast::{Broadcast, Subscription};
pub use phase::{AtomicPhase, Phase};
pub use queue::EventQueue;
