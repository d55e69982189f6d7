//! # Queue-Per-Waiter Broadcast
//!
//! A consume-once queue serves exactly one waiter per value: whichever
//! consumer wins the lock removes the item and everyone else keeps waiting.
//! When N independent waiters must each observe every value - every vehicle
//! held at the same red light - the producer needs fan-out instead.
//!
//! [`Broadcast`] keeps one [`EventQueue`] per live subscriber. `send` clones
//! the value into every registered queue; each subscriber drains its own and
//! competes with nobody. Dropping a [`Subscription`] unregisters its queue so
//! the producer stops filling it.

use crate::queue::EventQueue;
use parking_lot::Mutex;
use std::ops::Deref;
use std::sync::Arc;

/// Fan-out sender: one queue per live subscriber.
///
/// Sending with no subscribers is a no-op, mirroring the fire-and-forget
/// contract of the underlying queue's `send`.
#[derive(Debug)]
pub struct Broadcast<T> {
    /// Live subscriber queues. Guarded registry; the queues themselves carry
    /// their own locks.
    subscribers: Arc<Mutex<Vec<Arc<EventQueue<T>>>>>,
}

impl<T> Broadcast<T> {
    /// Creates a broadcast with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Registers a fresh queue and returns the handle that drains it.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        let queue = Arc::new(EventQueue::new());
        self.subscribers.lock().push(Arc::clone(&queue));
        Subscription {
            queue,
            registry: Arc::clone(&self.subscribers),
        }
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl<T: Clone> Broadcast<T> {
    /// Delivers a copy of `value` to every live subscription.
    ///
    /// Each subscriber's queue gets its own clone and its own wakeup; no two
    /// subscribers ever compete for the same item.
    pub fn send(&self, value: T) {
        let subs = self.subscribers.lock();
        for queue in subs.iter() {
            queue.send(value.clone());
        }
    }
}

impl<T> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A live subscription to a [`Broadcast`].
///
/// Derefs to its private [`EventQueue`], so `receive`/`receive_timeout` work
/// directly on the handle. Dropping the handle unregisters the queue.
#[derive(Debug)]
pub struct Subscription<T> {
    queue: Arc<EventQueue<T>>,
    registry: Arc<Mutex<Vec<Arc<EventQueue<T>>>>>,
}

impl<T> Deref for Subscription<T> {
    type Target = EventQueue<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.queue
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        let mut subs = self.registry.lock();
        subs.retain(|q| !Arc::ptr_eq(q, &self.queue));
    }
}
