//! # Blocking Event Queue
//!
//! **The handoff buffer between the toggle loop and its waiters**
//!
//! One producer pushes values, any number of consumers pull them. A consumer
//! with nothing to pull is suspended on a condition variable, not spinning:
//!
//! ```text
//!   Toggle loop ──send──> [Mutex<VecDeque>] ──receive──> Waiter 1
//!                               │                        Waiter 2
//!                          (notify_one)                  Waiter N
//! ```
//!
//! Delivery is strictly FIFO: values go in at the tail and come out at the
//! head, so a single consumer observes sends in exactly the order they were
//! made. Competing consumers each remove a distinct value; which waiter gets
//! the next one is whoever reacquires the lock first after the wakeup.
//!
//! `receive` blocks indefinitely when no producer ever sends. That is the
//! intended contract, not a defect; callers that need a bound use
//! [`EventQueue::receive_timeout`].

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// A thread-safe blocking FIFO queue.
///
/// `send` never blocks; `receive` suspends the caller until a value is
/// available. All buffer access happens under the queue's own mutex, and the
/// condvar wait releases that mutex while the thread is suspended.
#[derive(Debug)]
pub struct EventQueue<T> {
    /// Pending values, tail-in head-out.
    buffer: Mutex<VecDeque<T>>,
    /// Signaled whenever the buffer becomes non-empty.
    not_empty: Condvar,
}

impl<T> EventQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
        }
    }

    /// Appends a value and wakes one blocked consumer.
    ///
    /// Never blocks the caller beyond the O(1) push under the lock. If no
    /// consumer is waiting, the value stays buffered for the next `receive`.
    pub fn send(&self, value: T) {
        let mut buf = self.buffer.lock();
        buf.push_back(value);
        self.not_empty.notify_one();
    }

    /// Removes and returns the oldest value, blocking until one exists.
    ///
    /// Suspends the calling thread while the buffer is empty; the wait
    /// atomically releases the lock and reacquires it before the removal.
    /// Blocks forever if nothing is ever sent.
    pub fn receive(&self) -> T {
        let mut buf = self.buffer.lock();
        loop {
            if let Some(value) = buf.pop_front() {
                return value;
            }
            self.not_empty.wait(&mut buf);
        }
    }

    /// Like [`EventQueue::receive`], but gives up after `timeout`.
    ///
    /// Returns `None` if no value arrived before the deadline. Spurious
    /// wakeups do not extend the deadline.
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut buf = self.buffer.lock();
        loop {
            if let Some(value) = buf.pop_front() {
                return Some(value);
            }
            if self.not_empty.wait_until(&mut buf, deadline).timed_out() {
                return buf.pop_front();
            }
        }
    }

    /// Removes and returns the oldest value if one is already buffered.
    pub fn try_receive(&self) -> Option<T> {
        self.buffer.lock().pop_front()
    }

    /// Returns the number of buffered values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    /// Returns true if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
