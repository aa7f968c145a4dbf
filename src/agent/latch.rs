//! One-shot abort latch
//!
//! Tripping the latch, closing the queue and draining it happen under the
//! queue's own lock, so no entry can slip in between the drain and a
//! concurrent discovery enqueue.

use crate::agent::queue::TaskQueue;
use std::sync::atomic::{AtomicBool, Ordering};

/// Result of a [`AbortLatch::trip_and_drain`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trip {
    /// This call flipped the latch; every later call sees `false`
    pub first: bool,

    /// Entries removed from the queue by this call
    pub drained: usize,
}

/// Run-scoped stop signal; once tripped it stays tripped
#[derive(Debug, Default)]
pub struct AbortLatch {
    tripped: AtomicBool,
}

impl AbortLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    /// Trips the latch, then empties and closes `queue` in one critical section
    pub fn trip_and_drain(&self, queue: &TaskQueue) -> Trip {
        let mut inner = queue.lock();
        let first = !self.tripped.swap(true, Ordering::AcqRel);
        let drained = inner.entries.len();
        inner.entries.clear();
        inner.closed = true;
        Trip { first, drained }
    }
}
