//! Shared FIFO task queue
//!
//! All workers pull from one queue holding both discovery and action work.
//! Nothing here waits for new entries: a worker that finds the queue empty
//! terminates, because every seed is enqueued up front and every derived item
//! is enqueued before the page that produced it finishes.

use crate::agent::Task;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub(crate) struct QueueInner {
    pub(crate) entries: VecDeque<Task>,
    /// Set when the abort latch trips; refuses all later enqueues
    pub(crate) closed: bool,
}

/// FIFO queue shared by every worker of a run
#[derive(Debug, Default)]
pub struct TaskQueue {
    inner: Mutex<QueueInner>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to the tail
    ///
    /// Returns `false` if the queue was closed by the abort latch and the
    /// entry was dropped.
    pub fn enqueue(&self, task: impl Into<Task>) -> bool {
        let mut inner = self.lock();
        if inner.closed {
            return false;
        }
        inner.entries.push_back(task.into());
        true
    }

    /// Appends a batch under a single lock, returning how many were accepted
    pub fn enqueue_all<I, T>(&self, tasks: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: Into<Task>,
    {
        let mut inner = self.lock();
        if inner.closed {
            return 0;
        }
        let before = inner.entries.len();
        inner.entries.extend(tasks.into_iter().map(Into::into));
        inner.entries.len() - before
    }

    /// Removes and returns the head entry, or `None` when empty
    pub fn try_dequeue(&self) -> Option<Task> {
        self.lock().entries.pop_front()
    }

    pub fn size(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Removes every entry atomically, returning how many were removed
    pub fn drain(&self) -> usize {
        let mut inner = self.lock();
        let removed = inner.entries.len();
        inner.entries.clear();
        removed
    }

    // A panicking worker must not wedge the rest of the pool.
    pub(crate) fn lock(&self) -> MutexGuard<'_, QueueInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
