//! PriorityQueue - thread-safe multi-level FIFO
//!
//! All four level sequences and the readiness mailbox sit behind one mutex,
//! so every operation is a single short critical section. No operation holds
//! the lock while a caller waits or while a caller's callback runs.

use crate::queue::internal::Levels;
use crate::queue::priority::Priority;
use crate::queue::signal::{Mailbox, Readiness};
use parking_lot::Mutex;
use std::fmt;

/// State guarded by the queue lock
struct Inner<T> {
    levels: Levels<T>,
    mailbox: Mailbox,
}

/// Multi-producer, multi-consumer priority queue
///
/// Items are dequeued highest priority first and, within a level, in the
/// order their appends acquired the lock. Share between threads with
/// `Arc<PriorityQueue<T>>`.
///
/// # Example
///
/// ```rust
/// use prioq::queue::{PriorityQueue, Priority};
///
/// let queue = PriorityQueue::new();
/// queue.append_priority("a", Priority::Low);
/// queue.append_priority("b", Priority::Critical);
/// queue.append("c");
///
/// let mut seen = Vec::new();
/// queue.process(|item| seen.push(item));
/// assert_eq!(seen, vec!["b", "c", "a"]);
/// assert!(queue.is_empty());
/// ```
pub struct PriorityQueue<T> {
    inner: Mutex<Inner<T>>,
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                levels: Levels::new(),
                mailbox: Mailbox::new(),
            }),
        }
    }

    /// Append an item at `Priority::Normal`
    pub fn append(&self, item: T) {
        self.append_priority(item, Priority::Normal);
    }

    /// Append an item to the tail of its priority level
    ///
    /// Never fails and never blocks beyond the lock. Leaves a readiness
    /// token pending; if one already is, nothing more is signalled.
    pub fn append_priority(&self, item: T, priority: Priority) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        inner.levels.push(item, priority);
        let signalled = inner.mailbox.deposit();

        log::trace!(
            "queued item at {} (len {}, signalled {})",
            priority,
            inner.levels.len(),
            signalled
        );
    }

    /// Readiness handle for blocking consumers
    ///
    /// The mailbox is repaired first: a stale token from an emptied queue is
    /// dropped, and a token is guaranteed pending if items are queued.
    pub fn signal(&self) -> Readiness {
        let guard = self.inner.lock();
        guard.mailbox.repair(!guard.levels.is_empty());
        guard.mailbox.readiness()
    }

    /// Remove and return the highest-priority, oldest item
    ///
    /// `None` is the ordinary "nothing queued" result; it also drains any
    /// pending readiness token. After a successful pop the token is kept
    /// pending only if more items remain.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Option<T> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        match inner.levels.pop() {
            Some((item, priority)) => {
                inner.mailbox.repair(!inner.levels.is_empty());
                log::trace!(
                    "dequeued item from {} (len {})",
                    priority,
                    inner.levels.len()
                );
                Some(item)
            }
            None => {
                if inner.mailbox.drain() {
                    log::trace!("drained stale readiness token from empty queue");
                }
                None
            }
        }
    }

    /// Pop items and hand each to `callback` until the queue is empty
    ///
    /// The lock is taken once per item and released before the callback
    /// runs, so producers may keep appending and other consumers may take
    /// items during the loop. Returns how many items this call processed.
    pub fn process<F>(&self, mut callback: F) -> usize
    where
        F: FnMut(T),
    {
        let mut processed = 0;
        while let Some(item) = self.next() {
            callback(item);
            processed += 1;
        }
        processed
    }

    /// True when no level holds an item
    pub fn is_empty(&self) -> bool {
        self.inner.lock().levels.is_empty()
    }

    /// Total number of queued items across all levels
    pub fn len(&self) -> usize {
        self.inner.lock().levels.len()
    }

    /// Number of items queued at one level
    pub fn len_priority(&self, priority: Priority) -> usize {
        self.inner.lock().levels.len_priority(priority)
    }

    #[cfg(test)]
    pub(crate) fn token_pending(&self) -> bool {
        self.inner.lock().mailbox.is_pending()
    }
}

impl<T: Clone> PriorityQueue<T> {
    /// Return a copy of the item `next()` would return, without removing it
    ///
    /// The readiness signal is left untouched.
    pub fn peek(&self) -> Option<T> {
        self.inner.lock().levels.front().cloned()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.inner.lock();
        let mut dbg = f.debug_struct("PriorityQueue");
        for priority in Priority::highest_first() {
            dbg.field(priority.name(), &guard.levels.len_priority(priority));
        }
        dbg.field("ready", &guard.mailbox.is_pending()).finish()
    }
}
