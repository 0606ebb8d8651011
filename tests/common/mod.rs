//! Common test utilities and helpers

use prioq::queue::api::{Priority, PriorityQueue};
use std::time::Duration;

/// Upper bound for any single readiness wait in tests
pub const WAIT: Duration = Duration::from_secs(5);

/// Pop everything currently queued, in delivery order
pub fn drain<T>(queue: &PriorityQueue<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Some(item) = queue.next() {
        items.push(item);
    }
    items
}

/// Queue pre-filled with `(priority, label)` pairs, tagged with their priority
pub fn queue_with(entries: &[(Priority, &'static str)]) -> PriorityQueue<(Priority, &'static str)> {
    let queue = PriorityQueue::new();
    for &(priority, label) in entries {
        queue.append_priority((priority, label), priority);
    }
    queue
}
