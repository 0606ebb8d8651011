//! Internal per-level storage
//!
//! `Levels` is the unsynchronised state behind the queue lock: one FIFO
//! sequence per priority level. Items are moved out on pop so a dequeued
//! item is never retained by a sequence slot.

use crate::queue::priority::{Priority, LEVEL_COUNT};
use std::collections::VecDeque;

/// One FIFO sequence per priority level, indexed by `Priority::index`
#[derive(Debug)]
pub(crate) struct Levels<T> {
    sequences: [VecDeque<T>; LEVEL_COUNT],
}

impl<T> Levels<T> {
    pub(crate) fn new() -> Self {
        Self {
            sequences: std::array::from_fn(|_| VecDeque::new()),
        }
    }

    /// Append to the tail of the level's sequence
    pub(crate) fn push(&mut self, item: T, priority: Priority) {
        self.sequences[priority.index()].push_back(item);
    }

    /// Remove the head of the highest non-empty level
    pub(crate) fn pop(&mut self) -> Option<(T, Priority)> {
        Priority::highest_first().find_map(|priority| {
            self.sequences[priority.index()]
                .pop_front()
                .map(|item| (item, priority))
        })
    }

    /// Borrow the item `pop` would return
    pub(crate) fn front(&self) -> Option<&T> {
        Priority::highest_first().find_map(|priority| self.sequences[priority.index()].front())
    }

    pub(crate) fn len(&self) -> usize {
        self.sequences.iter().map(VecDeque::len).sum()
    }

    pub(crate) fn len_priority(&self, priority: Priority) -> usize {
        self.sequences[priority.index()].len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sequences.iter().all(VecDeque::is_empty)
    }
}
