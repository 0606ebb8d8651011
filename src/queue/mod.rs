//! Multi-Priority Queue Component
//!
//! A thread-safe FIFO queue with four fixed priority levels and a coalesced,
//! non-blocking readiness signal, for any number of producers and consumers.
//!
//! # Overview
//!
//! - **Strict Priority**: all `Critical` items leave before any `High`,
//!   before any `Normal`, before any `Low`
//! - **FIFO Within Level**: items of equal priority leave in append order
//! - **Readiness Signal**: a single-slot mailbox consumers block on instead
//!   of polling; bursts of appends coalesce into one pending token
//! - **Drain On Empty**: finding the queue empty clears any stale token, so a
//!   waiter never spins on a queue with nothing in it
//!
//! # Architecture
//!
//! ```text
//!  ┌────────────┐  ┌────────────┐             ┌────────────┐
//!  │ Producer A │  │ Producer B │             │ Consumer X │◄── wait()
//!  └─────┬──────┘  └─────┬──────┘             └─────▲──────┘
//!        │ append        │ append_priority          │ next()
//!        ▼               ▼                          │
//! ┌────────────────────────────────────────────────┴────────┐
//! │                PriorityQueue (one mutex)                 │
//! │   critical ┌──┬──┐                                       │
//! │   high     ┌──┬──┬──┐                                    │
//! │   normal   ┌──┐                     mailbox [token?]     │
//! │   low      ┌──┬──┬──┬──┐                                 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use prioq::queue::{PriorityQueue, Priority};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let queue = Arc::new(PriorityQueue::new());
//!
//! let consumer = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || {
//!         let ready = queue.signal();
//!         while ready.wait() {
//!             while let Some(job) = queue.next() {
//!                 println!("Processing: {}", job);
//!             }
//!         }
//!     })
//! };
//!
//! queue.append("routine");
//! queue.append_priority("urgent", Priority::Critical);
//! # drop(consumer);
//! ```

pub mod api;
mod error;
mod internal;
mod priority;
mod priority_queue;
mod signal;

pub use error::{QueueError, QueueResult};
pub use priority::{Priority, LEVEL_COUNT};
pub use priority_queue::PriorityQueue;
pub use signal::Readiness;

#[cfg(test)]
mod tests;
