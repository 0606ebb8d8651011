//! Public API for the queue system
//!
//! External modules should import from here rather than directly from
//! internal modules. See the module documentation for usage and design.

// Core queue
pub use crate::queue::priority_queue::PriorityQueue;
pub use crate::queue::signal::Readiness;

// Priority levels
pub use crate::queue::priority::{Priority, LEVEL_COUNT};

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};
