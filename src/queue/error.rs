//! Queue Error Types
//!
//! Queue operations themselves never fail; these errors only arise at the
//! edges, when text from a user or a config file is turned into queue types.

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Invalid priority: '{value}' (expected low, normal, high or critical)")]
    InvalidPriority { value: String },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
