//! Priority levels for the queue
//!
//! Four fixed ranks, ordered lowest to highest precedence. Dequeue order is
//! decided purely by rank; arrival time only matters within a level.

use crate::queue::error::{QueueError, QueueResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Number of priority levels
pub const LEVEL_COUNT: usize = 4;

/// Priority level for queued items
///
/// The derived ordering follows declaration order, so
/// `Low < Normal < High < Critical`.
#[derive(
    EnumIter, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Priority {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Low => &[],
            Self::Normal => &["norm", "default"],
            Self::High => &[],
            Self::Critical => &["crit"],
        }
    }

    /// Slot of this level in per-level storage
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Levels in dequeue order, highest precedence first
    pub fn highest_first() -> impl Iterator<Item = Priority> {
        Self::iter().rev()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Priority {
    type Err = QueueError;

    fn from_str(s: &str) -> QueueResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::iter()
            .find(|p| p.name() == wanted || p.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| QueueError::InvalidPriority {
                value: s.to_string(),
            })
    }
}
