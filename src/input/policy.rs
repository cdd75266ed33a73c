use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What to do when a line does not fit in the scratch buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Keep the first `capacity - 1` bytes and leave the rest of the line in the stream.
    #[default]
    Truncate,
    /// Discard the rest of the line and fail with `LineTooLong`.
    Reject,
    /// Ignore the capacity and read the whole line.
    Grow,
}

impl OverflowPolicy {
    /// Maximum number of bytes (terminator included) one read may take,
    /// or `None` when unbounded.
    pub fn limit(self, capacity: usize) -> Option<usize> {
        match self {
            OverflowPolicy::Grow => None,
            _ => Some(capacity.saturating_sub(1)),
        }
    }
}
