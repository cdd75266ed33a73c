//! Error types for reading prompted lines.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to allocate line buffer: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("Line exceeds buffer capacity of {capacity} bytes")]
    LineTooLong { capacity: usize },

    #[error("Invalid buffer capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    #[error("Failed to parse config: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ReadError>;
