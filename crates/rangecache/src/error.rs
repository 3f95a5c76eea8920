//! Error types for rangecache

use std::fmt;

/// Result type alias for rangecache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache and range-sum operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Query range is empty or runs past the end of the array
    InvalidRange {
        /// Requested left bound
        left: usize,
        /// Requested right bound (inclusive)
        right: usize,
        /// Array length
        len: usize,
    },

    /// Update index is outside the array
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Array length
        len: usize,
    },

    /// Range sum does not fit in an `i64`
    SumOverflow {
        /// Left bound of the range
        left: usize,
        /// Right bound of the range (inclusive)
        right: usize,
    },

    /// Cache capacity must be at least 1
    InvalidCapacity(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRange { left, right, len } => write!(
                f,
                "Invalid range [{}, {}] for array of length {}",
                left, right, len
            ),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for array of length {}", index, len)
            }
            Error::SumOverflow { left, right } => {
                write!(f, "Sum over [{}, {}] overflows i64", left, right)
            }
            Error::InvalidCapacity(capacity) => {
                write!(f, "Invalid cache capacity: {} (must be at least 1)", capacity)
            }
        }
    }
}

impl std::error::Error for Error {}
