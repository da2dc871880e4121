//! core::error
//!
//! Errors raised by the structure engines.
//!
//! Every engine operation either applies fully or leaves the structure
//! untouched and returns one of these.

use thiserror::Error;

/// Errors from operations on a single structure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// Index outside the valid range for the structure.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The offending index
        index: usize,
        /// Length of the structure at the time of the call
        len: usize,
    },

    /// An inclusive range that is inverted or runs past the end.
    #[error("invalid range {start}..={end} for length {len}")]
    InvalidRange {
        /// First index of the range
        start: usize,
        /// Last index of the range (inclusive)
        end: usize,
        /// Length of the structure at the time of the call
        len: usize,
    },

    /// Lookup by value found no match.
    #[error("value not found: {0}")]
    ValueNotFound(String),

    /// Lookup by tree key found no match.
    #[error("key not found: {0}")]
    KeyNotFound(i64),

    /// Tree key already present.
    #[error("key already exists: {0}")]
    DuplicateKey(i64),

    /// Bounded structure is at capacity.
    #[error("capacity of {capacity} elements exceeded")]
    Overflow {
        /// The configured maximum
        capacity: usize,
    },

    /// Pop or peek on an empty structure.
    #[error("structure is empty")]
    Empty,
}

impl StructureError {
    /// Shorthand for an out-of-range error.
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = StructureError::out_of_range(5, 3);
        assert_eq!(err.to_string(), "index 5 out of range for length 3");

        let err = StructureError::InvalidRange {
            start: 3,
            end: 1,
            len: 4,
        };
        assert!(err.to_string().contains("3..=1"));

        assert!(StructureError::DuplicateKey(7).to_string().contains('7'));
        assert!(StructureError::Overflow { capacity: 1000 }
            .to_string()
            .contains("1000"));
        assert_eq!(StructureError::Empty.to_string(), "structure is empty");
    }
}
