//! core::record
//!
//! The line-oriented record format and the persistence contract shared by
//! every structure variant.
//!
//! # Format
//!
//! One structure per line, whitespace-separated:
//!
//! ```text
//! TAG NAME COUNT VALUE*
//! ```
//!
//! `TAG` is one of `M F L S Q T` (see [`Kind::tag`]), `COUNT` is a
//! non-negative integer and exactly `COUNT` value tokens follow.
//!
//! # Example
//!
//! ```
//! use structdb::core::record::Record;
//! use structdb::core::types::Kind;
//!
//! let record = Record::parse("L letters 3 a b c").unwrap();
//! assert_eq!(record.kind, Kind::DoubleList);
//! assert_eq!(record.name.as_str(), "letters");
//! assert_eq!(record.values, vec!["a", "b", "c"]);
//! assert_eq!(record.to_string(), "L letters 3 a b c");
//!
//! // Declared count larger than the available values
//! assert!(Record::parse("L letters 4 a b c").is_err());
//! ```

use std::fmt;

use thiserror::Error;

use crate::core::error::StructureError;
use crate::core::types::{Kind, StructureName, TypeError};

/// Errors from parsing or applying a persisted record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record is empty")]
    Empty,

    #[error("unknown structure tag '{0}'")]
    UnknownTag(String),

    #[error("record has no structure name")]
    MissingName,

    #[error("{0}")]
    InvalidName(#[from] TypeError),

    #[error("record has no element count")]
    MissingCount,

    #[error("invalid element count '{0}'")]
    InvalidCount(String),

    #[error("record declares {expected} elements but has {found}")]
    Truncated { expected: usize, found: usize },

    #[error("record declares {expected} elements but has {found} trailing tokens")]
    TrailingTokens { expected: usize, found: usize },

    #[error("expected a {expected} record, found a {found} record")]
    KindMismatch { expected: Kind, found: Kind },

    #[error("invalid tree key '{0}'")]
    InvalidKey(String),

    #[error("cannot rebuild structure: {0}")]
    Structure(#[from] StructureError),
}

/// One parsed line of the database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Kind named by the leading tag
    pub kind: Kind,
    /// Structure name
    pub name: StructureName,
    /// Element tokens in canonical order
    pub values: Vec<String>,
}

impl Record {
    /// Create a record from its parts.
    pub fn new(kind: Kind, name: StructureName, values: Vec<String>) -> Self {
        Self { kind, name, values }
    }

    /// Parse a single line.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] describing the first inconsistency found.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let mut tokens = line.split_whitespace();

        let tag = tokens.next().ok_or(RecordError::Empty)?;
        let kind = single_char(tag)
            .and_then(Kind::from_tag)
            .ok_or_else(|| RecordError::UnknownTag(tag.to_string()))?;

        let name = tokens.next().ok_or(RecordError::MissingName)?;
        let name = StructureName::new(name)?;

        let count = tokens.next().ok_or(RecordError::MissingCount)?;
        let count: usize = count
            .parse()
            .map_err(|_| RecordError::InvalidCount(count.to_string()))?;

        let values: Vec<String> = tokens.map(str::to_string).collect();
        if values.len() < count {
            return Err(RecordError::Truncated {
                expected: count,
                found: values.len(),
            });
        }
        if values.len() > count {
            return Err(RecordError::TrailingTokens {
                expected: count,
                found: values.len() - count,
            });
        }

        Ok(Self { kind, name, values })
    }

    /// Number of elements carried by the record.
    pub fn count(&self) -> usize {
        self.values.len()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind.tag(), self.name, self.values.len())?;
        for value in &self.values {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

/// Read the leading tag of a line without interpreting the rest.
///
/// Returns `None` for blank lines and for a leading token that is not a
/// single character.
pub fn leading_tag(line: &str) -> Option<char> {
    line.split_whitespace().next().and_then(single_char)
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// The uniform persistence contract.
///
/// Implementors describe their canonical element order through
/// [`to_tokens`](Persist::to_tokens) and how to rebuild from that order
/// through [`push_token`](Persist::push_token). The provided
/// [`serialize`](Persist::serialize) and [`deserialize`](Persist::deserialize)
/// turn those into records.
pub trait Persist: Sized {
    /// The kind written into every record of this type.
    const KIND: Kind;

    /// Elements in canonical external order.
    fn to_tokens(&self) -> Vec<String>;

    /// An empty instance carrying the same configuration (capacity limits).
    fn empty_like(&self) -> Self;

    /// Append one element while rebuilding from canonical order.
    fn push_token(&mut self, token: &str) -> Result<(), RecordError>;

    /// Render the structure as one record line (without a newline).
    fn serialize(&self, name: &StructureName) -> String {
        Record::new(Self::KIND, name.clone(), self.to_tokens()).to_string()
    }

    /// Replace the contents of `self` with the elements of `line`.
    ///
    /// The new contents are built into a fresh instance and swapped in only
    /// after every token was accepted, so on error `self` is unchanged.
    /// Returns the name stored in the record.
    fn deserialize(&mut self, line: &str) -> Result<StructureName, RecordError> {
        let record = Record::parse(line)?;
        if record.kind != Self::KIND {
            return Err(RecordError::KindMismatch {
                expected: Self::KIND,
                found: record.kind,
            });
        }

        let mut fresh = self.empty_like();
        for token in &record.values {
            fresh.push_token(token)?;
        }
        *self = fresh;

        Ok(record.name)
    }
}
