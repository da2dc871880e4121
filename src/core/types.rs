//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`StructureName`] - Validated name of a stored structure
//! - [`Kind`] - The closed set of structure variants and their record tags
//!
//! # Validation
//!
//! Names are written into a whitespace-separated record format, so they are
//! validated at construction time. An invalid name cannot be represented.
//!
//! # Examples
//!
//! ```
//! use structdb::core::types::{Kind, StructureName};
//!
//! let name = StructureName::new("numbers").unwrap();
//! assert_eq!(name.as_str(), "numbers");
//! assert!(StructureName::new("two words").is_err());
//!
//! assert_eq!(Kind::from_tag('T'), Some(Kind::Tree));
//! assert_eq!(Kind::DoubleList.tag(), 'L');
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid structure name: {0}")]
    InvalidName(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Validate a single record token (a stored value or a name).
///
/// Tokens must be non-empty and free of whitespace, otherwise they would not
/// survive a write/read cycle through the record format.
///
/// # Example
///
/// ```
/// use structdb::core::types::validate_token;
///
/// assert!(validate_token("apple").is_ok());
/// assert!(validate_token("").is_err());
/// assert!(validate_token("a b").is_err());
/// ```
pub fn validate_token(token: &str) -> Result<(), TypeError> {
    if token.is_empty() {
        return Err(TypeError::InvalidValue("value cannot be empty".into()));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(TypeError::InvalidValue(format!(
            "value '{}' cannot contain whitespace",
            token.escape_debug()
        )));
    }
    Ok(())
}

/// A validated structure name.
///
/// Names must be non-empty and must not contain whitespace.
///
/// # Example
///
/// ```
/// use structdb::core::types::StructureName;
///
/// let name = StructureName::new("queue-1").unwrap();
/// assert_eq!(name.to_string(), "queue-1");
///
/// assert!(StructureName::new("").is_err());
/// assert!(StructureName::new("tab\tname").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StructureName(String);

impl StructureName {
    /// The name used when a query does not address a structure explicitly.
    pub const DEFAULT: &'static str = "default";

    /// Create a new validated structure name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidName` if the name is empty or contains whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidName("name cannot be empty".into()));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidName(format!(
                "name '{}' cannot contain whitespace",
                name.escape_debug()
            )));
        }
        Ok(Self(name))
    }

    /// The `default` structure name.
    pub fn default_name() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StructureName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<StructureName> for String {
    fn from(name: StructureName) -> Self {
        name.0
    }
}

impl AsRef<str> for StructureName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for StructureName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StructureName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of a stored structure.
///
/// Each kind owns a one-character tag that leads its persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Resizable array of strings (`M`)
    Array,
    /// Singly-linked list (`F`)
    ForwardList,
    /// Doubly-linked list (`L`)
    DoubleList,
    /// LIFO adapter over a forward list (`S`)
    Stack,
    /// Bounded FIFO adapter over a forward list (`Q`)
    Queue,
    /// Binary search tree over integer keys (`T`)
    Tree,
}

impl Kind {
    /// All kinds, in tag order of the record format.
    pub const ALL: [Kind; 6] = [
        Kind::Array,
        Kind::ForwardList,
        Kind::DoubleList,
        Kind::Stack,
        Kind::Queue,
        Kind::Tree,
    ];

    /// The record tag for this kind.
    pub const fn tag(self) -> char {
        match self {
            Kind::Array => 'M',
            Kind::ForwardList => 'F',
            Kind::DoubleList => 'L',
            Kind::Stack => 'S',
            Kind::Queue => 'Q',
            Kind::Tree => 'T',
        }
    }

    /// Look up a kind by its record tag.
    pub fn from_tag(tag: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Human-readable name, as used in rendered output.
    pub const fn display_name(self) -> &'static str {
        match self {
            Kind::Array => "Array",
            Kind::ForwardList => "ForwardList",
            Kind::DoubleList => "DoubleList",
            Kind::Stack => "Stack",
            Kind::Queue => "Queue",
            Kind::Tree => "BinarySearchTree",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
