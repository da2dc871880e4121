//! core::factory
//!
//! Creates empty structures from record tags.
//!
//! The factory only interprets the tag; the caller hands the full record to
//! the new instance's `deserialize`. It carries the configured [`Limits`]
//! so that loaded and newly created structures share the same bounds.
//!
//! # Example
//!
//! ```
//! use structdb::core::factory::{Factory, Limits};
//! use structdb::core::types::Kind;
//!
//! let factory = Factory::new(Limits::default());
//! let body = factory.create('S').unwrap();
//! assert_eq!(body.kind(), Kind::Stack);
//!
//! assert!(factory.create('X').is_err());
//! ```

use thiserror::Error;

use crate::core::structures::{Array, BinarySearchTree, Body, DoubleList, ForwardList, Queue, Stack};
use crate::core::types::Kind;

/// A tag that names no known structure kind.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unknown structure tag '{0}'")]
pub struct UnknownTag(pub char);

/// Size bounds applied to new structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Capacity an unsized array grows to first
    pub array_initial_capacity: usize,
    /// Maximum stack size
    pub stack_capacity: usize,
    /// Maximum queue size
    pub queue_capacity: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            array_initial_capacity: Array::INITIAL_CAPACITY,
            stack_capacity: Stack::DEFAULT_CAPACITY,
            queue_capacity: Queue::DEFAULT_CAPACITY,
        }
    }
}

/// Builds empty structure bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct Factory {
    limits: Limits,
}

impl Factory {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// An empty body for the given record tag.
    ///
    /// # Errors
    ///
    /// [`UnknownTag`] if the tag names no kind.
    pub fn create(&self, tag: char) -> Result<Body, UnknownTag> {
        let kind = Kind::from_tag(tag).ok_or(UnknownTag(tag))?;
        Ok(self.empty(kind))
    }

    /// An empty body of `kind`.
    pub fn empty(&self, kind: Kind) -> Body {
        match kind {
            Kind::Array => Body::Array(Array::with_initial_capacity(
                self.limits.array_initial_capacity,
            )),
            Kind::ForwardList => Body::ForwardList(ForwardList::new()),
            Kind::DoubleList => Body::DoubleList(DoubleList::new()),
            Kind::Stack => Body::Stack(Stack::with_capacity(self.limits.stack_capacity)),
            Kind::Queue => Body::Queue(Queue::with_capacity(self.limits.queue_capacity)),
            Kind::Tree => Body::Tree(BinarySearchTree::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_creates_its_kind() {
        let factory = Factory::default();
        for kind in Kind::ALL {
            let body = factory.create(kind.tag()).unwrap();
            assert_eq!(body.kind(), kind);
            assert!(body.is_empty());
        }
    }

    #[test]
    fn unknown_tag() {
        let factory = Factory::default();
        assert_eq!(factory.create('Z'), Err(UnknownTag('Z')));
        assert_eq!(factory.create('m'), Err(UnknownTag('m')));
        assert_eq!(UnknownTag('Z').to_string(), "unknown structure tag 'Z'");
    }

    #[test]
    fn limits_are_applied() {
        let factory = Factory::new(Limits {
            array_initial_capacity: 3,
            stack_capacity: 1,
            queue_capacity: 2,
        });

        let Body::Stack(mut stack) = factory.empty(Kind::Stack) else {
            panic!("expected a stack");
        };
        stack.push("a").unwrap();
        assert!(stack.push("b").is_err());

        let Body::Queue(queue) = factory.empty(Kind::Queue) else {
            panic!("expected a queue");
        };
        assert_eq!(queue.capacity(), 2);

        let Body::Array(mut array) = factory.empty(Kind::Array) else {
            panic!("expected an array");
        };
        array.push("a");
        assert_eq!(array.capacity(), 3);
    }

    #[test]
    fn default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.array_initial_capacity, 10);
        assert_eq!(limits.stack_capacity, 1000);
        assert_eq!(limits.queue_capacity, 1000);
    }
}
