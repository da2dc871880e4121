//! core::structures::stack
//!
//! Bounded LIFO adapter over a [`ForwardList`].
//!
//! The list head is the top of the stack. The stack keeps its own `size`
//! counter alongside the list; the two agree after every operation.
//!
//! # Example
//!
//! ```
//! use structdb::core::structures::Stack;
//!
//! let mut stack = Stack::with_capacity(2);
//! stack.push("a").unwrap();
//! stack.push("b").unwrap();
//! assert!(stack.push("c").is_err());
//!
//! assert_eq!(stack.peek().unwrap(), "b");
//! assert_eq!(stack.pop().unwrap(), "b");
//! assert_eq!(stack.len(), 1);
//! ```

use crate::core::error::StructureError;
use crate::core::record::{Persist, RecordError};
use crate::core::structures::forward_list::{self, ForwardList};
use crate::core::types::Kind;

/// A LIFO stack of strings with a maximum size.
#[derive(Debug, Clone)]
pub struct Stack {
    list: ForwardList,
    size: usize,
    capacity: usize,
}

impl Stack {
    /// Default maximum number of elements.
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// Create an empty stack with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create an empty stack holding at most `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: ForwardList::new(),
            size: 0,
            capacity,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.size, self.list.len());
        self.size
    }

    /// Returns `true` if the stack has no elements.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if another push would overflow.
    pub fn is_full(&self) -> bool {
        self.size >= self.capacity
    }

    /// Maximum number of elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push a value on top.
    ///
    /// # Errors
    ///
    /// [`StructureError::Overflow`] when the stack is full.
    pub fn push(&mut self, value: impl Into<String>) -> Result<(), StructureError> {
        if self.is_full() {
            return Err(StructureError::Overflow {
                capacity: self.capacity,
            });
        }
        self.list.push_front(value);
        self.size += 1;
        Ok(())
    }

    /// Remove and return the top value.
    pub fn pop(&mut self) -> Result<String, StructureError> {
        let value = self.list.pop_front()?;
        self.size -= 1;
        Ok(value)
    }

    /// The top value.
    pub fn peek(&self) -> Result<&str, StructureError> {
        self.list.front().ok_or(StructureError::Empty)
    }

    /// Iterate from top to bottom.
    pub fn iter(&self) -> forward_list::Iter<'_> {
        self.list.iter()
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.list.clear();
        self.size = 0;
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Stack {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl Eq for Stack {}

impl Persist for Stack {
    const KIND: Kind = Kind::Stack;

    fn to_tokens(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    fn empty_like(&self) -> Self {
        Self::with_capacity(self.capacity)
    }

    /// Tokens arrive top first, so each one goes below the previous.
    fn push_token(&mut self, token: &str) -> Result<(), RecordError> {
        if self.is_full() {
            return Err(StructureError::Overflow {
                capacity: self.capacity,
            }
            .into());
        }
        self.list.push_back(token);
        self.size += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::StructureName;

    #[test]
    fn lifo_order() {
        let mut stack = Stack::new();
        for value in ["a", "b", "c"] {
            stack.push(value).unwrap();
        }
        assert_eq!(stack.pop().unwrap(), "c");
        assert_eq!(stack.pop().unwrap(), "b");
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek().unwrap(), "a");
    }

    #[test]
    fn underflow_is_empty() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), Err(StructureError::Empty));
        assert_eq!(stack.peek(), Err(StructureError::Empty));
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn overflow_at_capacity() {
        let mut stack = Stack::with_capacity(1);
        stack.push("a").unwrap();
        assert!(stack.is_full());
        assert_eq!(
            stack.push("b"),
            Err(StructureError::Overflow { capacity: 1 })
        );
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn default_capacity() {
        assert_eq!(Stack::new().capacity(), 1000);
    }

    #[test]
    fn serialize_top_first_and_restore() {
        let mut stack = Stack::new();
        stack.push("bottom").unwrap();
        stack.push("top").unwrap();
        let name = StructureName::new("st").unwrap();
        let line = stack.serialize(&name);
        assert_eq!(line, "S st 2 top bottom");

        let mut restored = Stack::new();
        restored.deserialize(&line).unwrap();
        assert_eq!(restored, stack);
        assert_eq!(restored.pop().unwrap(), "top");
    }

    #[test]
    fn deserialize_over_capacity_fails() {
        let mut stack = Stack::with_capacity(2);
        stack.push("keep").unwrap();
        let err = stack.deserialize("S st 3 a b c").unwrap_err();
        assert_eq!(
            err,
            RecordError::Structure(StructureError::Overflow { capacity: 2 })
        );
        assert_eq!(stack.peek().unwrap(), "keep");
    }
}
