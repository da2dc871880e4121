//! core::structures::queue
//!
//! Bounded FIFO adapter over a [`ForwardList`].
//!
//! The list head is the front and the tail is the back, so both `enqueue` and
//! `dequeue` are O(1).

use crate::core::error::StructureError;
use crate::core::record::{Persist, RecordError};
use crate::core::structures::forward_list::{self, ForwardList};
use crate::core::types::Kind;

/// A FIFO queue of strings with a maximum size.
#[derive(Debug, Clone)]
pub struct Queue {
    list: ForwardList,
    size: usize,
    capacity: usize,
}

impl Queue {
    /// Default maximum number of elements.
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// Create an empty queue with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create an empty queue holding at most `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: ForwardList::new(),
            size: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.size, self.list.len());
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_full(&self) -> bool {
        self.size >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add a value at the back.
    ///
    /// # Errors
    ///
    /// [`StructureError::Overflow`] when the queue is full.
    pub fn enqueue(&mut self, value: impl Into<String>) -> Result<(), StructureError> {
        if self.is_full() {
            return Err(StructureError::Overflow {
                capacity: self.capacity,
            });
        }
        self.list.push_back(value);
        self.size += 1;
        Ok(())
    }

    /// Remove and return the front value.
    pub fn dequeue(&mut self) -> Result<String, StructureError> {
        let value = self.list.pop_front()?;
        self.size -= 1;
        Ok(value)
    }

    /// The front value.
    pub fn peek(&self) -> Result<&str, StructureError> {
        self.list.front().ok_or(StructureError::Empty)
    }

    /// Iterate from front to back.
    pub fn iter(&self) -> forward_list::Iter<'_> {
        self.list.iter()
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.size = 0;
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Queue {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl Eq for Queue {}

impl Persist for Queue {
    const KIND: Kind = Kind::Queue;

    fn to_tokens(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    fn empty_like(&self) -> Self {
        Self::with_capacity(self.capacity)
    }

    fn push_token(&mut self, token: &str) -> Result<(), RecordError> {
        self.enqueue(token)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::StructureName;

    #[test]
    fn fifo_order() {
        let mut queue = Queue::new();
        for value in ["a", "b", "c"] {
            queue.enqueue(value).unwrap();
        }
        assert_eq!(queue.dequeue().unwrap(), "a");
        assert_eq!(queue.peek().unwrap(), "b");
        assert_eq!(queue.len(), 2);
        queue.enqueue("d").unwrap();
        assert_eq!(queue.iter().collect::<Vec<_>>(), ["b", "c", "d"]);
    }

    #[test]
    fn underflow_is_empty() {
        let mut queue = Queue::new();
        assert_eq!(queue.dequeue(), Err(StructureError::Empty));
        assert_eq!(queue.peek(), Err(StructureError::Empty));
    }

    #[test]
    fn overflow_at_capacity() {
        let mut queue = Queue::with_capacity(2);
        queue.enqueue("a").unwrap();
        queue.enqueue("b").unwrap();
        assert!(queue.is_full());
        assert_eq!(
            queue.enqueue("c"),
            Err(StructureError::Overflow { capacity: 2 })
        );
        queue.dequeue().unwrap();
        assert!(queue.enqueue("c").is_ok());
    }

    #[test]
    fn default_capacity_is_one_thousand() {
        let mut queue = Queue::new();
        for i in 0..1000 {
            queue.enqueue(i.to_string()).unwrap();
        }
        assert!(queue.enqueue("overflow").is_err());
        assert_eq!(queue.len(), 1000);
    }

    #[test]
    fn serialize_front_to_back() {
        let mut queue = Queue::new();
        queue.enqueue("first").unwrap();
        queue.enqueue("second").unwrap();
        let name = StructureName::new("q").unwrap();
        let line = queue.serialize(&name);
        assert_eq!(line, "Q q 2 first second");

        let mut restored = Queue::new();
        restored.deserialize(&line).unwrap();
        assert_eq!(restored.dequeue().unwrap(), "first");
    }

    #[test]
    fn clear_resets_size() {
        let mut queue = Queue::new();
        queue.enqueue("a").unwrap();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }
}
