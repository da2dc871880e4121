//! core::structures::double_list
//!
//! Doubly-linked list with positional and range deletion.
//!
//! # Layout
//!
//! Nodes are stored in a [`Slab`] and carry both `prev` and `next` keys. The
//! `prev` key is a back-reference only: ownership of a node belongs to the
//! slab, never to a neighbour. Head and tail operations are O(1); positional
//! lookups walk from whichever end is closer.
//!
//! # Invariants
//!
//! - `head.is_none()` iff the list is empty
//! - the head has no `prev`, the tail has no `next`
//! - for every linked pair, `nodes[a].next == Some(b)` iff `nodes[b].prev == Some(a)`
//!
//! # Example
//!
//! ```
//! use structdb::core::structures::DoubleList;
//!
//! let mut list = DoubleList::new();
//! for value in ["a", "b", "c", "d"] {
//!     list.push_back(value);
//! }
//! list.delete_range(1, 2).unwrap();
//! assert_eq!(list.iter().collect::<Vec<_>>(), ["a", "d"]);
//! assert_eq!(list.iter_rev().collect::<Vec<_>>(), ["d", "a"]);
//! ```

use slab::Slab;

use crate::core::error::StructureError;
use crate::core::record::{Persist, RecordError};
use crate::core::types::Kind;

#[derive(Debug, Clone)]
struct Node {
    value: String,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A doubly-linked list of strings.
#[derive(Debug, Clone, Default)]
pub struct DoubleList {
    nodes: Slab<Node>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl DoubleList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Value at the head.
    pub fn front(&self) -> Option<&str> {
        self.head.map(|key| self.nodes[key].value.as_str())
    }

    /// Value at the tail.
    pub fn back(&self) -> Option<&str> {
        self.tail.map(|key| self.nodes[key].value.as_str())
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Insert a value before the head.
    pub fn push_front(&mut self, value: impl Into<String>) {
        let key = self.nodes.insert(Node {
            value: value.into(),
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => self.nodes[head].prev = Some(key),
            None => self.tail = Some(key),
        }
        self.head = Some(key);
    }

    /// Append a value after the tail.
    pub fn push_back(&mut self, value: impl Into<String>) {
        let key = self.nodes.insert(Node {
            value: value.into(),
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Insert `value` directly after the node at `index`.
    ///
    /// `index == len` is accepted as [`push_back`](Self::push_back).
    pub fn insert_after(&mut self, value: impl Into<String>, index: usize) -> Result<(), StructureError> {
        let len = self.len();
        if index > len {
            return Err(StructureError::out_of_range(index, len));
        }
        if index + 1 >= len {
            self.push_back(value);
            return Ok(());
        }

        let anchor = self.node_at(index);
        self.link_after(anchor, value.into());
        Ok(())
    }

    /// Insert `value` so that it lands at `index`.
    ///
    /// `index == 0` is accepted as [`push_front`](Self::push_front), also on
    /// an empty list. Otherwise requires `index < len`.
    pub fn insert_before(&mut self, value: impl Into<String>, index: usize) -> Result<(), StructureError> {
        if index == 0 {
            self.push_front(value);
            return Ok(());
        }
        self.check_index(index)?;

        let anchor = self.node_at(index);
        let prev = self.nodes[anchor].prev.expect("non-head node has a predecessor");
        self.link_after(prev, value.into());
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Value at `index`, walking from the closer end.
    pub fn get(&self, index: usize) -> Result<&str, StructureError> {
        self.check_index(index)?;
        Ok(&self.nodes[self.node_at(index)].value)
    }

    /// Replace the value at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<String, StructureError> {
        self.check_index(index)?;
        let key = self.node_at(index);
        Ok(std::mem::replace(&mut self.nodes[key].value, value.into()))
    }

    /// Index of the first node holding `value`, searching from the head.
    pub fn find(&self, value: &str) -> Option<usize> {
        self.iter().position(|v| v == value)
    }

    /// Returns `true` if any node holds `value`.
    pub fn contains(&self, value: &str) -> bool {
        self.find(value).is_some()
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Remove and return the head value.
    pub fn pop_front(&mut self) -> Result<String, StructureError> {
        let head = self.head.ok_or(StructureError::Empty)?;
        Ok(self.unlink(head))
    }

    /// Remove and return the tail value.
    pub fn pop_back(&mut self) -> Result<String, StructureError> {
        let tail = self.tail.ok_or(StructureError::Empty)?;
        Ok(self.unlink(tail))
    }

    /// Remove and return the value at `index`.
    pub fn delete_at(&mut self, index: usize) -> Result<String, StructureError> {
        self.check_index(index)?;
        let key = self.node_at(index);
        Ok(self.unlink(key))
    }

    /// Remove the first node holding `value`.
    pub fn delete_by_value(&mut self, value: &str) -> Result<(), StructureError> {
        let index = self
            .find(value)
            .ok_or_else(|| StructureError::ValueNotFound(value.to_string()))?;
        self.delete_at(index)?;
        Ok(())
    }

    /// Drop every node strictly before `index`.
    ///
    /// An `index` at or past the end drops every node.
    ///
    /// # Errors
    ///
    /// [`StructureError::Empty`] on an empty list.
    pub fn delete_before(&mut self, index: usize) -> Result<(), StructureError> {
        if self.is_empty() {
            return Err(StructureError::Empty);
        }
        if index >= self.len() {
            self.clear();
            return Ok(());
        }

        let mut cursor = self.head;
        for _ in 0..index {
            let key = cursor.expect("index is below len");
            cursor = self.nodes.remove(key).next;
        }
        if let Some(new_head) = cursor {
            self.nodes[new_head].prev = None;
        }
        self.head = cursor;
        Ok(())
    }

    /// Drop every node strictly after `index`.
    ///
    /// An `index` at or past the last node leaves the list unchanged.
    ///
    /// # Errors
    ///
    /// [`StructureError::Empty`] on an empty list.
    pub fn delete_after(&mut self, index: usize) -> Result<(), StructureError> {
        if self.is_empty() {
            return Err(StructureError::Empty);
        }
        if index >= self.len() - 1 {
            return Ok(());
        }

        let anchor = self.node_at(index);
        let mut cursor = self.nodes[anchor].next.take();
        while let Some(key) = cursor {
            cursor = self.nodes.remove(key).next;
        }
        self.tail = Some(anchor);
        Ok(())
    }

    /// Drop the nodes in the inclusive range `start..=end`.
    ///
    /// # Errors
    ///
    /// [`StructureError::Empty`] on an empty list,
    /// [`StructureError::InvalidRange`] if `start > end` or `end >= len`.
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<(), StructureError> {
        let len = self.len();
        if len == 0 {
            return Err(StructureError::Empty);
        }
        if start > end || end >= len {
            return Err(StructureError::InvalidRange { start, end, len });
        }

        let first = self.node_at(start);
        let before = self.nodes[first].prev;

        let mut cursor = Some(first);
        for _ in start..=end {
            let key = cursor.expect("range checked against len");
            cursor = self.nodes.remove(key).next;
        }
        let after = cursor;

        match before {
            Some(key) => self.nodes[key].next = after,
            None => self.head = after,
        }
        match after {
            Some(key) => self.nodes[key].prev = before,
            None => self.tail = before,
        }
        Ok(())
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Iterate from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            forward: true,
        }
    }

    /// Iterate from tail to head.
    pub fn iter_rev(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.tail,
            forward: false,
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn check_index(&self, index: usize) -> Result<(), StructureError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(StructureError::out_of_range(index, self.len()))
        }
    }

    /// Key of the node at `index`, walking from the closer end.
    ///
    /// Callers check `index < len` first.
    fn node_at(&self, index: usize) -> usize {
        let len = self.len();
        if index <= len / 2 {
            let mut cursor = self.head.expect("list is non-empty");
            for _ in 0..index {
                cursor = self.nodes[cursor].next.expect("walk stays within len");
            }
            cursor
        } else {
            let mut cursor = self.tail.expect("list is non-empty");
            for _ in index + 1..len {
                cursor = self.nodes[cursor].prev.expect("walk stays within len");
            }
            cursor
        }
    }

    /// Splice a new node in after `anchor`.
    fn link_after(&mut self, anchor: usize, value: String) {
        let next = self.nodes[anchor].next;
        let key = self.nodes.insert(Node {
            value,
            prev: Some(anchor),
            next,
        });
        self.nodes[anchor].next = Some(key);
        match next {
            Some(next) => self.nodes[next].prev = Some(key),
            None => self.tail = Some(key),
        }
    }

    /// Unlink and free one node, rewiring its neighbours.
    fn unlink(&mut self, key: usize) -> String {
        let node = self.nodes.remove(key);
        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }
        node.value
    }
}

impl PartialEq for DoubleList {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for DoubleList {}

/// Iterator over a [`DoubleList`] in either direction.
pub struct Iter<'a> {
    list: &'a DoubleList,
    cursor: Option<usize>,
    forward: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.list.nodes[self.cursor?];
        self.cursor = if self.forward { node.next } else { node.prev };
        Some(&node.value)
    }
}

impl Persist for DoubleList {
    const KIND: Kind = Kind::DoubleList;

    fn to_tokens(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    fn empty_like(&self) -> Self {
        Self::new()
    }

    fn push_token(&mut self, token: &str) -> Result<(), RecordError> {
        self.push_back(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::StructureName;

    fn list_of(values: &[&str]) -> DoubleList {
        let mut list = DoubleList::new();
        for value in values {
            list.push_back(*value);
        }
        list
    }

    fn contents(list: &DoubleList) -> Vec<&str> {
        list.iter().collect()
    }

    /// Forward and backward walks agree and the ends match.
    fn assert_links(list: &DoubleList) {
        let forward: Vec<&str> = list.iter().collect();
        let mut backward: Vec<&str> = list.iter_rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), list.len());
        assert_eq!(list.front(), forward.first().copied());
        assert_eq!(list.back(), forward.last().copied());
    }

    #[test]
    fn push_both_ends() {
        let mut list = DoubleList::new();
        list.push_back("b");
        list.push_front("a");
        list.push_back("c");
        assert_eq!(contents(&list), ["a", "b", "c"]);
        assert_links(&list);
    }

    #[test]
    fn node_at_from_either_end() {
        let list = list_of(&["a", "b", "c", "d", "e"]);
        for (index, expected) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            assert_eq!(list.get(index).unwrap(), *expected);
        }
        assert!(list.get(5).is_err());
    }

    #[test]
    fn insert_after_positions() {
        let mut list = list_of(&["a", "c"]);
        list.insert_after("b", 0).unwrap();
        list.insert_after("d", 2).unwrap();
        list.insert_after("e", 4).unwrap();
        assert_eq!(contents(&list), ["a", "b", "c", "d", "e"]);
        assert_links(&list);
        assert_eq!(
            list.insert_after("x", 6),
            Err(StructureError::OutOfRange { index: 6, len: 5 })
        );
    }

    #[test]
    fn insert_after_on_empty_is_push_back() {
        let mut list = DoubleList::new();
        list.insert_after("a", 0).unwrap();
        assert_eq!(contents(&list), ["a"]);
        assert_links(&list);
    }

    #[test]
    fn insert_before_positions() {
        let mut list = list_of(&["b", "d"]);
        list.insert_before("c", 1).unwrap();
        list.insert_before("a", 0).unwrap();
        assert_eq!(contents(&list), ["a", "b", "c", "d"]);
        assert_links(&list);
        assert!(list.insert_before("x", 4).is_err());

        let mut empty = DoubleList::new();
        empty.insert_before("only", 0).unwrap();
        assert_eq!(contents(&empty), ["only"]);
    }

    #[test]
    fn pop_ends() {
        let mut list = list_of(&["a", "b", "c"]);
        assert_eq!(list.pop_back().unwrap(), "c");
        assert_eq!(list.pop_front().unwrap(), "a");
        assert_links(&list);
        assert_eq!(list.pop_back().unwrap(), "b");
        assert!(list.is_empty());
        assert_eq!(list.pop_front(), Err(StructureError::Empty));
        assert_eq!(list.pop_back(), Err(StructureError::Empty));
    }

    #[test]
    fn delete_at_each_position() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        assert_eq!(list.delete_at(2).unwrap(), "c");
        assert_eq!(list.delete_at(0).unwrap(), "a");
        assert_eq!(list.delete_at(1).unwrap(), "d");
        assert_eq!(contents(&list), ["b"]);
        assert_links(&list);
        assert!(list.delete_at(1).is_err());
    }

    #[test]
    fn delete_by_value() {
        let mut list = list_of(&["a", "b", "a"]);
        list.delete_by_value("a").unwrap();
        assert_eq!(contents(&list), ["b", "a"]);
        assert_eq!(
            list.delete_by_value("q"),
            Err(StructureError::ValueNotFound("q".into()))
        );
        assert!(list.contains("a"));
        list.delete_by_value("a").unwrap();
        assert!(!list.contains("a"));
        assert_links(&list);
    }

    #[test]
    fn set_replaces() {
        let mut list = list_of(&["a", "b", "c"]);
        assert_eq!(list.set(2, "z").unwrap(), "c");
        assert_eq!(contents(&list), ["a", "b", "z"]);
        assert!(list.set(3, "q").is_err());
    }

    #[test]
    fn delete_range_middle() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        list.delete_range(1, 2).unwrap();
        assert_eq!(contents(&list), ["a", "d"]);
        assert_eq!(list.len(), 2);
        assert_links(&list);
    }

    #[test]
    fn delete_range_touching_ends() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        list.delete_range(0, 1).unwrap();
        assert_eq!(contents(&list), ["c", "d"]);
        assert_links(&list);

        let mut list = list_of(&["a", "b", "c", "d"]);
        list.delete_range(2, 3).unwrap();
        assert_eq!(contents(&list), ["a", "b"]);
        assert_links(&list);

        let mut list = list_of(&["a", "b"]);
        list.delete_range(0, 1).unwrap();
        assert!(list.is_empty());
        assert_links(&list);
    }

    #[test]
    fn delete_range_rejects_bad_bounds() {
        let mut list = list_of(&["a", "b", "c"]);
        assert_eq!(
            list.delete_range(2, 1),
            Err(StructureError::InvalidRange {
                start: 2,
                end: 1,
                len: 3
            })
        );
        assert!(list.delete_range(1, 3).is_err());
        assert_eq!(contents(&list), ["a", "b", "c"]);
        assert_eq!(DoubleList::new().delete_range(0, 0), Err(StructureError::Empty));
    }

    #[test]
    fn delete_before() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        list.delete_before(2).unwrap();
        assert_eq!(contents(&list), ["c", "d"]);
        assert_links(&list);

        list.delete_before(0).unwrap();
        assert_eq!(contents(&list), ["c", "d"]);

        list.delete_before(5).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.delete_before(0), Err(StructureError::Empty));
    }

    #[test]
    fn delete_after() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        list.delete_after(3).unwrap();
        assert_eq!(list.len(), 4);
        list.delete_after(usize::MAX).unwrap();
        assert_eq!(contents(&list), ["a", "b", "c", "d"]);
        assert_links(&list);

        list.delete_after(1).unwrap();
        assert_eq!(contents(&list), ["a", "b"]);
        assert_eq!(list.back(), Some("b"));
        assert_links(&list);

        list.push_back("z");
        assert_eq!(contents(&list), ["a", "b", "z"]);
        assert_eq!(DoubleList::new().delete_after(0), Err(StructureError::Empty));
    }

    #[test]
    fn serialize_head_to_tail() {
        let list = list_of(&["a", "d"]);
        let name = StructureName::new("dl").unwrap();
        assert_eq!(list.serialize(&name), "L dl 2 a d");

        let mut restored = DoubleList::new();
        restored.deserialize(&list.serialize(&name)).unwrap();
        assert_eq!(restored, list);
        assert_links(&restored);
    }
}
