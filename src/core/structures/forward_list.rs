//! core::structures::forward_list
//!
//! Singly-linked list with head and tail tracking.
//!
//! Nodes live in a [`Slab`] owned by the list and link to their successor by
//! slab key. The tail key makes `push_back` O(1); there is no back-link, so
//! `pop_back` walks from the head to find the new tail.
//!
//! # Example
//!
//! ```
//! use structdb::core::structures::ForwardList;
//!
//! let mut list = ForwardList::new();
//! list.push_back("b");
//! list.push_front("a");
//! list.insert_after("c", 1).unwrap();
//! assert_eq!(list.iter().collect::<Vec<_>>(), ["a", "b", "c"]);
//!
//! assert_eq!(list.pop_back().unwrap(), "c");
//! assert_eq!(list.back(), Some("b"));
//! ```

use slab::Slab;

use crate::core::error::StructureError;
use crate::core::record::{Persist, RecordError};
use crate::core::types::Kind;

#[derive(Debug, Clone)]
struct Node {
    value: String,
    next: Option<usize>,
}

/// A singly-linked list of strings.
#[derive(Debug, Clone, Default)]
pub struct ForwardList {
    nodes: Slab<Node>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl ForwardList {
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

    /// Insert a value before the head. O(1).
    pub fn push_front(&mut self, value: impl Into<String>) {
        let key = self.nodes.insert(Node {
            value: value.into(),
            next: self.head,
        });
        if self.head.is_none() {
            self.tail = Some(key);
        }
        self.head = Some(key);
    }

    /// Append a value after the tail. O(1).
    pub fn push_back(&mut self, value: impl Into<String>) {
        let key = self.nodes.insert(Node {
            value: value.into(),
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Insert `value` so that it lands at `index`.
    ///
    /// `index == 0` is a synonym for [`push_front`](Self::push_front) and is
    /// accepted on an empty list. Otherwise requires `index < len`.
    pub fn insert_before(&mut self, value: impl Into<String>, index: usize) -> Result<(), StructureError> {
        if index == 0 {
            self.push_front(value);
            return Ok(());
        }
        self.check_index(index)?;

        let prev = self.key_at(index - 1);
        self.link_after(prev, value.into());
        Ok(())
    }

    /// Insert `value` directly after the node at `index`.
    ///
    /// Requires `index < len`.
    pub fn insert_after(&mut self, value: impl Into<String>, index: usize) -> Result<(), StructureError> {
        self.check_index(index)?;
        if index == self.len() - 1 {
            self.push_back(value);
            return Ok(());
        }

        let anchor = self.key_at(index);
        self.link_after(anchor, value.into());
        Ok(())
    }

    /// Remove and return the head value. O(1).
    pub fn pop_front(&mut self) -> Result<String, StructureError> {
        let head = self.head.ok_or(StructureError::Empty)?;
        let node = self.nodes.remove(head);
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        Ok(node.value)
    }

    /// Remove and return the tail value. O(len).
    pub fn pop_back(&mut self) -> Result<String, StructureError> {
        let tail = self.tail.ok_or(StructureError::Empty)?;
        if self.head == Some(tail) {
            return self.pop_front();
        }

        let mut cursor = self.head.ok_or(StructureError::Empty)?;
        while self.nodes[cursor].next != Some(tail) {
            cursor = self.next_of(cursor);
        }
        Ok(self.unlink_after(cursor))
    }

    /// Remove and return the value at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<String, StructureError> {
        self.check_index(index)?;
        if index == 0 {
            return self.pop_front();
        }

        let prev = self.key_at(index - 1);
        Ok(self.unlink_after(prev))
    }

    /// Remove the first node holding `value`.
    ///
    /// # Errors
    ///
    /// [`StructureError::ValueNotFound`] if no node matches.
    pub fn remove_by_value(&mut self, value: &str) -> Result<(), StructureError> {
        let not_found = || StructureError::ValueNotFound(value.to_string());

        let head = self.head.ok_or_else(not_found)?;
        if self.nodes[head].value == value {
            self.pop_front()?;
            return Ok(());
        }

        let mut prev = head;
        while let Some(next) = self.nodes[prev].next {
            if self.nodes[next].value == value {
                self.unlink_after(prev);
                return Ok(());
            }
            prev = next;
        }
        Err(not_found())
    }

    /// Index of the first node holding `value`.
    pub fn find(&self, value: &str) -> Option<usize> {
        self.iter().position(|v| v == value)
    }

    /// Value at `index`. O(index).
    pub fn get(&self, index: usize) -> Result<&str, StructureError> {
        self.check_index(index)?;
        Ok(&self.nodes[self.key_at(index)].value)
    }

    /// Iterate from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn check_index(&self, index: usize) -> Result<(), StructureError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(StructureError::out_of_range(index, self.len()))
        }
    }

    /// Key of the node at `index`; callers check the bound first.
    fn key_at(&self, index: usize) -> usize {
        let mut cursor = self.head.expect("index checked against len");
        for _ in 0..index {
            cursor = self.next_of(cursor);
        }
        cursor
    }

    fn next_of(&self, key: usize) -> usize {
        self.nodes[key].next.expect("walk stays within len")
    }

    fn link_after(&mut self, prev: usize, value: String) {
        let key = self.nodes.insert(Node {
            value,
            next: self.nodes[prev].next,
        });
        self.nodes[prev].next = Some(key);
        if self.tail == Some(prev) {
            self.tail = Some(key);
        }
    }

    /// Unlink and free the successor of `prev`, which must exist.
    fn unlink_after(&mut self, prev: usize) -> String {
        let target = self.next_of(prev);
        let node = self.nodes.remove(target);
        self.nodes[prev].next = node.next;
        if self.tail == Some(target) {
            self.tail = Some(prev);
        }
        node.value
    }
}

impl PartialEq for ForwardList {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for ForwardList {}

/// Iterator over a [`ForwardList`], head to tail.
pub struct Iter<'a> {
    nodes: &'a Slab<Node>,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.value)
    }
}

impl Persist for ForwardList {
    const KIND: Kind = Kind::ForwardList;

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

    fn list_of(values: &[&str]) -> ForwardList {
        let mut list = ForwardList::new();
        for value in values {
            list.push_back(*value);
        }
        list
    }

    fn contents(list: &ForwardList) -> Vec<&str> {
        list.iter().collect()
    }

    fn assert_ends(list: &ForwardList) {
        assert_eq!(list.front(), list.iter().next());
        assert_eq!(list.back(), list.iter().last());
        assert_eq!(list.is_empty(), list.len() == 0);
    }

    #[test]
    fn push_both_ends() {
        let mut list = ForwardList::new();
        list.push_back("b");
        list.push_front("a");
        list.push_back("c");
        assert_eq!(contents(&list), ["a", "b", "c"]);
        assert_eq!(list.len(), 3);
        assert_ends(&list);
    }

    #[test]
    fn push_front_on_empty_sets_tail() {
        let mut list = ForwardList::new();
        list.push_front("only");
        assert_eq!(list.back(), Some("only"));
        list.push_back("last");
        assert_eq!(contents(&list), ["only", "last"]);
    }

    #[test]
    fn insert_before() {
        let mut list = list_of(&["a", "c"]);
        list.insert_before("b", 1).unwrap();
        assert_eq!(contents(&list), ["a", "b", "c"]);
        list.insert_before("z", 0).unwrap();
        assert_eq!(contents(&list), ["z", "a", "b", "c"]);
        assert!(list.insert_before("q", 4).is_err());
        assert_ends(&list);
    }

    #[test]
    fn insert_before_zero_on_empty() {
        let mut list = ForwardList::new();
        list.insert_before("a", 0).unwrap();
        assert_eq!(contents(&list), ["a"]);
        assert_ends(&list);
    }

    #[test]
    fn insert_after() {
        let mut list = list_of(&["a", "c"]);
        list.insert_after("b", 0).unwrap();
        list.insert_after("d", 2).unwrap();
        assert_eq!(contents(&list), ["a", "b", "c", "d"]);
        assert_eq!(list.back(), Some("d"));
        assert_eq!(
            list.insert_after("x", 4),
            Err(StructureError::OutOfRange { index: 4, len: 4 })
        );
        assert!(ForwardList::new().insert_after("x", 0).is_err());
    }

    #[test]
    fn pop_front_and_back() {
        let mut list = list_of(&["a", "b", "c"]);
        assert_eq!(list.pop_front().unwrap(), "a");
        assert_eq!(list.pop_back().unwrap(), "c");
        assert_eq!(contents(&list), ["b"]);
        assert_ends(&list);
        assert_eq!(list.pop_back().unwrap(), "b");
        assert!(list.is_empty());
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), Err(StructureError::Empty));
        assert_eq!(list.pop_back(), Err(StructureError::Empty));
    }

    #[test]
    fn remove_at() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        assert_eq!(list.remove_at(3).unwrap(), "d");
        assert_eq!(list.back(), Some("c"));
        assert_eq!(list.remove_at(1).unwrap(), "b");
        assert_eq!(list.remove_at(0).unwrap(), "a");
        assert_eq!(contents(&list), ["c"]);
        assert!(list.remove_at(1).is_err());
        assert_ends(&list);
    }

    #[test]
    fn remove_by_value_first_match_only() {
        let mut list = list_of(&["a", "b", "a", "c"]);
        list.remove_by_value("a").unwrap();
        assert_eq!(contents(&list), ["b", "a", "c"]);
        list.remove_by_value("c").unwrap();
        assert_eq!(contents(&list), ["b", "a"]);
        assert_eq!(list.back(), Some("a"));
        assert_eq!(
            list.remove_by_value("zzz"),
            Err(StructureError::ValueNotFound("zzz".into()))
        );
        assert!(ForwardList::new().remove_by_value("a").is_err());
    }

    #[test]
    fn find_and_get() {
        let list = list_of(&["a", "b", "c"]);
        assert_eq!(list.find("c"), Some(2));
        assert_eq!(list.find("q"), None);
        assert_eq!(list.get(1).unwrap(), "b");
        assert!(list.get(3).is_err());
    }

    #[test]
    fn reuses_freed_slots() {
        let mut list = list_of(&["a", "b"]);
        list.pop_front().unwrap();
        list.push_back("c");
        list.push_front("z");
        assert_eq!(contents(&list), ["z", "b", "c"]);
        assert_ends(&list);
    }

    #[test]
    fn serialize_head_to_tail() {
        let list = list_of(&["x", "y"]);
        let name = StructureName::new("fl").unwrap();
        assert_eq!(list.serialize(&name), "F fl 2 x y");
    }

    #[test]
    fn deserialize_truncated_is_error() {
        let mut list = list_of(&["keep"]);
        assert!(list.deserialize("F fl 3 x y").is_err());
        assert_eq!(contents(&list), ["keep"]);
    }
}
