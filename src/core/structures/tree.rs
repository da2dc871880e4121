//! core::structures::tree
//!
//! Binary search tree over unique integer keys.
//!
//! # Layout
//!
//! Nodes live in a [`Slab`] and refer to their children and parent by slab
//! key. The parent key is a back-reference used to walk upwards for
//! [`predecessor`](BinarySearchTree::predecessor),
//! [`successor`](BinarySearchTree::successor) and deletion without descending
//! again from the root.
//!
//! # Deletion
//!
//! Removing a node with two children copies the key of its in-order
//! successor into the node and then removes the successor, which has at most
//! a right child. The [`NodeId`] of the node holding the deleted key stays
//! valid and now reports the successor's key.
//!
//! # Example
//!
//! ```
//! use structdb::core::structures::BinarySearchTree;
//!
//! let mut tree = BinarySearchTree::new();
//! for key in [50, 30, 70, 20, 40] {
//!     tree.insert(key).unwrap();
//! }
//! tree.delete(30).unwrap();
//! assert_eq!(tree.in_order(), [20, 40, 50, 70]);
//! assert_eq!(tree.pre_order(), [50, 40, 20, 70]);
//! ```

use std::collections::VecDeque;

use slab::Slab;

use crate::core::error::StructureError;
use crate::core::record::{Persist, RecordError};
use crate::core::types::Kind;

/// Handle to a node of a [`BinarySearchTree`].
///
/// Handles are invalidated when their node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    key: i64,
    left: Option<usize>,
    right: Option<usize>,
    parent: Option<usize>,
}

impl Node {
    fn leaf(key: i64, parent: Option<usize>) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
        }
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A binary search tree with parent links.
#[derive(Debug, Clone, Default)]
pub struct BinarySearchTree {
    nodes: Slab<Node>,
    root: Option<usize>,
}

impl BinarySearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root.map(NodeId)
    }

    /// Key stored at `node`.
    pub fn key(&self, node: NodeId) -> Option<i64> {
        self.nodes.get(node.0).map(|n| n.key)
    }

    /// Insert `key` as a new leaf.
    ///
    /// # Errors
    ///
    /// [`StructureError::DuplicateKey`] if the key is already present.
    pub fn insert(&mut self, key: i64) -> Result<NodeId, StructureError> {
        let Some(mut cursor) = self.root else {
            let id = self.nodes.insert(Node::leaf(key, None));
            self.root = Some(id);
            return Ok(NodeId(id));
        };

        loop {
            let node = &self.nodes[cursor];
            let next = if key < node.key {
                node.left
            } else if key > node.key {
                node.right
            } else {
                return Err(StructureError::DuplicateKey(key));
            };

            match next {
                Some(child) => cursor = child,
                None => break,
            }
        }

        let id = self.nodes.insert(Node::leaf(key, Some(cursor)));
        let parent = &mut self.nodes[cursor];
        if key < parent.key {
            parent.left = Some(id);
        } else {
            parent.right = Some(id);
        }
        Ok(NodeId(id))
    }

    /// Locate the node holding `key`.
    pub fn find(&self, key: i64) -> Result<NodeId, StructureError> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            if key == node.key {
                return Ok(NodeId(id));
            }
            cursor = if key < node.key { node.left } else { node.right };
        }
        Err(StructureError::KeyNotFound(key))
    }

    pub fn contains(&self, key: i64) -> bool {
        self.find(key).is_ok()
    }

    /// Leftmost node of the subtree rooted at `node`.
    pub fn find_min(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?;
        Some(NodeId(self.min_from(node.0)))
    }

    /// Rightmost node of the subtree rooted at `node`.
    pub fn find_max(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?;
        Some(NodeId(self.max_from(node.0)))
    }

    /// The node with the next smaller key.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        let current = self.nodes.get(node.0)?;
        if let Some(left) = current.left {
            return Some(NodeId(self.max_from(left)));
        }

        let mut child = node.0;
        let mut parent = current.parent;
        while let Some(up) = parent {
            if self.nodes[up].right == Some(child) {
                return Some(NodeId(up));
            }
            child = up;
            parent = self.nodes[up].parent;
        }
        None
    }

    /// The node with the next larger key.
    pub fn successor(&self, node: NodeId) -> Option<NodeId> {
        let current = self.nodes.get(node.0)?;
        if let Some(right) = current.right {
            return Some(NodeId(self.min_from(right)));
        }

        let mut child = node.0;
        let mut parent = current.parent;
        while let Some(up) = parent {
            if self.nodes[up].left == Some(child) {
                return Some(NodeId(up));
            }
            child = up;
            parent = self.nodes[up].parent;
        }
        None
    }

    /// Remove `key` from the tree.
    ///
    /// # Errors
    ///
    /// [`StructureError::KeyNotFound`] if the key is absent.
    pub fn delete(&mut self, key: i64) -> Result<(), StructureError> {
        let target = self.find(key)?.0;

        let doomed = match (self.nodes[target].left, self.nodes[target].right) {
            (Some(_), Some(right)) => {
                let successor = self.min_from(right);
                self.nodes[target].key = self.nodes[successor].key;
                successor
            }
            _ => target,
        };
        self.splice_out(doomed);
        Ok(())
    }

    /// Returns `true` if every node has zero or two children.
    ///
    /// Evaluated as `inner + 1 == leaves`, where an inner node has at least
    /// one child. An empty tree is full.
    pub fn is_full(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let leaves = self.nodes.iter().filter(|(_, node)| node.is_leaf()).count();
        let inner = self.len() - leaves;
        inner + 1 == leaves
    }

    /// Keys in node, left, right order.
    pub fn pre_order(&self) -> Vec<i64> {
        let mut keys = Vec::with_capacity(self.len());
        let mut pending: Vec<usize> = self.root.into_iter().collect();
        while let Some(id) = pending.pop() {
            let node = &self.nodes[id];
            keys.push(node.key);
            pending.extend(node.right);
            pending.extend(node.left);
        }
        keys
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> Vec<i64> {
        let mut keys = Vec::with_capacity(self.len());
        let mut pending = Vec::new();
        let mut cursor = self.root;
        loop {
            while let Some(id) = cursor {
                pending.push(id);
                cursor = self.nodes[id].left;
            }
            let Some(id) = pending.pop() else { break };
            keys.push(self.nodes[id].key);
            cursor = self.nodes[id].right;
        }
        keys
    }

    /// Keys in left, right, node order.
    pub fn post_order(&self) -> Vec<i64> {
        // Node, right, left reversed.
        let mut keys = Vec::with_capacity(self.len());
        let mut pending: Vec<usize> = self.root.into_iter().collect();
        while let Some(id) = pending.pop() {
            let node = &self.nodes[id];
            keys.push(node.key);
            pending.extend(node.left);
            pending.extend(node.right);
        }
        keys.reverse();
        keys
    }

    /// Keys level by level, left to right.
    pub fn bfs(&self) -> Vec<i64> {
        let mut keys = Vec::with_capacity(self.len());
        let mut queue: VecDeque<usize> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id];
            keys.push(node.key);
            queue.extend(node.left);
            queue.extend(node.right);
        }
        keys
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    fn min_from(&self, mut id: usize) -> usize {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    fn max_from(&self, mut id: usize) -> usize {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    /// Remove a node with at most one child, lifting the child into its place.
    fn splice_out(&mut self, id: usize) {
        let node = self.nodes.remove(id);
        debug_assert!(node.left.is_none() || node.right.is_none());

        let child = node.left.or(node.right);
        if let Some(child) = child {
            self.nodes[child].parent = node.parent;
        }
        match node.parent {
            None => self.root = child,
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                if parent.left == Some(id) {
                    parent.left = child;
                } else {
                    parent.right = child;
                }
            }
        }
    }
}

impl PartialEq for BinarySearchTree {
    /// Trees are equal when they have the same shape, which pre-order
    /// over unique keys determines.
    fn eq(&self, other: &Self) -> bool {
        self.pre_order() == other.pre_order()
    }
}

impl Eq for BinarySearchTree {}

impl Persist for BinarySearchTree {
    const KIND: Kind = Kind::Tree;

    fn to_tokens(&self) -> Vec<String> {
        self.pre_order().iter().map(i64::to_string).collect()
    }

    fn empty_like(&self) -> Self {
        Self::new()
    }

    fn push_token(&mut self, token: &str) -> Result<(), RecordError> {
        let key: i64 = token
            .parse()
            .map_err(|_| RecordError::InvalidKey(token.to_string()))?;
        self.insert(key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::StructureName;

    fn tree_of(keys: &[i64]) -> BinarySearchTree {
        let mut tree = BinarySearchTree::new();
        for key in keys {
            tree.insert(*key).unwrap();
        }
        tree
    }

    /// Every child points back at its parent.
    fn assert_parent_links(tree: &BinarySearchTree) {
        for (id, node) in tree.nodes.iter() {
            for child in [node.left, node.right].into_iter().flatten() {
                assert_eq!(tree.nodes[child].parent, Some(id));
            }
        }
        if let Some(root) = tree.root {
            assert_eq!(tree.nodes[root].parent, None);
        }
    }

    fn neighbour_key(tree: &BinarySearchTree, node: Option<NodeId>) -> Option<i64> {
        node.and_then(|id| tree.key(id))
    }

    #[test]
    fn insert_and_traverse() {
        let tree = tree_of(&[50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(tree.in_order(), [20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(tree.pre_order(), [50, 30, 20, 40, 70, 60, 80]);
        assert_eq!(tree.post_order(), [20, 40, 30, 60, 80, 70, 50]);
        assert_eq!(tree.bfs(), [50, 30, 70, 20, 40, 60, 80]);
        assert_parent_links(&tree);
    }

    #[test]
    fn duplicate_insert_is_error() {
        let mut tree = tree_of(&[5]);
        assert_eq!(tree.insert(5), Err(StructureError::DuplicateKey(5)));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn find_hits_and_misses() {
        let tree = tree_of(&[5, 3, 8]);
        let node = tree.find(8).unwrap();
        assert_eq!(tree.key(node), Some(8));
        assert_eq!(tree.find(4), Err(StructureError::KeyNotFound(4)));
        assert_eq!(
            BinarySearchTree::new().find(1),
            Err(StructureError::KeyNotFound(1))
        );
    }

    #[test]
    fn min_and_max_of_subtrees() {
        let tree = tree_of(&[50, 30, 70, 20, 40]);
        let root = tree.root().unwrap();
        assert_eq!(neighbour_key(&tree, tree.find_min(root)), Some(20));
        assert_eq!(neighbour_key(&tree, tree.find_max(root)), Some(70));
        let thirty = tree.find(30).unwrap();
        assert_eq!(neighbour_key(&tree, tree.find_max(thirty)), Some(40));
    }

    #[test]
    fn predecessor_and_successor() {
        let tree = tree_of(&[50, 30, 70, 20, 40, 60, 80]);
        let at = |key| tree.find(key).unwrap();

        // Via subtree
        assert_eq!(neighbour_key(&tree, tree.predecessor(at(50))), Some(40));
        assert_eq!(neighbour_key(&tree, tree.successor(at(50))), Some(60));
        // Via ancestors
        assert_eq!(neighbour_key(&tree, tree.predecessor(at(60))), Some(50));
        assert_eq!(neighbour_key(&tree, tree.successor(at(40))), Some(50));
        // None at the extremes
        assert_eq!(tree.predecessor(at(20)), None);
        assert_eq!(tree.successor(at(80)), None);
    }

    #[test]
    fn delete_leaf() {
        let mut tree = tree_of(&[50, 30, 70]);
        tree.delete(30).unwrap();
        assert_eq!(tree.in_order(), [50, 70]);
        assert_parent_links(&tree);
    }

    #[test]
    fn delete_one_child_splices() {
        let mut tree = tree_of(&[50, 30, 20, 10]);
        tree.delete(30).unwrap();
        assert_eq!(tree.pre_order(), [50, 20, 10]);
        assert_parent_links(&tree);
    }

    #[test]
    fn delete_two_children_copies_successor_key() {
        let mut tree = tree_of(&[50, 30, 70, 20, 40]);
        let node = tree.find(30).unwrap();
        tree.delete(30).unwrap();
        assert_eq!(tree.in_order(), [20, 40, 50, 70]);
        // The node that held 30 now holds its successor.
        assert_eq!(tree.key(node), Some(40));
        assert_parent_links(&tree);
    }

    #[test]
    fn delete_two_children_successor_with_right_child() {
        let mut tree = tree_of(&[50, 30, 80, 60, 70]);
        tree.delete(50).unwrap();
        assert_eq!(tree.pre_order(), [60, 30, 80, 70]);
        assert_parent_links(&tree);
    }

    #[test]
    fn delete_root_variants() {
        let mut tree = tree_of(&[1]);
        tree.delete(1).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);

        let mut tree = tree_of(&[1, 2, 3]);
        tree.delete(1).unwrap();
        assert_eq!(tree.pre_order(), [2, 3]);
        assert_parent_links(&tree);
    }

    #[test]
    fn delete_missing_key() {
        let mut tree = tree_of(&[1, 2]);
        assert_eq!(tree.delete(9), Err(StructureError::KeyNotFound(9)));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn is_full_shapes() {
        assert!(BinarySearchTree::new().is_full());
        assert!(tree_of(&[1]).is_full());
        assert!(tree_of(&[2, 1, 3]).is_full());
        assert!(tree_of(&[50, 30, 70, 20, 40]).is_full());
        assert!(tree_of(&[50, 30, 70, 20, 40, 60, 80]).is_full());

        assert!(!tree_of(&[1, 2]).is_full());
        assert!(!tree_of(&[1, 2, 3]).is_full());
        assert!(!tree_of(&[50, 30, 70, 20]).is_full());
        assert!(!tree_of(&[50, 30, 70, 20, 40, 60]).is_full());
    }

    #[test]
    fn serialize_pre_order_rebuilds_shape() {
        let tree = tree_of(&[50, 30, 70, 20, 40]);
        let name = StructureName::new("t").unwrap();
        let line = tree.serialize(&name);
        assert_eq!(line, "T t 5 50 30 20 40 70");

        let mut restored = BinarySearchTree::new();
        restored.deserialize(&line).unwrap();
        assert_eq!(restored, tree);
        assert_eq!(restored.bfs(), tree.bfs());
    }

    #[test]
    fn deserialize_rejects_bad_keys() {
        let mut tree = tree_of(&[1]);
        assert_eq!(
            tree.deserialize("T t 2 5 x"),
            Err(RecordError::InvalidKey("x".into()))
        );
        assert_eq!(
            tree.deserialize("T t 2 5 5"),
            Err(RecordError::Structure(StructureError::DuplicateKey(5)))
        );
        assert_eq!(tree.in_order(), [1]);
    }

    #[test]
    fn negative_keys() {
        let tree = tree_of(&[0, -5, 5, -10]);
        assert_eq!(tree.in_order(), [-10, -5, 0, 5]);
    }
}
