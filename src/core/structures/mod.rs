//! core::structures
//!
//! The six structure variants and the closed sum type that holds any of them.
//!
//! # Variants
//!
//! - [`Array`] - Growable array with explicit capacity
//! - [`ForwardList`] - Singly-linked list with head/tail
//! - [`DoubleList`] - Doubly-linked list with range deletion
//! - [`Stack`] - Bounded LIFO over a forward list
//! - [`Queue`] - Bounded FIFO over a forward list
//! - [`BinarySearchTree`] - Integer-keyed BST with parent links
//!
//! Every variant implements [`Persist`]; [`Body`] dispatches to it.
//!
//! # Example
//!
//! ```
//! use structdb::core::structures::{Body, Structure};
//! use structdb::core::types::{Kind, StructureName};
//!
//! let name = StructureName::new("todo").unwrap();
//! let mut structure = Structure::new(name, Body::empty(Kind::Queue));
//! if let Body::Queue(queue) = &mut structure.body {
//!     queue.enqueue("write").unwrap();
//! }
//! assert_eq!(structure.serialize(), "Q todo 1 write");
//! ```

pub mod array;
pub mod double_list;
pub mod forward_list;
pub mod queue;
pub mod stack;
pub mod tree;

pub use array::Array;
pub use double_list::DoubleList;
pub use forward_list::ForwardList;
pub use queue::Queue;
pub use stack::Stack;
pub use tree::{BinarySearchTree, NodeId};

use crate::core::record::{Persist, RecordError};
use crate::core::types::{Kind, StructureName};

/// Contents of a stored structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Array(Array),
    ForwardList(ForwardList),
    DoubleList(DoubleList),
    Stack(Stack),
    Queue(Queue),
    Tree(BinarySearchTree),
}

impl Body {
    /// An empty body of `kind` with default limits.
    pub fn empty(kind: Kind) -> Self {
        match kind {
            Kind::Array => Body::Array(Array::new()),
            Kind::ForwardList => Body::ForwardList(ForwardList::new()),
            Kind::DoubleList => Body::DoubleList(DoubleList::new()),
            Kind::Stack => Body::Stack(Stack::new()),
            Kind::Queue => Body::Queue(Queue::new()),
            Kind::Tree => Body::Tree(BinarySearchTree::new()),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Body::Array(_) => Kind::Array,
            Body::ForwardList(_) => Kind::ForwardList,
            Body::DoubleList(_) => Kind::DoubleList,
            Body::Stack(_) => Kind::Stack,
            Body::Queue(_) => Kind::Queue,
            Body::Tree(_) => Kind::Tree,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Body::Array(s) => s.len(),
            Body::ForwardList(s) => s.len(),
            Body::DoubleList(s) => s.len(),
            Body::Stack(s) => s.len(),
            Body::Queue(s) => s.len(),
            Body::Tree(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements in canonical record order.
    pub fn to_tokens(&self) -> Vec<String> {
        match self {
            Body::Array(s) => s.to_tokens(),
            Body::ForwardList(s) => s.to_tokens(),
            Body::DoubleList(s) => s.to_tokens(),
            Body::Stack(s) => s.to_tokens(),
            Body::Queue(s) => s.to_tokens(),
            Body::Tree(s) => s.to_tokens(),
        }
    }

    /// Elements in display order.
    ///
    /// Same as [`to_tokens`](Self::to_tokens) except for trees, which are
    /// shown in ascending key order.
    pub fn display_values(&self) -> Vec<String> {
        match self {
            Body::Tree(tree) => tree.in_order().iter().map(i64::to_string).collect(),
            other => other.to_tokens(),
        }
    }

    /// Render as a record line.
    pub fn serialize(&self, name: &StructureName) -> String {
        match self {
            Body::Array(s) => s.serialize(name),
            Body::ForwardList(s) => s.serialize(name),
            Body::DoubleList(s) => s.serialize(name),
            Body::Stack(s) => s.serialize(name),
            Body::Queue(s) => s.serialize(name),
            Body::Tree(s) => s.serialize(name),
        }
    }

    /// Replace the contents from a record line, returning its name.
    pub fn deserialize(&mut self, line: &str) -> Result<StructureName, RecordError> {
        match self {
            Body::Array(s) => s.deserialize(line),
            Body::ForwardList(s) => s.deserialize(line),
            Body::DoubleList(s) => s.deserialize(line),
            Body::Stack(s) => s.deserialize(line),
            Body::Queue(s) => s.deserialize(line),
            Body::Tree(s) => s.deserialize(line),
        }
    }
}

/// A structure type that can be held in a [`Body`].
pub trait Variant: Persist {
    /// Borrow the variant out of a body of the matching kind.
    fn from_body(body: &Body) -> Option<&Self>;

    /// Mutably borrow the variant out of a body of the matching kind.
    fn from_body_mut(body: &mut Body) -> Option<&mut Self>;

    /// Wrap the variant in a body.
    fn into_body(self) -> Body;
}

macro_rules! impl_variant {
    ($($ty:ident => $arm:ident),* $(,)?) => {
        $(
            impl Variant for $ty {
                fn from_body(body: &Body) -> Option<&Self> {
                    match body {
                        Body::$arm(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_body_mut(body: &mut Body) -> Option<&mut Self> {
                    match body {
                        Body::$arm(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn into_body(self) -> Body {
                    Body::$arm(self)
                }
            }

            impl From<$ty> for Body {
                fn from(inner: $ty) -> Self {
                    inner.into_body()
                }
            }
        )*
    };
}

impl_variant! {
    Array => Array,
    ForwardList => ForwardList,
    DoubleList => DoubleList,
    Stack => Stack,
    Queue => Queue,
    BinarySearchTree => Tree,
}

/// A named structure as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub name: StructureName,
    pub body: Body,
}

impl Structure {
    pub fn new(name: StructureName, body: Body) -> Self {
        Self { name, body }
    }

    pub fn kind(&self) -> Kind {
        self.body.kind()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Render as a record line (without a newline).
    pub fn serialize(&self) -> String {
        self.body.serialize(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bodies_match_kind() {
        for kind in Kind::ALL {
            let body = Body::empty(kind);
            assert_eq!(body.kind(), kind);
            assert!(body.is_empty());
        }
    }

    #[test]
    fn empty_round_trip_every_kind() {
        let name = StructureName::new("e").unwrap();
        for kind in Kind::ALL {
            let body = Body::empty(kind);
            let line = body.serialize(&name);
            assert_eq!(line, format!("{} e 0", kind.tag()));

            let mut restored = Body::empty(kind);
            assert_eq!(restored.deserialize(&line).unwrap(), name);
            assert_eq!(restored, body);
        }
    }

    #[test]
    fn tree_displays_in_order() {
        let mut tree = BinarySearchTree::new();
        for key in [2, 1, 3] {
            tree.insert(key).unwrap();
        }
        let body = Body::Tree(tree);
        assert_eq!(body.to_tokens(), ["2", "1", "3"]);
        assert_eq!(body.display_values(), ["1", "2", "3"]);
    }

    #[test]
    fn variant_access_matches_kind() {
        let mut body: Body = Stack::new().into();
        assert!(Stack::from_body(&body).is_some());
        assert!(Queue::from_body(&body).is_none());

        Stack::from_body_mut(&mut body).unwrap().push("a").unwrap();
        assert_eq!(body.len(), 1);
        assert!(BinarySearchTree::from_body_mut(&mut body).is_none());
    }

    #[test]
    fn structure_serialize_uses_name() {
        let mut array = Array::new();
        array.push("x");
        let structure = Structure::new(StructureName::new("arr").unwrap(), Body::Array(array));
        assert_eq!(structure.serialize(), "M arr 1 x");
        assert_eq!(structure.kind(), Kind::Array);
        assert_eq!(structure.len(), 1);
    }
}
