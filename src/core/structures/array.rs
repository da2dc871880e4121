//! core::structures::array
//!
//! Resizable array of string slots.
//!
//! The array manages its own slot buffer: `capacity` slots are allocated and
//! the first `len` of them are filled. Growth doubles the capacity, or sizes
//! an unsized array to [`Array::INITIAL_CAPACITY`].
//!
//! # Example
//!
//! ```
//! use structdb::core::structures::Array;
//!
//! let mut array = Array::new();
//! array.push("a");
//! array.push("b");
//! array.insert_at("x", 1).unwrap();
//! assert_eq!(array.iter().collect::<Vec<_>>(), ["a", "x", "b"]);
//!
//! array.delete_at(0).unwrap();
//! assert_eq!(array.iter().collect::<Vec<_>>(), ["x", "b"]);
//! assert_eq!(array.capacity(), 10);
//! ```

use crate::core::error::StructureError;
use crate::core::record::{Persist, RecordError};
use crate::core::types::Kind;

/// A growable array of strings with explicit capacity management.
#[derive(Debug, Clone)]
pub struct Array {
    /// Allocated slots; `slots.len()` is the capacity.
    slots: Vec<String>,
    /// Number of filled slots.
    len: usize,
    /// Capacity used when growing an unsized array.
    initial_capacity: usize,
}

impl Array {
    /// Capacity an unsized array grows to on its first push.
    pub const INITIAL_CAPACITY: usize = 10;

    /// Create an unsized array.
    pub fn new() -> Self {
        Self::with_initial_capacity(Self::INITIAL_CAPACITY)
    }

    /// Create an unsized array whose first growth step is `initial_capacity`.
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            initial_capacity: initial_capacity.max(1),
        }
    }

    /// Create an array with `capacity` preallocated slots.
    ///
    /// `capacity` is also used as the first growth step should the array
    /// ever be emptied of slots through [`clear`](Array::clear).
    pub fn with_capacity(capacity: usize) -> Self {
        let initial_capacity = capacity.max(1);
        Self {
            slots: vec![String::new(); capacity],
            len: 0,
            initial_capacity,
        }
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Append a value at the end.
    pub fn push(&mut self, value: impl Into<String>) {
        self.place(value.into(), self.len);
    }

    /// Insert `value` at `index`, shifting later elements one slot right.
    ///
    /// # Errors
    ///
    /// [`StructureError::OutOfRange`] unless `index <= len`.
    pub fn insert_at(&mut self, value: impl Into<String>, index: usize) -> Result<(), StructureError> {
        if index > self.len {
            return Err(StructureError::out_of_range(index, self.len));
        }
        self.place(value.into(), index);
        Ok(())
    }

    /// Remove the element at `index`, shifting later elements one slot left.
    ///
    /// # Errors
    ///
    /// [`StructureError::OutOfRange`] unless `index < len`.
    pub fn delete_at(&mut self, index: usize) -> Result<String, StructureError> {
        self.check_index(index)?;

        self.slots[index..self.len].rotate_left(1);
        self.len -= 1;
        Ok(std::mem::take(&mut self.slots[self.len]))
    }

    /// Get the element at `index`.
    pub fn get(&self, index: usize) -> Result<&str, StructureError> {
        self.check_index(index)?;
        Ok(&self.slots[index])
    }

    /// Replace the element at `index`, returning the previous value.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<String, StructureError> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.slots[index], value.into()))
    }

    /// Iterate over the filled slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots[..self.len].iter().map(String::as_str)
    }

    /// Drop every element and release the buffer.
    pub fn clear(&mut self) {
        self.slots = Vec::new();
        self.len = 0;
    }

    /// Write `value` at `index <= len`, growing first when full.
    fn place(&mut self, value: String, index: usize) {
        if self.len == self.capacity() {
            self.grow();
        }
        self.slots[index..=self.len].rotate_right(1);
        self.slots[index] = value;
        self.len += 1;
    }

    fn grow(&mut self) {
        let new_capacity = match self.capacity() {
            0 => self.initial_capacity,
            capacity => capacity * 2,
        };
        self.slots.resize(new_capacity, String::new());
    }

    fn check_index(&self, index: usize) -> Result<(), StructureError> {
        if index < self.len {
            Ok(())
        } else {
            Err(StructureError::out_of_range(index, self.len))
        }
    }
}

impl Default for Array {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Array {}

impl Persist for Array {
    const KIND: Kind = Kind::Array;

    fn to_tokens(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    fn empty_like(&self) -> Self {
        Self::with_initial_capacity(self.initial_capacity)
    }

    fn push_token(&mut self, token: &str) -> Result<(), RecordError> {
        self.push(token);
        Ok(())
    }
}
