//! StructDB - named data structures persisted to a flat text file
//!
//! StructDB keeps a set of named structures (arrays, singly and doubly
//! linked lists, stacks, queues and binary search trees) in one text file.
//! Each invocation loads the file, runs one query and saves the result.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Runs one query: Parse → Load → Execute → Save
//! - [`core`] - Structures, record format, factory, store and config
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! StructDB maintains the following invariants:
//!
//! 1. Every stored structure round-trips through its record line
//! 2. A failed query never writes the database
//! 3. Structure operations either succeed or leave the structure unchanged

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
