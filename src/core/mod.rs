//! core
//!
//! Core domain types, structure engines, and persistence for structdb.
//!
//! # Modules
//!
//! - [`types`] - Strong types: StructureName, Kind
//! - [`error`] - Errors raised by the structure engines
//! - [`record`] - Line record format and the persistence contract
//! - [`structures`] - The six structure variants
//! - [`factory`] - Tag-driven construction of empty structures
//! - [`store`] - Name-keyed collection with flat-file load/save
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid names and tags from being represented
//! - A failed operation leaves every structure unchanged
//! - The core never terminates the process; errors are returned

pub mod config;
pub mod error;
pub mod factory;
pub mod record;
pub mod store;
pub mod structures;
pub mod types;
