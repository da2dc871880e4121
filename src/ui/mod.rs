//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output goes through this module so that quiet mode and
//! JSON output behave the same for every command. Diagnostics go through
//! `tracing` instead.

pub mod output;
