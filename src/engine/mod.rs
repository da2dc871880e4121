//! engine
//!
//! Runs one query against the database file: Load -> Execute -> Save.
//!
//! # Lifecycle
//!
//! ```text
//! Parse -> Load -> Resolve target -> Execute -> [Save if mutated]
//! ```
//!
//! The query is parsed before the file is touched, so an unknown command
//! never reads or writes the database. Any error aborts before the save
//! step. Queries that cannot change the store skip the save.
//!
//! # Error Codes
//!
//! Every [`ExecError`] maps to a numeric code through [`ExecError::code`]:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 10 | unknown command |
//! | 20 | structure, value or key not found |
//! | 21 | structure or key already exists |
//! | 30 | invalid index or argument |
//! | 40 | empty structure |
//! | 41 | capacity exceeded |
//! | 50 | malformed record |
//! | 60 | I/O failure |
//!
//! # Example
//!
//! ```no_run
//! use structdb::engine::{self, Context, Reply};
//!
//! let ctx = Context::new("db.txt");
//! engine::run(&ctx, "SPUSH hello").unwrap();
//! let outcome = engine::run(&ctx, "SPOP").unwrap();
//! assert_eq!(outcome.reply, Reply::Value("hello".into()));
//! ```

pub mod exec;
pub mod query;

pub use exec::execute;
pub use query::{Opcode, Query};

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::core::error::StructureError;
use crate::core::factory::{Factory, Limits};
use crate::core::store::{Store, StoreError};
use crate::core::structures::Structure;
use crate::core::types::{Kind, StructureName, TypeError};

/// Execution context for a query.
#[derive(Debug, Clone)]
pub struct Context {
    /// Database file
    pub database: PathBuf,
    /// Limits for new and loaded structures
    pub limits: Limits,
}

impl Context {
    /// Context with default limits.
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            limits: Limits::default(),
        }
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    pub fn factory(&self) -> Factory {
        Factory::new(self.limits)
    }
}

/// Errors from parsing or executing a query.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("empty query")]
    EmptyQuery,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("unknown {command} mode '{mode}'")]
    UnknownMode { command: Opcode, mode: String },

    #[error("{command}: missing argument <{argument}>")]
    MissingArgument {
        command: Opcode,
        argument: &'static str,
    },

    #[error("{command}: invalid {argument} '{value}'")]
    InvalidArgument {
        command: Opcode,
        argument: &'static str,
        value: String,
    },

    #[error(transparent)]
    InvalidToken(#[from] TypeError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ExecError {
    /// Numeric error code reported by the command line.
    pub fn code(&self) -> u8 {
        match self {
            ExecError::EmptyQuery | ExecError::UnknownCommand(_) | ExecError::UnknownMode { .. } => 10,
            ExecError::MissingArgument { .. }
            | ExecError::InvalidArgument { .. }
            | ExecError::InvalidToken(_) => 30,
            ExecError::Structure(e) => match e {
                StructureError::ValueNotFound(_) | StructureError::KeyNotFound(_) => 20,
                StructureError::DuplicateKey(_) => 21,
                StructureError::OutOfRange { .. } | StructureError::InvalidRange { .. } => 30,
                StructureError::Empty => 40,
                StructureError::Overflow { .. } => 41,
            },
            ExecError::Store(e) => match e {
                StoreError::NotFound(_) => 20,
                StoreError::AlreadyExists(_) => 21,
                StoreError::WrongKind { .. } => 30,
                StoreError::Malformed { .. } => 50,
                StoreError::Read { .. } | StoreError::Write { .. } | StoreError::CreateDir { .. } => 60,
            },
        }
    }
}

/// A structure snapshot for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureView {
    pub name: StructureName,
    pub kind: Kind,
    /// Elements in display order
    pub values: Vec<String>,
}

impl StructureView {
    pub fn of(structure: &Structure) -> Self {
        Self {
            name: structure.name.clone(),
            kind: structure.kind(),
            values: structure.body.display_values(),
        }
    }
}

/// The answer to a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Reply {
    /// Nothing to print
    Done,
    /// A single element
    Value(String),
    /// A length
    Count(usize),
    /// A membership test, printed as `TRUE`/`FALSE`
    Found(bool),
    /// Tree keys in traversal order
    Keys(Vec<i64>),
    /// A tree neighbour key, printed as an empty line when absent
    Neighbour(Option<i64>),
    /// A whole structure
    View(StructureView),
}

/// Result of executing a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: Reply,
    /// Whether the store changed and must be saved
    pub mutated: bool,
}

/// Run one query: load the database, execute, and save if anything changed.
pub fn run(ctx: &Context, line: &str) -> Result<Outcome, ExecError> {
    let query = Query::parse(line)?;
    tracing::debug!(opcode = %query.opcode, args = ?query.args, "parsed query");

    let (mut store, report) = Store::load(ctx.database(), ctx.factory())?;
    if !report.skipped.is_empty() {
        tracing::debug!(skipped = report.skipped.len(), "ignored unknown records");
    }

    let outcome = execute(&mut store, &query)?;
    if outcome.mutated {
        store.save(ctx.database())?;
    } else {
        tracing::debug!("read-only query, skipping save");
    }
    Ok(outcome)
}
