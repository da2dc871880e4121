//! engine::query
//!
//! Parsing of single-line queries.
//!
//! A query is whitespace-separated: an opcode followed by its arguments.
//! The first letter of every structure opcode is the record tag of the kind
//! it operates on (`MPUSH` on arrays, `TINSERT` on trees, ...). `PRINT` and
//! `DROP` work on any kind.
//!
//! # Example
//!
//! ```
//! use structdb::core::types::Kind;
//! use structdb::engine::query::{Opcode, Query};
//!
//! let query = Query::parse("LDELRANGE letters 1 2").unwrap();
//! assert_eq!(query.opcode, Opcode::LDelRange);
//! assert_eq!(query.opcode.kind(), Some(Kind::DoubleList));
//! assert_eq!(query.args, vec!["letters", "1", "2"]);
//! ```

use std::fmt;

use super::ExecError;
use crate::core::types::{validate_token, Kind};

/// Every command understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Array
    MCreate,
    MPush,
    MPushAt,
    MGet,
    MSet,
    MDel,
    MLen,
    // ForwardList
    FCreate,
    FPush,
    FDel,
    FDelVal,
    FSearch,
    FGet,
    FLen,
    // DoubleList
    LCreate,
    LPush,
    LDel,
    LDelVal,
    LSearch,
    LGet,
    LLen,
    LDelBefore,
    LDelAfter,
    LDelRange,
    // Stack
    SCreate,
    SPush,
    SPop,
    SPeek,
    SLen,
    // Queue
    QCreate,
    QPush,
    QPop,
    QPeek,
    QLen,
    // Tree
    TCreate,
    TInsert,
    TSearch,
    TDel,
    TCheck,
    TGet,
    TGetNodes,
    // Any kind
    Print,
    Drop,
}

/// Opcode spellings with their argument synopsis.
const TABLE: &[(&str, Opcode, &str)] = &[
    ("MCREATE", Opcode::MCreate, "[name]"),
    ("MPUSH", Opcode::MPush, "[name] value"),
    ("MPUSHAT", Opcode::MPushAt, "[name] value index"),
    ("MGET", Opcode::MGet, "[name] index"),
    ("MSET", Opcode::MSet, "[name] index value"),
    ("MDEL", Opcode::MDel, "[name] index"),
    ("MLEN", Opcode::MLen, "[name]"),
    ("FCREATE", Opcode::FCreate, "[name]"),
    ("FPUSH", Opcode::FPush, "[name] value mode"),
    ("FDEL", Opcode::FDel, "[name] mode"),
    ("FDELVAL", Opcode::FDelVal, "[name] value"),
    ("FSEARCH", Opcode::FSearch, "[name] value"),
    ("FGET", Opcode::FGet, "[name] index"),
    ("FLEN", Opcode::FLen, "[name]"),
    ("LCREATE", Opcode::LCreate, "[name]"),
    ("LPUSH", Opcode::LPush, "[name] value mode"),
    ("LDEL", Opcode::LDel, "[name] mode"),
    ("LDELVAL", Opcode::LDelVal, "[name] value"),
    ("LSEARCH", Opcode::LSearch, "[name] value"),
    ("LGET", Opcode::LGet, "[name] index"),
    ("LLEN", Opcode::LLen, "[name]"),
    ("LDELBEFORE", Opcode::LDelBefore, "[name] index"),
    ("LDELAFTER", Opcode::LDelAfter, "[name] index"),
    ("LDELRANGE", Opcode::LDelRange, "[name] start end"),
    ("SCREATE", Opcode::SCreate, "[name]"),
    ("SPUSH", Opcode::SPush, "[name] value"),
    ("SPOP", Opcode::SPop, "[name]"),
    ("SPEEK", Opcode::SPeek, "[name]"),
    ("SLEN", Opcode::SLen, "[name]"),
    ("QCREATE", Opcode::QCreate, "[name]"),
    ("QPUSH", Opcode::QPush, "[name] value"),
    ("QPOP", Opcode::QPop, "[name]"),
    ("QPEEK", Opcode::QPeek, "[name]"),
    ("QLEN", Opcode::QLen, "[name]"),
    ("TCREATE", Opcode::TCreate, "[name]"),
    ("TINSERT", Opcode::TInsert, "[name] key"),
    ("TSEARCH", Opcode::TSearch, "[name] key"),
    ("TDEL", Opcode::TDel, "[name] key"),
    ("TCHECK", Opcode::TCheck, "[name]"),
    ("TGET", Opcode::TGet, "[name] PRE|IN|POST|BFS"),
    ("TGETNODES", Opcode::TGetNodes, "[name] key PREV|NEXT"),
    ("PRINT", Opcode::Print, "name"),
    ("DROP", Opcode::Drop, "name"),
];

impl Opcode {
    /// Look up an opcode by its exact (upper-case) spelling.
    pub fn parse(word: &str) -> Option<Self> {
        TABLE
            .iter()
            .find(|(spelling, _, _)| *spelling == word)
            .map(|(_, opcode, _)| *opcode)
    }

    /// Every opcode with its spelling and argument synopsis.
    pub fn all() -> impl Iterator<Item = (Opcode, &'static str, &'static str)> {
        TABLE
            .iter()
            .map(|(spelling, opcode, synopsis)| (*opcode, *spelling, *synopsis))
    }

    pub fn as_str(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, opcode, _)| *opcode == self)
            .map(|(spelling, _, _)| *spelling)
            .unwrap_or("?")
    }

    /// The kind this opcode operates on; `None` for `PRINT` and `DROP`.
    pub fn kind(self) -> Option<Kind> {
        match self {
            Opcode::Print | Opcode::Drop => None,
            other => other.as_str().chars().next().and_then(Kind::from_tag),
        }
    }

    /// Returns `true` for the `*CREATE` opcodes.
    pub fn is_create(self) -> bool {
        matches!(
            self,
            Opcode::MCreate
                | Opcode::FCreate
                | Opcode::LCreate
                | Opcode::SCreate
                | Opcode::QCreate
                | Opcode::TCreate
        )
    }

    /// Returns `true` if the opcode can change the store.
    pub fn is_mutating(self) -> bool {
        !matches!(
            self,
            Opcode::MGet
                | Opcode::MLen
                | Opcode::FSearch
                | Opcode::FGet
                | Opcode::FLen
                | Opcode::LSearch
                | Opcode::LGet
                | Opcode::LLen
                | Opcode::SPeek
                | Opcode::SLen
                | Opcode::QPeek
                | Opcode::QLen
                | Opcode::TSearch
                | Opcode::TCheck
                | Opcode::TGet
                | Opcode::TGetNodes
                | Opcode::Print
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub opcode: Opcode,
    /// Tokens after the opcode, including an optional leading target name
    pub args: Vec<String>,
}

impl Query {
    /// Parse a query line.
    ///
    /// # Errors
    ///
    /// - [`ExecError::EmptyQuery`] for a blank line
    /// - [`ExecError::UnknownCommand`] for an unrecognized opcode
    pub fn parse(line: &str) -> Result<Self, ExecError> {
        Self::from_tokens(line.split_whitespace())
    }

    /// Build a query from pre-split tokens.
    ///
    /// Every token must survive the record format, so empty tokens and
    /// tokens containing whitespace are rejected.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, ExecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = tokens.into_iter().map(Into::into);
        let word = tokens.next().ok_or(ExecError::EmptyQuery)?;
        let opcode = Opcode::parse(&word).ok_or(ExecError::UnknownCommand(word))?;

        let args: Vec<String> = tokens.collect();
        for arg in &args {
            validate_token(arg)?;
        }

        Ok(Self { opcode, args })
    }
}
