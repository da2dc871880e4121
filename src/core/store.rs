//! core::store
//!
//! The name-keyed collection of structures and its flat-file persistence.
//!
//! # Lifecycle
//!
//! One invocation runs load → mutate → save. [`Store::load`] reads the whole
//! file up front and [`Store::save`] rewrites it from scratch, so nothing
//! survives between invocations except through the file.
//!
//! # File Format
//!
//! One record per line (see [`crate::core::record`]), sorted by name on save.
//! Blank lines are ignored. Lines whose tag names no known kind are skipped
//! and reported in the [`LoadReport`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use structdb::core::factory::Factory;
//! use structdb::core::store::Store;
//! use structdb::core::structures::Queue;
//! use structdb::core::types::StructureName;
//!
//! let path = Path::new("db.txt");
//! let (mut store, _report) = Store::load(path, Factory::default()).unwrap();
//! let name = StructureName::new("jobs").unwrap();
//! store.get_or_create::<Queue>(&name).unwrap();
//! store.save(path).unwrap();
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::factory::Factory;
use crate::core::record::{leading_tag, RecordError};
use crate::core::structures::{Structure, Variant};
use crate::core::types::{Kind, StructureName};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("structure '{0}' not found")]
    NotFound(String),

    #[error("structure '{0}' already exists")]
    AlreadyExists(StructureName),

    #[error("structure '{name}' is a {actual}, not a {expected}")]
    WrongKind {
        name: StructureName,
        expected: Kind,
        actual: Kind,
    },

    #[error("malformed record on line {line} of '{}': {source}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        source: RecordError,
    },

    #[error("failed to read database '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write database '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to create directory '{}': {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
}

/// A line skipped during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    /// The leading token that was not recognized
    pub tag: String,
}

/// Summary of a [`Store::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Whether the database file existed
    pub existed: bool,
    /// Number of records loaded
    pub loaded: usize,
    /// Lines skipped because of an unknown tag
    pub skipped: Vec<SkippedLine>,
}

/// In-memory store of named structures.
#[derive(Debug, Clone, Default)]
pub struct Store {
    structures: BTreeMap<StructureName, Structure>,
    factory: Factory,
}

impl Store {
    /// Create an empty store.
    pub fn new(factory: Factory) -> Self {
        Self {
            structures: BTreeMap::new(),
            factory,
        }
    }

    /// The factory used for loading and auto-creation.
    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Load a store from `path`.
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Read`] if the file exists but cannot be read
    /// - [`StoreError::Malformed`] for a bad record with a known tag
    pub fn load(path: &Path, factory: Factory) -> Result<(Store, LoadReport), StoreError> {
        let mut store = Store::new(factory);
        let mut report = LoadReport::default();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "database missing, starting empty");
                return Ok((store, report));
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        report.existed = true;

        for (index, line) in contents.lines().enumerate() {
            let line_number = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let body = leading_tag(line).and_then(|tag| factory.create(tag).ok());
            let Some(mut body) = body else {
                let tag = line.split_whitespace().next().unwrap_or_default().to_string();
                tracing::warn!(line = line_number, tag = %tag, "skipping record with unknown tag");
                report.skipped.push(SkippedLine {
                    line: line_number,
                    tag,
                });
                continue;
            };

            let name = body.deserialize(line).map_err(|source| StoreError::Malformed {
                path: path.to_path_buf(),
                line: line_number,
                source,
            })?;

            let structure = Structure::new(name.clone(), body);
            if store.structures.insert(name.clone(), structure).is_some() {
                tracing::warn!(line = line_number, name = %name, "duplicate structure name, keeping the later record");
            } else {
                report.loaded += 1;
            }
        }

        tracing::debug!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded database"
        );
        Ok((store, report))
    }

    /// Write every structure to `path`, replacing the file.
    ///
    /// Creates parent directories if needed. The records are written to a
    /// temporary sibling file that is renamed over `path`.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut contents = String::new();
        for structure in self.structures.values() {
            contents.push_str(&structure.serialize());
            contents.push('\n');
        }

        let temp_path = temp_sibling(path);
        let write_err = |e: io::Error| StoreError::Write {
            path: temp_path.clone(),
            source: e,
        };

        let mut file = fs::File::create(&temp_path).map_err(write_err)?;
        file.write_all(contents.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;

        // Atomic rename
        fs::rename(&temp_path, path).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), structures = self.len(), "saved database");
        Ok(())
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.structures.contains_key(name)
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &StructureName> {
        self.structures.keys()
    }

    /// Structures in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.structures.values()
    }

    pub fn get(&self, name: &str) -> Result<&Structure, StoreError> {
        self.structures
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Structure, StoreError> {
        self.structures
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Insert a new structure.
    ///
    /// # Errors
    ///
    /// [`StoreError::AlreadyExists`] if the name is taken.
    pub fn put(&mut self, structure: Structure) -> Result<(), StoreError> {
        if self.structures.contains_key(&structure.name) {
            return Err(StoreError::AlreadyExists(structure.name));
        }
        self.structures.insert(structure.name.clone(), structure);
        Ok(())
    }

    /// Create an empty structure of `kind` under `name`.
    pub fn create(&mut self, name: StructureName, kind: Kind) -> Result<&mut Structure, StoreError> {
        if self.structures.contains_key(&name) {
            return Err(StoreError::AlreadyExists(name));
        }
        let body = self.factory.empty(kind);
        Ok(self
            .structures
            .entry(name.clone())
            .or_insert_with(|| Structure::new(name, body)))
    }

    pub fn remove(&mut self, name: &str) -> Result<Structure, StoreError> {
        self.structures
            .remove(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// The structure `name` as a `T`; it must exist.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if `name` is absent
    /// - [`StoreError::WrongKind`] if `name` holds another kind
    pub fn typed_mut<T: Variant>(&mut self, name: &str) -> Result<&mut T, StoreError> {
        let structure = self.get_mut(name)?;
        downcast_mut(structure)
    }

    /// The structure `name` as a `T`, creating an empty one if absent.
    ///
    /// # Errors
    ///
    /// [`StoreError::WrongKind`] if `name` exists with another kind.
    pub fn get_or_create<T: Variant>(&mut self, name: &StructureName) -> Result<&mut T, StoreError> {
        let factory = self.factory;
        let structure = self.structures.entry(name.clone()).or_insert_with(|| {
            tracing::debug!(name = %name, kind = %T::KIND, "auto-creating structure");
            Structure::new(name.clone(), factory.empty(T::KIND))
        });
        downcast_mut(structure)
    }
}

fn downcast_mut<T: Variant>(structure: &mut Structure) -> Result<&mut T, StoreError> {
    let actual = structure.kind();
    let name = &structure.name;
    T::from_body_mut(&mut structure.body).ok_or_else(|| StoreError::WrongKind {
        name: name.clone(),
        expected: T::KIND,
        actual,
    })
}

/// `db.txt` → `db.txt.tmp` in the same directory.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
