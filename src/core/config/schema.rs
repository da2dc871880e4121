//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$STRUCTDB_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/structdb/config.toml`
//! 3. `~/.structdb/config.toml`
//!
//! # Validation
//!
//! Config values are validated after parsing: every limit must be at least 1
//! and the database path must not be empty.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// On-disk configuration.
///
/// # Example
///
/// ```toml
/// database = "/home/me/.local/share/structdb/db.txt"
///
/// [limits]
/// array_initial_capacity = 10
/// stack_capacity = 1000
/// queue_capacity = 1000
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Database file used when `--file` is not given
    pub database: Option<PathBuf>,

    /// Structure size limits
    pub limits: Option<LimitsConfig>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(database) = &self.database {
            if database.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "database path cannot be empty".to_string(),
                ));
            }
        }

        if let Some(limits) = &self.limits {
            limits.validate()?;
        }

        Ok(())
    }
}

/// The `[limits]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Capacity an unsized array grows to first
    pub array_initial_capacity: Option<usize>,

    /// Maximum stack size
    pub stack_capacity: Option<usize>,

    /// Maximum queue size
    pub queue_capacity: Option<usize>,
}

impl LimitsConfig {
    /// Keys of the `[limits]` table, in declaration order.
    pub const KEYS: &'static [&'static str] =
        &["array_initial_capacity", "stack_capacity", "queue_capacity"];

    /// Validate the limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            self.array_initial_capacity,
            self.stack_capacity,
            self.queue_capacity,
        ];
        for (key, value) in Self::KEYS.iter().zip(values) {
            if value == Some(0) {
                return Err(ConfigError::InvalidValue(format!(
                    "limits.{} must be at least 1",
                    key
                )));
            }
        }
        Ok(())
    }
}
