//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$STRUCTDB_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/structdb/config.toml`
//! 3. `~/.structdb/config.toml` (canonical location)
//!
//! # Example
//!
//! ```no_run
//! use structdb::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Stack capacity: {}", config.limits().stack_capacity);
//! if let Some(db) = config.database() {
//!     println!("Database: {}", db.display());
//! }
//! ```

pub mod schema;

pub use schema::{ConfigFile, LimitsConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::factory::Limits;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key '{0}'")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Resolved configuration.
///
/// Accessors apply defaults for anything the file leaves unset.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents
    pub file: ConfigFile,
    /// Path the file was loaded from, if any
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Every key understood by [`get`](Config::get), in display order.
    pub const KEYS: &'static [&'static str] = &[
        "database",
        "limits.array_initial_capacity",
        "limits.stack_capacity",
        "limits.queue_capacity",
    ];

    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated. A missing config file is not an error.
    pub fn load() -> Result<Config, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let file = Self::read_config(path)?;
        file.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Config {
            file,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn locate() -> Option<PathBuf> {
        // 1. Check $STRUCTDB_CONFIG
        if let Ok(path) = std::env::var("STRUCTDB_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/structdb/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("structdb/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.structdb/config.toml
        let path = dirs::home_dir()?.join(".structdb/config.toml");
        path.exists().then_some(path)
    }

    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical config path.
    ///
    /// Returns `~/.structdb/config.toml`.
    pub fn canonical_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".structdb/config.toml"))
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Default database file, if configured.
    pub fn database(&self) -> Option<&Path> {
        self.file.database.as_deref()
    }

    /// Structure limits with defaults applied.
    pub fn limits(&self) -> Limits {
        let defaults = Limits::default();
        let Some(limits) = &self.file.limits else {
            return defaults;
        };
        Limits {
            array_initial_capacity: limits
                .array_initial_capacity
                .unwrap_or(defaults.array_initial_capacity),
            stack_capacity: limits.stack_capacity.unwrap_or(defaults.stack_capacity),
            queue_capacity: limits.queue_capacity.unwrap_or(defaults.queue_capacity),
        }
    }

    /// Look up one key as a display string.
    ///
    /// Returns `Ok(None)` for a known key that is unset and has no default.
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let limits = self.limits();
        let value = match key {
            "database" => self.database().map(|p| p.display().to_string()),
            "limits.array_initial_capacity" => Some(limits.array_initial_capacity.to_string()),
            "limits.stack_capacity" => Some(limits.stack_capacity.to_string()),
            "limits.queue_capacity" => Some(limits.queue_capacity.to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Get the path the configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (temp, path)
    }

    #[test]
    fn defaults_without_file() {
        let config = Config::default();
        assert!(config.database().is_none());
        assert_eq!(config.limits(), Limits::default());
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_from_path() {
        let (_temp, path) = write_config(
            r#"
            database = "data/db.txt"

            [limits]
            queue_capacity = 3
            "#,
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database(), Some(Path::new("data/db.txt")));
        assert_eq!(config.limits().queue_capacity, 3);
        assert_eq!(config.limits().stack_capacity, 1000);
        assert_eq!(config.loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn invalid_limit_rejected() {
        let (_temp, path) = write_config("[limits]\nstack_capacity = 0\n");
        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn unknown_fields_rejected() {
        let (_temp, path) = write_config("database = \"db\"\nunknown_field = true\n");
        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let result = Config::load_from(&temp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let config = Config::default();
        assert_eq!(config.get("database").unwrap(), None);
        assert_eq!(
            config.get("limits.stack_capacity").unwrap(),
            Some("1000".to_string())
        );
        for key in Config::KEYS {
            assert!(config.get(key).is_ok());
        }
        assert!(matches!(
            config.get("limits.tree_capacity"),
            Err(ConfigError::UnknownKey(_))
        ));
    }
}
