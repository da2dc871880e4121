//! cli
//!
//! Command-line interface layer for StructDB.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Merge CLI flags over the configuration file
//! - Delegate to command handlers
//! - Does NOT touch structures directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for execution. Every database change flows through
//! [`engine::run`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context as _, Result};

use crate::core::config::Config;
use crate::engine;
use crate::ui::output::Verbosity;

/// Settings shared by every command of one invocation.
#[derive(Debug)]
pub struct Session {
    /// Loaded configuration (defaults if no file exists)
    pub config: Config,
    /// `--file`, overriding the configured database
    pub file: Option<PathBuf>,
    pub verbosity: Verbosity,
    /// `--json`
    pub json: bool,
}

impl Session {
    /// Engine context for the selected database.
    ///
    /// Precedence: `--file`, then the configured `database`.
    pub fn context(&self) -> Result<engine::Context> {
        let database = self
            .file
            .clone()
            .or_else(|| self.config.database().map(PathBuf::from))
            .ok_or_else(|| {
                anyhow!("no database file: pass --file or set 'database' in the config file")
            })?;

        Ok(engine::Context {
            database,
            limits: self.config.limits(),
        })
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`, after tracing has
/// been initialized from the same flags.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    let session = Session {
        config,
        file: cli.file,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        json: cli.json,
    };

    match (cli.command, cli.query) {
        (Some(_), Some(_)) => bail!("--query cannot be combined with a subcommand"),
        (Some(command), None) => commands::dispatch(command, &session),
        (None, Some(query)) => commands::query(&session, &query),
        (None, None) => bail!("nothing to do: pass --query '<QUERY>' or a subcommand (see --help)"),
    }
}
