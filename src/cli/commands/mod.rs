//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the database and limits from the [`Session`]
//! 2. Calls the engine or the store
//! 3. Formats and displays output through [`crate::ui::output`]
//!
//! Handlers do NOT mutate structures directly.

mod completion;
mod config_cmd;
mod list;
mod opcodes;
mod query;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, path as config_path};
pub use list::list;
pub use opcodes::opcodes;
pub use query::query;

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Session;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, session: &Session) -> Result<()> {
    match command {
        Command::List => list::list(session),
        Command::Opcodes => opcodes::opcodes(session),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(session, &key),
            ConfigAction::List => config_cmd::list(session),
            ConfigAction::Path => config_cmd::path(session),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
