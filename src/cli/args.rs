//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--file <path>`: Database file (overrides the configured `database`)
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output, no logging
//! - `--json`: Machine-readable output for `PRINT` and `list`

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// StructDB - named data structures persisted to a flat text file
#[derive(Parser, Debug)]
#[command(name = "sdb")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "\
QUERY EXAMPLES:
    # Create a tree and fill it
    sdb --file db.txt --query 'TCREATE keys'
    sdb --file db.txt --query 'TINSERT keys 50'

    # Walk it
    sdb --file db.txt --query 'TGET keys IN'

    # Without a name, queries use the structure called 'default'
    sdb --file db.txt --query 'SPUSH hello'

Run 'sdb opcodes' for every query command."
)]
pub struct Cli {
    /// Database file
    #[arg(long, short = 'f', global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Query to run against the database
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; disables logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every stored structure
    #[command(
        name = "list",
        long_about = "List every structure in the database.\n\n\
            Shows the name, kind and element count of each stored structure, \
            sorted by name. With --json, prints an array of objects instead.",
        after_help = "\
WORKFLOW EXAMPLES:
    # What is in the database?
    sdb --file db.txt list

    # For scripts
    sdb --file db.txt --json list"
    )]
    List,

    /// Show every query command
    #[command(name = "opcodes")]
    Opcodes,

    /// Get or list configuration values
    #[command(
        name = "config",
        long_about = "View StructDB configuration.\n\n\
            Configuration is read from $STRUCTDB_CONFIG, \
            $XDG_CONFIG_HOME/structdb/config.toml or ~/.structdb/config.toml, \
            whichever exists first.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List all configuration values
    sdb config list

    # Get a specific value
    sdb config get limits.queue_capacity

    # Which file is in use?
    sdb config path"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for sdb.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    sdb completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    sdb completion zsh >> ~/.zshrc

    # Fish
    sdb completion fish > ~/.config/fish/completions/sdb.fish

    # PowerShell
    sdb completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// List all configuration values
    List,
    /// Show the configuration file in use
    Path,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_query() {
        let cli = Cli::try_parse_from(["sdb", "--file", "db.txt", "--query", "SPUSH a"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("db.txt")));
        assert_eq!(cli.query.as_deref(), Some("SPUSH a"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sdb", "list", "--json", "-q"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Command::List)));
    }

    #[test]
    fn parse_config_get() {
        let cli = Cli::try_parse_from(["sdb", "config", "get", "database"]).unwrap();
        match cli.command {
            Some(Command::Config {
                action: ConfigAction::Get { key },
            }) => assert_eq!(key, "database"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
