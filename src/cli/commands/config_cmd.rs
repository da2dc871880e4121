//! config command - Get or list configuration values

use crate::cli::Session;
use crate::core::config::Config;
use crate::ui::output;
use anyhow::Result;

/// Get a configuration value.
pub fn get(session: &Session, key: &str) -> Result<()> {
    // Known key without a value: print nothing
    if let Some(value) = session.config.get(key)? {
        output::answer(value);
    }
    Ok(())
}

/// List all configuration values.
pub fn list(session: &Session) -> Result<()> {
    output::print("# Configuration", session.verbosity);

    for key in Config::KEYS {
        let value = session.config.get(key)?;
        output::answer(format!(
            "{} = {}",
            key,
            value.as_deref().unwrap_or("(not set)")
        ));
    }
    Ok(())
}

/// Show which configuration file is in use.
pub fn path(session: &Session) -> Result<()> {
    match session.config.loaded_from() {
        Some(path) => output::answer(path.display()),
        None => {
            let canonical = Config::canonical_path()?;
            output::print(
                format!(
                    "No config file found; using defaults. Create {} to configure.",
                    canonical.display()
                ),
                session.verbosity,
            );
        }
    }
    Ok(())
}
