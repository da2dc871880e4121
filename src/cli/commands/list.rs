//! list command - Show every stored structure

use crate::cli::Session;
use crate::core::store::Store;
use crate::core::types::{Kind, StructureName};
use crate::engine::ExecError;
use crate::ui::output;
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Entry<'a> {
    name: &'a StructureName,
    kind: Kind,
    len: usize,
}

/// List structures in name order.
pub fn list(session: &Session) -> Result<()> {
    let ctx = session.context()?;
    let (store, report) = Store::load(ctx.database(), ctx.factory()).map_err(ExecError::from)?;

    if !report.existed {
        output::warn(
            format!("database '{}' does not exist yet", ctx.database().display()),
            session.verbosity,
        );
    }

    let entries: Vec<Entry<'_>> = store
        .iter()
        .map(|structure| Entry {
            name: &structure.name,
            kind: structure.kind(),
            len: structure.len(),
        })
        .collect();

    if session.json {
        output::answer(output::to_json(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output::print("No structures.", session.verbosity);
        return Ok(());
    }

    for entry in &entries {
        output::answer(format!(
            "{:<20} {:<16} {}",
            entry.name.as_str(),
            entry.kind.display_name(),
            entry.len
        ));
    }
    Ok(())
}
