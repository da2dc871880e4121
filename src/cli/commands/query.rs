//! query command - Run one query against the database

use crate::cli::Session;
use crate::engine::{self, Reply};
use crate::ui::output;
use anyhow::Result;

/// Run `line` and print its reply.
///
/// Structure views honour `--json`; every other reply is a single line.
pub fn query(session: &Session, line: &str) -> Result<()> {
    let ctx = session.context()?;
    let outcome = engine::run(&ctx, line)?;

    match &outcome.reply {
        Reply::View(view) if session.json => output::answer(output::to_json(view)?),
        reply => {
            if let Some(text) = output::render_reply(reply) {
                output::answer(text);
            }
        }
    }

    if outcome.mutated {
        tracing::debug!(database = %ctx.database().display(), "database updated");
    }
    Ok(())
}
