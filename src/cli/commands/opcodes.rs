//! opcodes command - Show the query language

use crate::cli::Session;
use crate::engine::Opcode;
use crate::ui::output;
use anyhow::Result;

/// Print every opcode with its argument synopsis.
pub fn opcodes(session: &Session) -> Result<()> {
    let lines: Vec<String> = Opcode::all()
        .map(|(_, spelling, synopsis)| format!("{:<11} {}", spelling, synopsis))
        .collect();

    output::print("Query commands ([name] defaults to 'default'):", session.verbosity);
    output::answer(output::format_list(&lines, "  "));
    Ok(())
}
