//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, structure views are machine-readable JSON.
//!
//! # Reply Rendering
//!
//! | Reply | Text |
//! |-------|------|
//! | `Done` | nothing |
//! | `Value` | the value |
//! | `Count` | the number |
//! | `Found` | `TRUE` / `FALSE` |
//! | `Keys` | keys separated by spaces |
//! | `Neighbour` | the key, or an empty line |
//! | `View` | `Stack (size: 2): [b, a]` |

use std::fmt::Display;

use serde::Serialize;

use crate::core::types::Kind;
use crate::engine::{Reply, StructureView};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print query output (always shown).
pub fn answer(message: impl Display) {
    println!("{}", message);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a reply as text; `None` when there is nothing to print.
pub fn render_reply(reply: &Reply) -> Option<String> {
    match reply {
        Reply::Done => None,
        Reply::Value(value) => Some(value.clone()),
        Reply::Count(count) => Some(count.to_string()),
        Reply::Found(found) => Some(if *found { "TRUE" } else { "FALSE" }.to_string()),
        Reply::Keys(keys) => Some(
            keys.iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        ),
        Reply::Neighbour(key) => Some(key.map(|k| k.to_string()).unwrap_or_default()),
        Reply::View(view) => Some(render_view(view)),
    }
}

/// Pretty-print a structure.
///
/// Arrays report `len`, trees report nothing, everything else `size`.
pub fn render_view(view: &StructureView) -> String {
    let values = view.values.join(", ");
    match view.kind {
        Kind::Array => format!("{} (len: {}): [{}]", view.kind, view.values.len(), values),
        Kind::Tree => format!("{}: [{}]", view.kind, values),
        _ => format!("{} (size: {}): [{}]", view.kind, view.values.len(), values),
    }
}

/// Serialize `value` as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::StructureName;

    fn view(kind: Kind, values: &[&str]) -> StructureView {
        StructureView {
            name: StructureName::new("v").unwrap(),
            kind,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn views_by_kind() {
        assert_eq!(render_view(&view(Kind::Array, &["x", "b"])), "Array (len: 2): [x, b]");
        assert_eq!(render_view(&view(Kind::Stack, &["a"])), "Stack (size: 1): [a]");
        assert_eq!(render_view(&view(Kind::DoubleList, &[])), "DoubleList (size: 0): []");
        assert_eq!(
            render_view(&view(Kind::Tree, &["20", "40"])),
            "BinarySearchTree: [20, 40]"
        );
    }

    #[test]
    fn replies() {
        assert_eq!(render_reply(&Reply::Done), None);
        assert_eq!(render_reply(&Reply::Found(false)).as_deref(), Some("FALSE"));
        assert_eq!(render_reply(&Reply::Count(3)).as_deref(), Some("3"));
        assert_eq!(
            render_reply(&Reply::Keys(vec![2, 1, 3])).as_deref(),
            Some("2 1 3")
        );
        assert_eq!(render_reply(&Reply::Neighbour(None)).as_deref(), Some(""));
        assert_eq!(render_reply(&Reply::Neighbour(Some(-4))).as_deref(), Some("-4"));
    }

    #[test]
    fn view_json_fields() {
        let json = to_json(&view(Kind::Queue, &["a"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "v", "kind": "queue", "values": ["a"]})
        );
    }

    #[test]
    fn list_formatting() {
        assert_eq!(format_list(&["a", "b"], "- "), "- a\n- b");
    }
}
