//! Architecture enforcement tests.
//!
//! The layers depend downward only: `cli` → `engine` → `core`, with `ui`
//! used by `cli`. Every database write flows through `engine::run`. These
//! tests catch violations in CI.
//!
//! # Test Categories
//!
//! 1. **Layering** - `core` and `engine` must not reach upward
//! 2. **Single Writer** - Command handlers must not save or touch structures
//! 3. **No Exit** - Library code never terminates the process

use std::fs;
use std::path::{Path, PathBuf};

/// Every `.rs` file under `dir`, recursively.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).unwrap_or_else(|_| panic!("Failed to read {}", dir.display())) {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// Code lines before the first `#[cfg(test)]`, without comments and doctests.
fn non_test_source(path: &Path) -> String {
    let content =
        fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
    let code = match content.find("#[cfg(test)]") {
        Some(index) => &content[..index],
        None => content.as_str(),
    };
    code.lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collect `file: pattern` for every forbidden pattern found under `dir`.
fn find_violations(dir: &str, forbidden: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for path in rust_files(Path::new(dir)) {
        let content = non_test_source(&path);
        for pattern in forbidden {
            if content.contains(pattern) {
                violations.push(format!("{}: uses `{}`", path.display(), pattern));
            }
        }
    }
    violations
}

fn assert_clean(violations: Vec<String>) {
    assert!(
        violations.is_empty(),
        "Architecture violations found:\n  {}",
        violations.join("\n  ")
    );
}

// =============================================================================
// Layering
// =============================================================================

/// `core` knows nothing about queries, the CLI or output formatting.
#[test]
fn core_does_not_depend_on_upper_layers() {
    assert_clean(find_violations(
        "src/core",
        &["crate::engine", "crate::cli", "crate::ui", "println!", "eprintln!"],
    ));
}

/// `engine` returns replies; it never prints or parses arguments.
#[test]
fn engine_does_not_depend_on_cli_or_ui() {
    assert_clean(find_violations(
        "src/engine",
        &["crate::cli", "crate::ui", "println!", "eprintln!"],
    ));
}

// =============================================================================
// Single Writer
// =============================================================================

/// Command handlers go through the engine for every change.
///
/// Reading the store (`list`) is allowed; saving it or reaching into the
/// structures is not.
#[test]
fn commands_do_not_write_the_database() {
    assert_clean(find_violations(
        "src/cli/commands",
        &[".save(", "crate::core::structures", "get_or_create", "typed_mut"],
    ));
}

// =============================================================================
// No Exit
// =============================================================================

/// Only the binary decides the exit status.
#[test]
fn library_never_exits() {
    let mut violations = Vec::new();
    for dir in ["src/core", "src/engine", "src/cli", "src/ui"] {
        violations.extend(find_violations(dir, &["process::exit", "std::process::abort"]));
    }
    assert_clean(violations);
}
