//! Integration Test: Core Layering
//!
//! **Policy**: `herodeck-core` is surface-agnostic. It reports through
//! `ScreenMessage` and `tracing`, never by printing, and it leaves argument
//! parsing and log formatting to the binary. Production code propagates
//! errors instead of panicking on them.

use std::fs;
use std::path::Path;

use architectural_enforcement::{code_part, report, scan, workspace_root};

fn prints(_path: &Path, lines: &[&str], idx: usize) -> Option<String> {
    let code = code_part(lines[idx]);
    ["println!", "eprintln!", "print!(", "dbg!("]
        .iter()
        .any(|m| code.contains(m))
        .then(|| format!("prints directly: {}", lines[idx].trim()))
}

fn panics_on_error(_path: &Path, lines: &[&str], idx: usize) -> Option<String> {
    let code = code_part(lines[idx]);
    (code.contains(".unwrap()") || code.contains(".expect("))
        .then(|| format!("unwrap in production code: {}", lines[idx].trim()))
}

#[test]
fn test_core_never_prints() {
    report(
        "Core prints instead of sending ScreenMessage or logging",
        &scan("conductor/core/src", prints),
    );
}

#[test]
fn test_core_propagates_errors() {
    report(
        "Core unwraps instead of returning errors",
        &scan("conductor/core/src", panics_on_error),
    );
}

#[test]
fn test_core_has_no_binary_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("conductor/core/Cargo.toml"))
        .expect("core manifest readable");

    for forbidden in ["clap", "tracing-subscriber"] {
        let declared = manifest
            .lines()
            .any(|line| line.trim_start().starts_with(&format!("{forbidden} ")));
        assert!(!declared, "herodeck-core must not depend on {forbidden}");
    }
}

#[test]
fn test_print_detection() {
    let lines = ["    println!(\"{}\", stats);", "    // println!(\"gone\");"];
    assert!(prints(Path::new("src/screen.rs"), &lines, 0).is_some());
    assert!(prints(Path::new("src/screen.rs"), &lines, 1).is_none());
}
