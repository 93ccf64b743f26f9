//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: async functions MUST NOT use blocking I/O.
//! **Required**: `tokio::fs`, `tokio::io`, and the async `reqwest` client.
//! **Acceptable**: blocking calls in plain functions, such as loading the
//! config file before the screen starts.

use std::path::Path;

use architectural_enforcement::{code_part, enclosing_fn, report, scan, FnKind, Violation};

const BLOCKING: &[(&str, &str)] = &[
    ("std::fs::", "Blocking file I/O"),
    ("std::net::", "Blocking network I/O"),
    ("std::process::Command", "Blocking process I/O"),
    ("reqwest::blocking", "Blocking HTTP client"),
    ("std::io::stdin()", "Blocking stdin"),
];

fn blocking_call(_path: &Path, lines: &[&str], idx: usize) -> Option<String> {
    let code = code_part(lines[idx]);
    let (_, label) = BLOCKING.iter().find(|(needle, _)| code.contains(needle))?;

    if enclosing_fn(lines, idx) == Some(FnKind::Sync) {
        return None;
    }
    Some(format!("{label}: {}", lines[idx].trim()))
}

fn find_blocking_io_violations() -> Vec<Violation> {
    let mut violations = scan("conductor/core/src", blocking_call);
    violations.extend(scan("conductor/cli/src", blocking_call));
    violations
}

#[test]
fn test_no_blocking_io_in_async_code() {
    report(
        "Blocking I/O found in async code",
        &find_blocking_io_violations(),
    );
}

#[test]
fn test_blocking_io_detection() {
    let lines = [
        "async fn bad_function() {",
        "    let contents = std::fs::read_to_string(\"file.txt\")?;",
        "}",
    ];
    assert!(blocking_call(Path::new("src/lib.rs"), &lines, 1).is_some());
}

#[test]
fn test_sync_function_is_acceptable() {
    let lines = [
        "pub fn load_config_from_path(path: &Path) -> Result<ConfigFile, ConfigError> {",
        "    let text = std::fs::read_to_string(path)?;",
        "}",
    ];
    assert!(blocking_call(Path::new("src/config.rs"), &lines, 1).is_none());
}
