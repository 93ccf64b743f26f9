//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT sleep to wait for work. Completions
//! arrive on channels and are awaited.
//! **Exceptions**: the headless media player, which simulates playback length,
//! and deadline waits via `sleep_until`.

use std::path::Path;

use architectural_enforcement::{code_part, report, scan, Violation};

const SIMULATED_PLAYBACK: &str = "capabilities/headless.rs";

fn sleep_call(path: &Path, lines: &[&str], idx: usize) -> Option<String> {
    let code = code_part(lines[idx]);
    let sleeps = code.contains("::sleep(") || code.contains(".sleep(");
    if !sleeps || path.ends_with(SIMULATED_PLAYBACK) {
        return None;
    }
    Some(format!("sleep call: {}", lines[idx].trim()))
}

fn find_sleep_violations() -> Vec<Violation> {
    let mut violations = scan("conductor/core/src", sleep_call);
    violations.extend(scan("conductor/cli/src", sleep_call));
    violations
}

#[test]
fn test_no_sleep_in_production_code() {
    report(
        "Sleep calls found in production code; await a channel or deadline instead",
        &find_sleep_violations(),
    );
}

#[test]
fn test_sleep_detection() {
    let lines = ["    tokio::time::sleep(Duration::from_millis(10)).await;"];
    assert!(sleep_call(Path::new("src/screen.rs"), &lines, 0).is_some());
    assert!(sleep_call(Path::new("src/capabilities/headless.rs"), &lines, 0).is_none());

    let deadline = ["    tokio::time::sleep_until(deadline).await;"];
    assert!(sleep_call(Path::new("src/intro.rs"), &deadline, 0).is_none());
}
