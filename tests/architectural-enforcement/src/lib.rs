//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No sleeping in production code outside simulated playback
//! - No blocking I/O inside async functions
//! - The core library stays surface-agnostic
//!
//! The helpers here walk the workspace sources and hand each production line
//! to a check. Anything after a file's first `#[cfg(test)]` is test code and is
//! never scanned.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this package
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Every `.rs` file under `dir` (relative to the workspace root)
#[must_use]
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    if !root.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// Lines before the first `#[cfg(test)]`
#[must_use]
pub fn production_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .take_while(|line| !line.trim_start().starts_with("#[cfg(test)]"))
        .collect()
}

/// A line with any `//` comment removed
#[must_use]
pub fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Kind of the function enclosing a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FnKind {
    /// `async fn`
    Async,
    /// Plain `fn`
    Sync,
}

/// Find the nearest function signature above `idx`
///
/// Stops at `mod` and `impl` boundaries.
#[must_use]
pub fn enclosing_fn(lines: &[&str], idx: usize) -> Option<FnKind> {
    for line in lines[..idx.min(lines.len())].iter().rev() {
        let line = strip_visibility(line.trim());

        if line.starts_with("async fn ") {
            return Some(FnKind::Async);
        }
        if line.starts_with("fn ") {
            return Some(FnKind::Sync);
        }
        if line.starts_with("mod ") || (line.starts_with("impl") && line.contains('{')) {
            return None;
        }
    }
    None
}

fn strip_visibility(line: &str) -> &str {
    for prefix in ["pub(crate) ", "pub(super) ", "pub "] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return rest;
        }
    }
    line
}

/// One policy violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File the violation is in
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// What was found
    pub text: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line, self.text)
    }
}

/// Run `check` over every production line in `dir`
///
/// `check` gets the file path, all production lines, and the index of the
/// line being checked, and returns a description for a violation.
pub fn scan<F>(dir: &str, mut check: F) -> Vec<Violation>
where
    F: FnMut(&Path, &[&str], usize) -> Option<String>,
{
    let mut violations = Vec::new();

    for path in rust_files(dir) {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let lines = production_lines(&content);

        for idx in 0..lines.len() {
            if let Some(text) = check(&path, &lines, idx) {
                violations.push(Violation {
                    path: path.clone(),
                    line: idx + 1,
                    text,
                });
            }
        }
    }

    violations
}

/// Print violations and fail the test if there are any
pub fn report(title: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {title}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    panic!("\nFound {} violation(s): {title}", violations.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_tests() {
        let content = "fn a() {}\n#[cfg(test)]\nmod tests {\n    fn b() {}\n}\n";
        assert_eq!(production_lines(content), vec!["fn a() {}"]);
    }

    #[test]
    fn test_enclosing_fn_detection() {
        let lines = vec![
            "impl Loader {",
            "    pub async fn load(&self) {",
            "        let x = 1;",
            "    }",
            "    pub(crate) fn parse() {",
            "        let y = 2;",
            "    }",
            "}",
        ];
        assert_eq!(enclosing_fn(&lines, 2), Some(FnKind::Async));
        assert_eq!(enclosing_fn(&lines, 5), Some(FnKind::Sync));
        assert_eq!(enclosing_fn(&lines, 0), None);
    }

    #[test]
    fn test_code_part_drops_comments() {
        assert_eq!(code_part("let a = 1; // sleep(5)"), "let a = 1; ");
        assert_eq!(code_part("/// docs"), "");
    }

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }
}
