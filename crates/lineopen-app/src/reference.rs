//! Source reference detection in log lines.
//!
//! Log lines written by the firmware tooling embed the emitting source
//! location as a quoted CSV field, e.g.
//! `12:00:01,"INFO","../../drivers/foo.c:77","started"`.
//! The path is relative to the build output directory and always climbs
//! two levels before descending into the source tree.

use regex::Regex;
use std::sync::LazyLock;

/// Matches `","../../<path>:<line>` anywhere in a line.
static SOURCE_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"","(?P<source>\.\./\.\./[\w./]+):(?P<line>\d+)"#)
        .expect("source reference regex is valid")
});

// ─────────────────────────────────────────────────────────────────────────────
// SourceReference
// ─────────────────────────────────────────────────────────────────────────────

/// A relative source location found in a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    /// Relative path, always starting with `../../`
    pub path: String,
    /// Line number exactly as written in the log line
    pub line: String,
}

impl SourceReference {
    pub fn new(path: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: line.into(),
        }
    }
}

/// Find the first source reference embedded in `line`.
///
/// Searches anywhere in the line; returns `None` when no reference is present,
/// which is the common case for most log lines.
pub fn find_source_reference(line: &str) -> Option<SourceReference> {
    let captures = SOURCE_REFERENCE_REGEX.captures(line)?;
    let path = captures.name("source")?.as_str();
    let line_number = captures.name("line")?.as_str();
    Some(SourceReference::new(path, line_number))
}
