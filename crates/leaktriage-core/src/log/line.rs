//! Raw line normalization for refcount statistics dumps.
//!
//! The instrumentation marks summary lines with a BEL byte (0x07). That
//! byte carries no information for classification and is removed before a
//! line is compared or split.

use crate::error::LeakLogError;

/// Marker byte emitted by the instrumentation on summary lines.
pub const BELL: char = '\x07';

/// Normalizes a raw log line.
///
/// Removes every BEL wherever it occurs, then one trailing `\n`, then any
/// leading spaces. Tabs and other whitespace are kept.
pub fn normalize(raw: &str) -> String {
    let without_bell: String = raw.chars().filter(|&c| c != BELL).collect();
    let trimmed = without_bell.strip_suffix('\n').unwrap_or(&without_bell);
    trimmed.trim_start_matches(' ').to_string()
}

/// Extracts the symbolic object name from a normalized entry line.
///
/// Fields are separated by single spaces, so a run of spaces yields empty
/// fields. The name is field 1. A line with no second field means the dump
/// format itself is broken and is reported as
/// [`LeakLogError::MalformedLogLine`].
pub fn symbolic_name(normalized: &str, line_number: usize) -> Result<&str, LeakLogError> {
    normalized
        .split(' ')
        .nth(1)
        .ok_or_else(|| LeakLogError::MalformedLogLine {
            line_number,
            line: normalized.to_string(),
        })
}
