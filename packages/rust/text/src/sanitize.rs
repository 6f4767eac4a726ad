//! Sanitization of raw fetched text into single-line prose.
//!
//! Each pass is a function `&str -> String` applied in sequence:
//! drop blank and `=` section-marker lines, flatten to one line, strip
//! parenthetical spans, collapse double spaces.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Run the full sanitization pipeline on raw text.
///
/// Never fails; empty input yields an empty string.
pub fn sanitize(raw: &str) -> String {
    let flattened = strip_blank_and_marker_lines(raw);
    let result = remove_parentheticals(&flattened);

    debug!(
        raw_len = raw.len(),
        sanitized_len = result.len(),
        "sanitized content"
    );

    result
}

// ---------------------------------------------------------------------------
// Pass 1: Drop blank lines and section markers, flatten
// ---------------------------------------------------------------------------

/// Drop blank lines and lines starting with `=`, then join the rest with a
/// single space.
///
/// Surviving lines are joined untrimmed, so leading/trailing whitespace on a
/// line is kept as-is.
pub fn strip_blank_and_marker_lines(text: &str) -> String {
    text.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('=')
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Pass 2: Strip parenthetical spans
// ---------------------------------------------------------------------------

/// Remove parenthetical spans (one level of nesting), then collapse double
/// spaces in a single pass.
///
/// `"(a (b) c)"` is removed whole. Deeper nesting only loses its inner
/// levels, and three adjacent spaces collapse to two, not one.
pub fn remove_parentheticals(text: &str) -> String {
    static PARENTHETICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\((?:\([^()]*\)|[^()])*\)").expect("valid regex")
    });

    PARENTHETICAL_RE.replace_all(text, "").replace("  ", " ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
