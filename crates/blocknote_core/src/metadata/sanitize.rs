//! Display sanitizer for block content.
//!
//! # Responsibility
//! - Render content for display with metadata markers hidden.
//!
//! # Invariants
//! - Newlines are never removed or merged into spaces.
//! - `display_content(display_content(s)) == display_content(s)`.
//! - Stored content is never touched; callers re-derive on every render.

use once_cell::sync::Lazy;
use regex::Regex;

// `[^\S\n]` is horizontal whitespace only, so marker removal cannot eat
// line breaks.
static PRIORITY_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[^\S\n]*!p[1-4]\b[^\S\n]*").expect("valid priority marker regex")
});
static DATE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[^\S\n]*\^(?:today|tomorrow|upcoming)\b[^\S\n]*")
        .expect("valid date marker regex")
});
static FORMATTED_DATE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\S\n]*\^[0-9]{2}\.[0-9]{2}\.[0-9]{4}[^\S\n]*")
        .expect("valid formatted date marker regex")
});
static TAG_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[^\S\n]*#[a-z0-9_-]+\b[^\S\n]*").expect("valid tag marker regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Returns `content` with priority, date and tag markers removed.
///
/// Whitespace inside each line collapses to single spaces, each line is
/// trimmed, and the joined result is trimmed.
pub fn display_content(content: &str) -> String {
    let without_priority = PRIORITY_MARKER_RE.replace_all(content, " ");
    let without_dates = DATE_MARKER_RE.replace_all(&without_priority, " ");
    let without_formatted = FORMATTED_DATE_MARKER_RE.replace_all(&without_dates, " ");
    let cleaned = TAG_MARKER_RE.replace_all(&without_formatted, " ");

    cleaned
        .split('\n')
        .map(|line| WHITESPACE_RE.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
