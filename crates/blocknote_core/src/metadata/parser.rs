//! Inline metadata marker parser.
//!
//! # Responsibility
//! - Extract priority, due date and tags from raw block content.
//! - Expose marker predicates shared with the query evaluator.
//!
//! # Invariants
//! - Parsing is pure and total: no input fails, missing markers yield
//!   defaults.
//! - Markers stay in stored content; parsing never rewrites it.
//! - Tags are lower-cased and unique, in first-seen order.

use crate::model::block::{DueDate, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const TODAY_MARKER: &str = "^today";
pub(crate) const TOMORROW_MARKER: &str = "^tomorrow";
pub(crate) const UPCOMING_MARKER: &str = "^upcoming";

static PRIORITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)!p([1-4])\b").expect("valid priority regex"));
static FORMATTED_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\^([0-9]{2}\.[0-9]{2}\.[0-9]{4})").expect("valid formatted date regex")
});
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#([a-z0-9_-]+)\b").expect("valid tag regex"));

/// Structured metadata extracted from one content string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockMetadata {
    pub priority: Priority,
    pub date: Option<DueDate>,
    pub tags: Vec<String>,
}

impl BlockMetadata {
    pub fn is_empty(&self) -> bool {
        self.priority.is_none() && self.date.is_none() && self.tags.is_empty()
    }
}

/// Parses all metadata markers from `content`.
pub fn parse_content(content: &str) -> BlockMetadata {
    BlockMetadata {
        priority: parse_priority(content),
        date: parse_date(content),
        tags: parse_tags(content),
    }
}

/// First `!pN` marker, `Priority::None` when absent.
pub fn parse_priority(content: &str) -> Priority {
    PRIORITY_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|digit| digit.as_str().parse::<u8>().ok())
        .and_then(Priority::from_level)
        .unwrap_or_default()
}

/// Due date marker; precedence is `^today`, `^tomorrow`, `^upcoming`, then
/// the first formatted `^MM.DD.YYYY` token.
pub fn parse_date(content: &str) -> Option<DueDate> {
    if has_today_marker(content) {
        return Some(DueDate::Today);
    }
    if has_tomorrow_marker(content) {
        return Some(DueDate::Tomorrow);
    }
    if contains_ignore_case(content, UPCOMING_MARKER) {
        return Some(DueDate::Upcoming);
    }
    FORMATTED_DATE_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|date| DueDate::On(date.as_str().to_string()))
}

/// All `#tag` markers, lower-cased and de-duplicated in first-seen order.
pub fn parse_tags(content: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for caps in TAG_RE.captures_iter(content) {
        let Some(name) = caps.get(1) else {
            continue;
        };
        let tag = name.as_str().to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Case-insensitive `^today` substring test.
pub fn has_today_marker(content: &str) -> bool {
    contains_ignore_case(content, TODAY_MARKER)
}

/// Case-insensitive `^tomorrow` substring test.
pub fn has_tomorrow_marker(content: &str) -> bool {
    contains_ignore_case(content, TOMORROW_MARKER)
}

/// Whether content carries a `^MM.DD.YYYY` marker.
pub fn has_formatted_date_marker(content: &str) -> bool {
    FORMATTED_DATE_RE.is_match(content)
}

/// Whether content carries any date marker at all.
pub fn has_any_date_marker(content: &str) -> bool {
    has_today_marker(content) || has_tomorrow_marker(content) || has_formatted_date_marker(content)
}

fn contains_ignore_case(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}
