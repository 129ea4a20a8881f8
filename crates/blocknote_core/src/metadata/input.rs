//! Edit-time input processing.
//!
//! # Responsibility
//! - Apply one raw edit to a block: checkbox shorthand, metadata refresh.
//! - Apply command-menu kind changes and the `watch <title>` command.
//!
//! # Invariants
//! - Returns a new block; the input block is never mutated.
//! - Parsed metadata overrides explicit values only when a marker exists.

use crate::metadata::parser::parse_content;
use crate::model::block::{Block, BlockKind, BlockType, QUERY_BLOCK_TITLE};
use once_cell::sync::Lazy;
use regex::Regex;

static UNCHECKED_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\s?\]").expect("valid unchecked task regex"));
static CHECKED_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[[xX]\]").expect("valid checked task regex"));
static WATCH_COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^watch\s+(.+)$").expect("valid watch command regex"));
static SLUG_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid slug strip regex"));
static SLUG_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const IMDB_SEARCH_URL: &str = "https://www.imdb.com/find/?q=";

/// Command-menu choices for changing a block's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockCommand {
    Text,
    Task,
    Bullet,
    Numbered,
    Heading(u8),
    Query,
    Divider,
}

impl BlockCommand {
    /// Resolves a menu id (`task`, `h2`, ...) to a command.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "task" => Some(Self::Task),
            "bullet" => Some(Self::Bullet),
            "numbered" => Some(Self::Numbered),
            "h1" => Some(Self::Heading(1)),
            "h2" => Some(Self::Heading(2)),
            "h3" => Some(Self::Heading(3)),
            "query" => Some(Self::Query),
            "divider" => Some(Self::Divider),
            _ => None,
        }
    }

    pub fn block_type(self) -> BlockType {
        match self {
            Self::Text => BlockType::Text,
            Self::Task => BlockType::Task,
            Self::Bullet => BlockType::Bullet,
            Self::Numbered => BlockType::Numbered,
            Self::Heading(_) => BlockType::Heading,
            Self::Query => BlockType::Query,
            Self::Divider => BlockType::Divider,
        }
    }
}

/// Applies raw edited text to `block`.
///
/// Rules:
/// - `[]` / `[ ]` prefix: becomes an unchecked task, prefix stripped.
/// - `[x]` / `[X]` prefix: becomes a checked task, prefix stripped.
/// - Otherwise the content is stored verbatim and the kind is kept.
/// - Priority and date are taken from markers when present, otherwise the
///   block keeps its previous values; tags are replaced when any marker
///   is present.
pub fn apply_input(block: &Block, raw: &str) -> Block {
    let mut next = block.clone();

    if let Some(found) = UNCHECKED_PREFIX_RE.find(raw) {
        next.kind = BlockKind::Task { checked: false };
        next.content = raw[found.end()..].trim().to_string();
    } else if let Some(found) = CHECKED_PREFIX_RE.find(raw) {
        next.kind = BlockKind::Task { checked: true };
        next.content = raw[found.end()..].trim().to_string();
    } else {
        next.content = raw.to_string();
    }

    let meta = parse_content(raw);
    if meta.is_empty() {
        return next;
    }
    if !meta.priority.is_none() {
        next.priority = meta.priority;
    }
    if meta.date.is_some() {
        next.date = meta.date;
    }
    if !meta.tags.is_empty() {
        next.tags = meta.tags.into_iter().collect();
    }

    next
}

/// Applies a command-menu kind change.
///
/// `content_before_slash` is the text preceding the typed `/` command,
/// when the command was triggered inline.
pub fn apply_command(
    block: &Block,
    command: BlockCommand,
    content_before_slash: Option<&str>,
) -> Block {
    let mut next = block.clone();
    if let Some(prefix) = content_before_slash {
        next.content = prefix.to_string();
    }

    next.kind = match command {
        BlockCommand::Text => BlockKind::Text,
        BlockCommand::Task => BlockKind::Task {
            checked: block.checked().unwrap_or(false),
        },
        BlockCommand::Bullet => BlockKind::Bullet,
        BlockCommand::Numbered => BlockKind::Numbered,
        BlockCommand::Heading(level) => BlockKind::heading(level),
        BlockCommand::Query => {
            next.content = QUERY_BLOCK_TITLE.to_string();
            BlockKind::default_query()
        }
        BlockCommand::Divider => {
            next.content.clear();
            BlockKind::Divider
        }
    };

    next
}

/// Extracts the movie title from a `watch <title>` command.
pub fn parse_watch_command(text: &str) -> Option<String> {
    WATCH_COMMAND_RE
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|title| title.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Builds a deterministic IMDb search link for a title.
pub fn movie_search_url(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let stripped = SLUG_STRIP_RE.replace_all(&lowered, "");
    let slug = SLUG_SPACE_RE.replace_all(&stripped, "-");
    format!("{IMDB_SEARCH_URL}{slug}")
}

/// Turns `block` into a movie block when `raw` is a watch command.
pub fn apply_watch_command(block: &Block, raw: &str) -> Option<Block> {
    let title = parse_watch_command(raw)?;
    let mut next = block.clone();
    next.kind = BlockKind::Movie {
        url: Some(movie_search_url(&title)),
    };
    next.content = title;
    Some(next)
}
