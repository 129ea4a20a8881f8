//! Block domain model.
//!
//! # Responsibility
//! - Define the canonical block record edited inside one collection.
//! - Model per-type fields as a tagged union instead of optional fields.
//!
//! # Invariants
//! - `id` is stable and unique within the whole store.
//! - `content` is the single source of truth; `priority`, `date` and `tags`
//!   are derived from it on every edit (or set explicitly by callers).
//! - A block never records which collection it lives in; that relation is
//!   only carried by [`crate::query::SurfacedBlock`] projections.

use crate::model::criteria::QueryCriteria;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one block.
pub type BlockId = String;

/// Identifier of a collection (project or virtual collection) in the store.
pub type CollectionId = String;

/// Content of a newly created query block.
pub const QUERY_BLOCK_TITLE: &str = "Custom Query";

/// Discriminant-only view of [`BlockKind`], used by query allow-lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Text,
    Task,
    Bullet,
    Numbered,
    Heading,
    Divider,
    Query,
    Movie,
}

impl BlockType {
    /// Stable lowercase name used in serialized criteria.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Task => "task",
            Self::Bullet => "bullet",
            Self::Numbered => "numbered",
            Self::Heading => "heading",
            Self::Divider => "divider",
            Self::Query => "query",
            Self::Movie => "movie",
        }
    }
}

/// Per-type block payload.
///
/// Serialized under the `type` key, with variant fields flattened next to
/// the common [`Block`] fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    /// Plain paragraph.
    Text,
    /// Checkbox item.
    Task {
        #[serde(default)]
        checked: bool,
    },
    /// Bulleted list item.
    Bullet,
    /// Numbered list item.
    Numbered,
    /// Heading with level 1..=3.
    Heading {
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    /// Horizontal rule; content is ignored.
    Divider,
    /// Live view over blocks of all collections.
    Query {
        query: QueryCriteria,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bg_color: Option<String>,
        #[serde(default = "default_show_title")]
        show_title: bool,
    },
    /// Movie to watch, optionally linked.
    Movie {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

fn default_heading_level() -> u8 {
    1
}

fn default_show_title() -> bool {
    true
}

impl BlockKind {
    pub fn block_type(&self) -> BlockType {
        match self {
            Self::Text => BlockType::Text,
            Self::Task { .. } => BlockType::Task,
            Self::Bullet => BlockType::Bullet,
            Self::Numbered => BlockType::Numbered,
            Self::Heading { .. } => BlockType::Heading,
            Self::Divider => BlockType::Divider,
            Self::Query { .. } => BlockType::Query,
            Self::Movie { .. } => BlockType::Movie,
        }
    }

    /// Heading kind with the level clamped to 1..=3.
    pub fn heading(level: u8) -> Self {
        Self::Heading {
            level: level.clamp(1, 3),
        }
    }

    /// Query kind with the default criteria used by the command menu.
    pub fn default_query() -> Self {
        Self::Query {
            query: QueryCriteria::default_for_new_block(),
            bg_color: None,
            show_title: true,
        }
    }
}

/// Priority level derived from `!pN` markers.
///
/// `None` is a real value: query allow-lists may ask for unprioritized
/// blocks explicitly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    #[default]
    #[serde(rename = "")]
    None,
    P1,
    P2,
    P3,
    P4,
}

impl Priority {
    /// Maps a marker digit (`1..=4`) to a level.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::P1),
            2 => Some(Self::P2),
            3 => Some(Self::P3),
            4 => Some(Self::P4),
            _ => None,
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
        }
    }
}

/// Due date attached to a block.
///
/// Serialized as its plain string form (`today`, `tomorrow`, `upcoming` or
/// the verbatim formatted date such as `12.31.2023`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DueDate {
    Today,
    Tomorrow,
    Upcoming,
    On(String),
}

impl DueDate {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Upcoming => "upcoming",
            Self::On(value) => value.as_str(),
        }
    }
}

impl From<String> for DueDate {
    fn from(value: String) -> Self {
        match value.as_str() {
            "today" => Self::Today,
            "tomorrow" => Self::Tomorrow,
            "upcoming" => Self::Upcoming,
            _ => Self::On(value),
        }
    }
}

impl From<DueDate> for String {
    fn from(value: DueDate) -> Self {
        match value {
            DueDate::On(date) => date,
            other => other.as_str().to_string(),
        }
    }
}

impl Display for DueDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical block record stored in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
    /// Raw text including inline metadata markers.
    pub content: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DueDate>,
    /// Lower-cased tag names.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub collapsed: bool,
    /// Nested child block ids.
    #[serde(default)]
    pub children: Vec<BlockId>,
}

impl Block {
    /// Creates a block with a generated id and empty metadata.
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self::with_id(generate_block_id(), kind, content)
    }

    /// Creates a block with a caller-provided id.
    ///
    /// Used by seed/import paths where identity already exists.
    pub fn with_id(id: impl Into<BlockId>, kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            content: content.into(),
            priority: Priority::None,
            date: None,
            tags: BTreeSet::new(),
            collapsed: false,
            children: Vec::new(),
        }
    }

    /// Empty text block, the shape appended by "add block".
    pub fn empty_text() -> Self {
        Self::new(BlockKind::Text, "")
    }

    /// Fresh query block with default criteria.
    pub fn new_query() -> Self {
        Self::new(BlockKind::default_query(), QUERY_BLOCK_TITLE)
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    /// Returns the checked flag for tasks, `None` for other kinds.
    pub fn checked(&self) -> Option<bool> {
        match self.kind {
            BlockKind::Task { checked } => Some(checked),
            _ => None,
        }
    }

    /// Returns the embedded criteria of a query block.
    pub fn query_criteria(&self) -> Option<&QueryCriteria> {
        match &self.kind {
            BlockKind::Query { query, .. } => Some(query),
            _ => None,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Generates a new unique block id.
pub fn generate_block_id() -> BlockId {
    format!("block-{}", Uuid::new_v4())
}
