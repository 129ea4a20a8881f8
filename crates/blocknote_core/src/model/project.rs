//! Project and section hierarchy.
//!
//! # Invariants
//! - Subprojects nest at most [`MAX_PROJECT_DEPTH`] levels deep, counting a
//!   top-level project as level 1.
//! - A project belongs to at most one section.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum nesting depth of the project tree.
pub const MAX_PROJECT_DEPTH: usize = 5;

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    /// Shown above sections; excluded from drag reordering.
    Pinned,
    Project,
    Subproject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectColor {
    Red,
    Blue,
    Green,
    Purple,
    Orange,
    Teal,
    Indigo,
    #[default]
    Gray,
}

impl ProjectColor {
    /// Hex color used for sidebar markers.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Red => "#ea384c",
            Self::Blue => "#0EA5E9",
            Self::Green => "#10b981",
            Self::Purple => "#8B5CF6",
            Self::Orange => "#F97316",
            Self::Teal => "#14b8a6",
            Self::Indigo => "#6366f1",
            Self::Gray => "#8E9196",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub kind: ProjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ProjectColor>,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub subprojects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ProjectKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            icon: None,
            color: None,
            collapsed: false,
            subprojects: Vec::new(),
            section_id: None,
        }
    }

    /// Number of levels in this subtree, including `self`.
    pub fn depth(&self) -> usize {
        1 + self
            .subprojects
            .iter()
            .map(Project::depth)
            .max()
            .unwrap_or(0)
    }

    /// Finds a project by id in this subtree.
    pub fn find(&self, id: &str) -> Option<&Project> {
        if self.id == id {
            return Some(self);
        }
        self.subprojects.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Project> {
        if self.id == id {
            return Some(self);
        }
        self.subprojects
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Collects this project's id and every descendant id, depth-first.
    pub fn collect_ids(&self, out: &mut Vec<String>) {
        out.push(self.id.clone());
        for child in &self.subprojects {
            child.collect_ids(out);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub color: ProjectColor,
    #[serde(default)]
    pub collapsed: bool,
}

/// Derives an id from a display name: lower-cased, whitespace runs
/// replaced by `-`.
pub fn slugify(name: &str) -> String {
    WHITESPACE_RUN_RE
        .replace_all(name.trim(), "-")
        .to_lowercase()
}
