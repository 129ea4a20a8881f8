//! Query criteria and saved search model.
//!
//! # Responsibility
//! - Describe filter specifications for query blocks and saved searches.
//! - Carry the single-valued query stored on a saved search.
//!
//! # Invariants
//! - Empty allow-lists mean "no filter", never "match nothing".
//! - `text` is carried for compatibility but is not evaluated.

use crate::model::block::{BlockType, Priority};
use crate::model::project::ProjectColor;
use serde::{Deserialize, Serialize};

/// Due date class requested by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DateClass {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "tomorrow")]
    Tomorrow,
    #[serde(rename = "upcoming")]
    Upcoming,
    #[serde(rename = "no date")]
    NoDate,
}

impl DateClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Upcoming => "upcoming",
            Self::NoDate => "no date",
        }
    }
}

/// Filter specification evaluated against every block of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCriteria {
    #[serde(default)]
    pub block_types: Vec<BlockType>,
    #[serde(default)]
    pub priorities: Vec<Priority>,
    /// Match-any tag set.
    #[serde(default)]
    pub tags: Vec<String>,
    /// OR-combined date classes.
    #[serde(default)]
    pub dates: Vec<DateClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl QueryCriteria {
    /// Criteria given to a query block created from the command menu:
    /// tasks due today.
    pub fn default_for_new_block() -> Self {
        Self {
            block_types: vec![BlockType::Task],
            dates: vec![DateClass::Today],
            ..Self::default()
        }
    }

    /// Tasks due today; drives the Today view.
    pub fn today_tasks() -> Self {
        Self::default_for_new_block()
    }

    /// Returns whether no filter is active.
    pub fn is_unfiltered(&self) -> bool {
        self.block_types.is_empty()
            && self.priorities.is_empty()
            && self.tags.is_empty()
            && self.dates.is_empty()
    }
}

/// Single-valued query stored on a saved search.
///
/// Evaluated by `query::evaluator::matches_search`, whose rules differ
/// from [`QueryCriteria`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Named, colored search shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: String,
    pub name: String,
    pub color: ProjectColor,
    pub query: SearchQuery,
}

#[cfg(test)]
mod tests {
    use super::{DateClass, QueryCriteria};
    use crate::model::block::BlockType;

    #[test]
    fn default_query_block_criteria_is_tasks_due_today() {
        let criteria = QueryCriteria::default_for_new_block();
        assert_eq!(criteria.block_types, vec![BlockType::Task]);
        assert_eq!(criteria.dates, vec![DateClass::Today]);
        assert!(criteria.priorities.is_empty());
        assert!(!criteria.is_unfiltered());
    }
}
