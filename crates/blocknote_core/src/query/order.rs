//! Order overlay for query and search results.
//!
//! # Responsibility
//! - Re-sequence fresh results by a persisted, user-chosen id order.
//! - Compute the new order after one drag-reorder.
//!
//! # Invariants
//! - Merging never fails: stale ids are dropped, new ids are appended in
//!   evaluator order.
//! - Reordering with an unknown id leaves the order untouched.

use crate::model::block::BlockId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt::{Display, Formatter};

/// Identifies one independently ordered result view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "snake_case")]
pub enum OrderKey {
    /// Saved search by search id.
    SavedSearch(String),
    /// Query block by its block id.
    QueryBlock(BlockId),
    /// Built-in Today view.
    Today,
}

impl Display for OrderKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SavedSearch(id) => write!(f, "saved_search:{id}"),
            Self::QueryBlock(id) => write!(f, "query_block:{id}"),
            Self::Today => write!(f, "today"),
        }
    }
}

/// Orders `results` by `persisted` ids, appending unlisted results.
///
/// `id_of` extracts the block id of one result. When the same id occurs
/// more than once among results, persisted entries consume them in
/// evaluator order.
pub fn apply_order<T, F>(results: Vec<T>, persisted: &[BlockId], id_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut positions: HashMap<String, VecDeque<usize>> = HashMap::new();
    for (index, item) in results.iter().enumerate() {
        positions
            .entry(id_of(item).to_string())
            .or_default()
            .push_back(index);
    }

    let mut slots: Vec<Option<T>> = results.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());

    for id in persisted {
        let Some(index) = positions.get_mut(id.as_str()).and_then(VecDeque::pop_front) else {
            continue;
        };
        if let Some(item) = slots[index].take() {
            ordered.push(item);
        }
    }

    ordered.extend(slots.into_iter().flatten());
    ordered
}

/// Id sequence of a merged view; what gets persisted after pruning.
pub fn merge_ids(persisted: &[BlockId], fresh: &[BlockId]) -> Vec<BlockId> {
    apply_order(fresh.to_vec(), persisted, |id| id.as_str())
}

/// Moves `dragged` to the position currently held by `target`.
///
/// The dragged id is removed first and reinserted at the target's original
/// index, so dragging down lands after the target and dragging up lands
/// before it. Returns `None` when either id is not displayed.
pub fn reorder_ids(displayed: &[BlockId], dragged: &str, target: &str) -> Option<Vec<BlockId>> {
    let dragged_index = displayed.iter().position(|id| id == dragged)?;
    let target_index = displayed.iter().position(|id| id == target)?;

    let mut next = displayed.to_vec();
    let moved = next.remove(dragged_index);
    next.insert(target_index, moved);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::{apply_order, merge_ids, reorder_ids, OrderKey};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn persisted_order_wins_and_new_ids_are_appended() {
        let merged = merge_ids(&ids(&["b", "a", "c"]), &ids(&["a", "b", "c", "d"]));
        assert_eq!(merged, ids(&["b", "a", "c", "d"]));
    }

    #[test]
    fn ids_that_no_longer_match_are_dropped() {
        let merged = merge_ids(&ids(&["b", "a", "c"]), &ids(&["a", "c"]));
        assert_eq!(merged, ids(&["a", "c"]));
    }

    #[test]
    fn empty_persisted_order_keeps_evaluator_order() {
        let merged = merge_ids(&[], &ids(&["x", "y"]));
        assert_eq!(merged, ids(&["x", "y"]));
    }

    #[test]
    fn apply_order_moves_whole_items() {
        let results = vec![("a", 1), ("b", 2), ("c", 3)];
        let ordered = apply_order(results, &ids(&["c", "a"]), |item| item.0);
        assert_eq!(ordered, vec![("c", 3), ("a", 1), ("b", 2)]);
    }

    #[test]
    fn duplicate_result_ids_are_consumed_in_order() {
        let results = vec![("a", "inbox"), ("a", "work"), ("b", "inbox")];
        let ordered = apply_order(results, &ids(&["b", "a"]), |item| item.0);
        assert_eq!(ordered, vec![("b", "inbox"), ("a", "inbox"), ("a", "work")]);
    }

    #[test]
    fn dragging_up_lands_before_target() {
        let next = reorder_ids(&ids(&["a", "b", "c"]), "c", "a").expect("both ids displayed");
        assert_eq!(next, ids(&["c", "a", "b"]));
    }

    #[test]
    fn dragging_down_lands_at_target_position() {
        let next = reorder_ids(&ids(&["a", "b", "c"]), "a", "c").expect("both ids displayed");
        assert_eq!(next, ids(&["b", "c", "a"]));
    }

    #[test]
    fn unknown_ids_do_not_reorder() {
        assert_eq!(reorder_ids(&ids(&["a", "b"]), "z", "a"), None);
        assert_eq!(reorder_ids(&ids(&["a", "b"]), "a", "z"), None);
    }

    #[test]
    fn order_keys_render_with_scope_prefix() {
        assert_eq!(OrderKey::SavedSearch("p1".into()).to_string(), "saved_search:p1");
        assert_eq!(OrderKey::Today.to_string(), "today");
    }
}
