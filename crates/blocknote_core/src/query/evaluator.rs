//! Cross-collection query evaluator.
//!
//! # Responsibility
//! - Flatten every collection of a store and filter blocks by criteria.
//! - Attach the owning collection id to each surfaced result.
//!
//! # Invariants
//! - Stored blocks are never modified; results are copies.
//! - Result order is store order, then in-collection order.
//! - Type, priority and tag filters combine with AND. The date filter runs
//!   last and ORs the requested classes in the fixed order today, tomorrow,
//!   upcoming, no date; the first satisfied class admits the block.
//! - Saved searches use [`matches_search`], not the criteria filter.

use crate::metadata::parser::{
    has_any_date_marker, has_formatted_date_marker, has_today_marker, has_tomorrow_marker,
};
use crate::model::block::{Block, CollectionId, DueDate};
use crate::model::criteria::{DateClass, QueryCriteria, SearchQuery};
use crate::model::store::BlockStore;
use serde::Serialize;

/// Block projected outside its home collection.
///
/// `origin` is the only place the owning collection is recorded; edits
/// must be written back to `(origin, block.id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfacedBlock {
    pub origin: CollectionId,
    pub block: Block,
}

impl SurfacedBlock {
    pub fn id(&self) -> &str {
        self.block.id.as_str()
    }
}

/// Returns every block of `store` matching `criteria`.
pub fn evaluate(criteria: &QueryCriteria, store: &BlockStore) -> Vec<SurfacedBlock> {
    evaluate_excluding(criteria, store, &[])
}

/// Same as [`evaluate`], skipping the listed collections entirely.
pub fn evaluate_excluding(
    criteria: &QueryCriteria,
    store: &BlockStore,
    excluded: &[&str],
) -> Vec<SurfacedBlock> {
    surface_where(store, excluded, |block| matches(criteria, block))
}

/// Blocks of `store` matching a saved search, skipping `excluded`
/// collections.
pub fn evaluate_search(
    query: &SearchQuery,
    store: &BlockStore,
    excluded: &[&str],
) -> Vec<SurfacedBlock> {
    surface_where(store, excluded, |block| matches_search(query, block))
}

fn surface_where<F>(store: &BlockStore, excluded: &[&str], predicate: F) -> Vec<SurfacedBlock>
where
    F: Fn(&Block) -> bool,
{
    store
        .iter()
        .filter(|(collection_id, _)| !excluded.contains(&collection_id.as_str()))
        .flat_map(|(collection_id, blocks)| {
            blocks.iter().map(move |block| (collection_id, block))
        })
        .filter(|(_, block)| predicate(block))
        .map(|(collection_id, block)| SurfacedBlock {
            origin: collection_id.clone(),
            block: block.clone(),
        })
        .collect()
}

/// Tests one block against all active filters.
pub fn matches(criteria: &QueryCriteria, block: &Block) -> bool {
    if !criteria.block_types.is_empty() && !criteria.block_types.contains(&block.block_type()) {
        return false;
    }

    if !criteria.priorities.is_empty() && !criteria.priorities.contains(&block.priority) {
        return false;
    }

    if !criteria.tags.is_empty() {
        if block.tags.is_empty() {
            return false;
        }
        if !criteria.tags.iter().any(|tag| block.has_tag(tag)) {
            return false;
        }
    }

    if !criteria.dates.is_empty() {
        return matches_requested_dates(&criteria.dates, block);
    }

    true
}

/// Tests one block against a saved search.
///
/// Saved searches are looser than query blocks:
/// - `Priority::None` or no priority means no priority filter.
/// - A non-empty tag list decides on its own (match-any); the date is
///   not consulted.
/// - Only `today` filters by date. Other date classes admit every block.
pub fn matches_search(query: &SearchQuery, block: &Block) -> bool {
    if let Some(priority) = query.priority {
        if !priority.is_none() && block.priority != priority {
            return false;
        }
    }

    if !query.tags.is_empty() {
        return query.tags.iter().any(|tag| block.has_tag(tag));
    }

    if query.date == Some(DateClass::Today) {
        return has_today_marker(&block.content) || block.date == Some(DueDate::Today);
    }

    true
}

fn matches_requested_dates(requested: &[DateClass], block: &Block) -> bool {
    if requested.contains(&DateClass::Today)
        && (block.date == Some(DueDate::Today) || has_today_marker(&block.content))
    {
        return true;
    }

    if requested.contains(&DateClass::Tomorrow)
        && (block.date == Some(DueDate::Tomorrow) || has_tomorrow_marker(&block.content))
    {
        return true;
    }

    if requested.contains(&DateClass::Upcoming) && has_formatted_date_marker(&block.content) {
        return true;
    }

    if requested.contains(&DateClass::NoDate) {
        return block.date.is_none() && !has_any_date_marker(&block.content);
    }

    false
}
