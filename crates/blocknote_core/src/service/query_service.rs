//! Query block, saved search and Today view use-case service.
//!
//! # Responsibility
//! - Evaluate criteria over a store snapshot and apply the per-view order
//!   overlay.
//! - Route edits of surfaced blocks back to their origin collection.
//!
//! # Invariants
//! - Every evaluation reads a fresh snapshot; nothing is cached.
//! - After an evaluation of an overlaid view, the stored overlay equals the
//!   shown id sequence (stale ids pruned, new ids appended).
//! - Write-back addresses `(origin, block id)` only.

use crate::metadata::input::apply_input;
use crate::model::block::{Block, BlockId, BlockKind};
use crate::model::criteria::{DateClass, QueryCriteria, SavedSearch};
use crate::model::store::BlockStore;
use crate::query::evaluator::{evaluate, evaluate_search, SurfacedBlock};
use crate::query::order::{apply_order, reorder_ids, OrderKey};
use crate::repo::block_repo::{BlockRepository, RepoError};
use crate::repo::order_repo::OrderRepository;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Virtual collection holding free-form notes of the Today page.
pub const TODAY_COLLECTION_ID: &str = "today-notes";

pub type QueryServiceResult<T> = Result<T, QueryServiceError>;

/// Service error for query use-cases.
#[derive(Debug)]
pub enum QueryServiceError {
    /// No block with this id exists in any collection.
    QueryBlockNotFound(BlockId),
    /// The addressed block exists but is not a query block.
    NotAQueryBlock(BlockId),
    /// Repository failure.
    Repo(RepoError),
}

impl Display for QueryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueryBlockNotFound(id) => write!(f, "query block not found: {id}"),
            Self::NotAQueryBlock(id) => write!(f, "block is not a query block: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for QueryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for QueryServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Query facade over a block repository and an order overlay repository.
pub struct QueryService<B: BlockRepository, O: OrderRepository> {
    blocks: B,
    orders: O,
}

impl<B: BlockRepository, O: OrderRepository> QueryService<B, O> {
    pub fn new(blocks: B, orders: O) -> Self {
        Self { blocks, orders }
    }

    pub fn blocks(&self) -> &B {
        &self.blocks
    }

    pub fn orders(&self) -> &O {
        &self.orders
    }

    pub fn into_parts(self) -> (B, O) {
        (self.blocks, self.orders)
    }

    /// Evaluates `criteria` and orders results by the overlay of `key`.
    pub fn run_query(
        &mut self,
        key: &OrderKey,
        criteria: &QueryCriteria,
    ) -> QueryServiceResult<Vec<SurfacedBlock>> {
        self.run_ordered(key, |store| evaluate(criteria, store))
    }

    /// Results of the query block `block_id`, wherever it lives.
    pub fn query_block_results(
        &mut self,
        block_id: &str,
    ) -> QueryServiceResult<Vec<SurfacedBlock>> {
        let store = self.blocks.snapshot()?;
        let (_, block) = store
            .find_block(block_id)
            .ok_or_else(|| QueryServiceError::QueryBlockNotFound(block_id.to_string()))?;
        let criteria = block
            .query_criteria()
            .cloned()
            .ok_or_else(|| QueryServiceError::NotAQueryBlock(block_id.to_string()))?;

        self.run_ordered(&OrderKey::QueryBlock(block_id.to_string()), |store| {
            evaluate(&criteria, store)
        })
    }

    /// Results of a saved search.
    ///
    /// A search for today's items skips the Today notes collection so the
    /// Today page does not list its own notes twice.
    pub fn saved_search_results(
        &mut self,
        search: &SavedSearch,
    ) -> QueryServiceResult<Vec<SurfacedBlock>> {
        let excluded: &[&str] = if search.query.date == Some(DateClass::Today) {
            &[TODAY_COLLECTION_ID]
        } else {
            &[]
        };
        self.run_ordered(&OrderKey::SavedSearch(search.id.clone()), |store| {
            evaluate_search(&search.query, store, excluded)
        })
    }

    /// Tasks due today across all collections.
    pub fn today_tasks(&mut self) -> QueryServiceResult<Vec<SurfacedBlock>> {
        self.run_ordered(&OrderKey::Today, |store| {
            evaluate(&QueryCriteria::today_tasks(), store)
        })
    }

    /// Moves `dragged` onto `target` within the displayed sequence of `key`
    /// and persists the resulting order.
    ///
    /// Returns the new order, or `None` when either id is not displayed.
    pub fn reorder(
        &mut self,
        key: &OrderKey,
        displayed: &[BlockId],
        dragged: &str,
        target: &str,
    ) -> QueryServiceResult<Option<Vec<BlockId>>> {
        let Some(next) = reorder_ids(displayed, dragged, target) else {
            debug!(
                "event=order_reorder module=query status=skipped key={} reason=unknown_id",
                key
            );
            return Ok(None);
        };
        self.orders.set_order(key, next.clone())?;
        info!(
            "event=order_reorder module=query status=ok key={} len={}",
            key,
            next.len()
        );
        Ok(Some(next))
    }

    /// Forgets the user order of one view.
    pub fn reset_order(&mut self, key: &OrderKey) -> QueryServiceResult<bool> {
        Ok(self.orders.clear_order(key)?)
    }

    /// Writes an edited surfaced block back into its origin collection.
    pub fn write_back(&mut self, surfaced: &SurfacedBlock) -> QueryServiceResult<()> {
        self.blocks
            .update_block(surfaced.origin.as_str(), &surfaced.block)?;
        debug!(
            "event=write_back module=query status=ok origin={}",
            surfaced.origin
        );
        Ok(())
    }

    /// Applies raw edited text to a surfaced block and writes it back.
    pub fn edit_surfaced(
        &mut self,
        surfaced: &SurfacedBlock,
        raw: &str,
    ) -> QueryServiceResult<SurfacedBlock> {
        let current = self.current_block(surfaced)?;
        let next = SurfacedBlock {
            origin: surfaced.origin.clone(),
            block: apply_input(&current, raw),
        };
        self.write_back(&next)?;
        Ok(next)
    }

    /// Flips the checked state of a surfaced task in its origin collection.
    pub fn toggle_surfaced(
        &mut self,
        surfaced: &SurfacedBlock,
    ) -> QueryServiceResult<SurfacedBlock> {
        let mut block = self.current_block(surfaced)?;
        if let BlockKind::Task { checked } = &mut block.kind {
            *checked = !*checked;
        }
        let next = SurfacedBlock {
            origin: surfaced.origin.clone(),
            block,
        };
        self.write_back(&next)?;
        Ok(next)
    }

    fn current_block(&self, surfaced: &SurfacedBlock) -> QueryServiceResult<Block> {
        self.blocks
            .get_block(surfaced.origin.as_str(), surfaced.id())?
            .ok_or_else(|| {
                QueryServiceError::Repo(RepoError::BlockNotFound {
                    collection: surfaced.origin.clone(),
                    block_id: surfaced.block.id.clone(),
                })
            })
    }

    fn run_ordered<F>(
        &mut self,
        key: &OrderKey,
        select: F,
    ) -> QueryServiceResult<Vec<SurfacedBlock>>
    where
        F: FnOnce(&BlockStore) -> Vec<SurfacedBlock>,
    {
        let store = self.blocks.snapshot()?;
        let results = select(&store);

        let Some(persisted) = self.orders.get_order(key)? else {
            debug!(
                "event=query_run module=query status=ok key={} results={} overlay=none",
                key,
                results.len()
            );
            return Ok(results);
        };

        let ordered = apply_order(results, &persisted, SurfacedBlock::id);
        let shown: Vec<BlockId> = ordered.iter().map(|item| item.block.id.clone()).collect();
        if shown != persisted {
            self.orders.set_order(key, shown)?;
        }
        debug!(
            "event=query_run module=query status=ok key={} results={} overlay=applied",
            key,
            ordered.len()
        );
        Ok(ordered)
    }
}
