//! Collection editing use-case service.
//!
//! # Responsibility
//! - Provide block add/edit/toggle/retype/delete/reorder entry points for
//!   one collection at a time.
//! - Route every content edit through the input processor so metadata is
//!   re-derived from raw content.
//!
//! # Invariants
//! - Service APIs never bypass repository addressing by collection id.
//! - Service layer remains storage-agnostic.

use crate::metadata::input::{apply_command, apply_input, apply_watch_command, BlockCommand};
use crate::model::block::{Block, BlockKind};
use crate::query::order::reorder_ids;
use crate::repo::block_repo::{BlockRepository, RepoError, RepoResult};
use log::{debug, info};

/// Use-case service for editing blocks inside their home collection.
pub struct BlockService<R: BlockRepository> {
    repo: R,
}

impl<R: BlockRepository> BlockService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn into_inner(self) -> R {
        self.repo
    }

    /// Lists the blocks of one collection in stored order.
    pub fn list_blocks(&self, collection: &str) -> RepoResult<Vec<Block>> {
        self.repo.list_blocks(collection)
    }

    /// Appends an empty block, or inserts it right after `after`.
    ///
    /// # Contract
    /// - The collection is created when missing.
    /// - A block added after a task is itself an unchecked task.
    pub fn add_block(&mut self, collection: &str, after: Option<&str>) -> RepoResult<Block> {
        self.repo.ensure_collection(collection)?;

        let (index, kind) = match after {
            Some(anchor_id) => {
                let blocks = self.repo.list_blocks(collection)?;
                let position = blocks
                    .iter()
                    .position(|block| block.id == anchor_id)
                    .ok_or_else(|| RepoError::BlockNotFound {
                        collection: collection.to_string(),
                        block_id: anchor_id.to_string(),
                    })?;
                let kind = match blocks[position].kind {
                    BlockKind::Task { .. } => BlockKind::Task { checked: false },
                    _ => BlockKind::Text,
                };
                (Some(position + 1), kind)
            }
            None => (None, BlockKind::Text),
        };

        let block = Block::new(kind, "");
        self.repo.insert_block(collection, index, &block)?;
        info!(
            "event=block_add module=block status=ok collection={} type={}",
            collection,
            block.block_type().as_str()
        );
        Ok(block)
    }

    /// Inserts a fully formed block (seed/import paths).
    pub fn insert_block(
        &mut self,
        collection: &str,
        index: Option<usize>,
        block: &Block,
    ) -> RepoResult<()> {
        self.repo.ensure_collection(collection)?;
        self.repo.insert_block(collection, index, block)
    }

    /// Replaces a block's content with raw edited text.
    pub fn edit_content(
        &mut self,
        collection: &str,
        block_id: &str,
        raw: &str,
    ) -> RepoResult<Block> {
        let current = self.require_block(collection, block_id)?;
        let next = apply_input(&current, raw);
        self.repo.update_block(collection, &next)?;
        debug!(
            "event=block_edit module=block status=ok collection={} type={} tags={}",
            collection,
            next.block_type().as_str(),
            next.tags.len()
        );
        Ok(next)
    }

    /// Flips the checked state of a task; other kinds are returned as-is.
    pub fn toggle_check(&mut self, collection: &str, block_id: &str) -> RepoResult<Block> {
        let mut block = self.require_block(collection, block_id)?;
        if let BlockKind::Task { checked } = &mut block.kind {
            *checked = !*checked;
            self.repo.update_block(collection, &block)?;
        }
        Ok(block)
    }

    /// Changes a block's kind through a command-menu choice.
    pub fn apply_command(
        &mut self,
        collection: &str,
        block_id: &str,
        command: BlockCommand,
        content_before_slash: Option<&str>,
    ) -> RepoResult<Block> {
        let current = self.require_block(collection, block_id)?;
        let next = apply_command(&current, command, content_before_slash);
        self.repo.update_block(collection, &next)?;
        Ok(next)
    }

    /// Turns a `watch <title>` block into a movie block.
    ///
    /// Returns `Ok(None)` when the content is not a watch command.
    pub fn convert_watch_command(
        &mut self,
        collection: &str,
        block_id: &str,
    ) -> RepoResult<Option<Block>> {
        let current = self.require_block(collection, block_id)?;
        let Some(movie) = apply_watch_command(&current, &current.content) else {
            return Ok(None);
        };
        self.repo.update_block(collection, &movie)?;
        Ok(Some(movie))
    }

    /// Updates the criteria or display options of a query block.
    pub fn update_query_block(&mut self, collection: &str, block: &Block) -> RepoResult<()> {
        if block.query_criteria().is_none() {
            return Err(RepoError::InvalidData(format!(
                "block {} is not a query block",
                block.id
            )));
        }
        self.repo.update_block(collection, block)
    }

    /// Deletes one block.
    pub fn delete_block(&mut self, collection: &str, block_id: &str) -> RepoResult<Block> {
        self.repo.remove_block(collection, block_id)
    }

    /// Moves `dragged` to `target`'s position inside one collection.
    ///
    /// Unknown ids leave the collection unchanged and return `false`.
    pub fn move_block(&mut self, collection: &str, dragged: &str, target: &str) -> RepoResult<bool> {
        let blocks = self.repo.list_blocks(collection)?;
        let displayed: Vec<String> = blocks.iter().map(|block| block.id.clone()).collect();
        let Some(next_ids) = reorder_ids(&displayed, dragged, target) else {
            debug!(
                "event=block_move module=block status=skipped collection={} reason=unknown_id",
                collection
            );
            return Ok(false);
        };

        let mut reordered = Vec::with_capacity(blocks.len());
        let mut remaining = blocks;
        for id in &next_ids {
            if let Some(position) = remaining.iter().position(|block| &block.id == id) {
                reordered.push(remaining.remove(position));
            }
        }
        self.repo.replace_blocks(collection, reordered)?;
        Ok(true)
    }

    /// Moves a selection of blocks as one group to `target`'s position.
    ///
    /// Selected blocks keep their relative order. The insert position is
    /// the target index minus the number of selected blocks above it.
    pub fn move_blocks(
        &mut self,
        collection: &str,
        selected: &[String],
        target: &str,
    ) -> RepoResult<bool> {
        let blocks = self.repo.list_blocks(collection)?;
        let Some(target_index) = blocks.iter().position(|block| block.id == target) else {
            return Ok(false);
        };

        let (moving, mut remaining): (Vec<(usize, Block)>, Vec<(usize, Block)>) = blocks
            .into_iter()
            .enumerate()
            .partition(|(_, block)| selected.contains(&block.id));
        if moving.is_empty() {
            return Ok(false);
        }

        let above = moving
            .iter()
            .filter(|(index, _)| *index < target_index)
            .count();
        let insert_at = (target_index - above).min(remaining.len());
        let tail = remaining.split_off(insert_at);

        let reordered: Vec<Block> = remaining
            .into_iter()
            .chain(moving)
            .chain(tail)
            .map(|(_, block)| block)
            .collect();
        self.repo.replace_blocks(collection, reordered)?;
        Ok(true)
    }

    fn require_block(&self, collection: &str, block_id: &str) -> RepoResult<Block> {
        self.repo
            .get_block(collection, block_id)?
            .ok_or_else(|| RepoError::BlockNotFound {
                collection: collection.to_string(),
                block_id: block_id.to_string(),
            })
    }
}
