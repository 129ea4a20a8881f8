//! Block repository contracts and in-memory implementation.
//!
//! # Responsibility
//! - Provide collection-scoped block CRUD over the block store.
//! - Hand out consistent store snapshots for query evaluation.
//!
//! # Invariants
//! - Block ids are unique across the whole store.
//! - Writes address blocks by `(collection id, block id)`; a block is never
//!   written into a collection other than the one that owns it.

use crate::model::block::{Block, BlockId, CollectionId};
use crate::model::store::BlockStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by block, order and project repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    CollectionNotFound(CollectionId),
    BlockNotFound {
        collection: CollectionId,
        block_id: BlockId,
    },
    DuplicateBlock(BlockId),
    ProjectNotFound(String),
    SectionNotFound(String),
    SavedSearchNotFound(String),
    DuplicateId(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CollectionNotFound(id) => write!(f, "collection not found: {id}"),
            Self::BlockNotFound {
                collection,
                block_id,
            } => write!(f, "block not found: {block_id} in collection {collection}"),
            Self::DuplicateBlock(id) => write!(f, "block id already exists: {id}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::SectionNotFound(id) => write!(f, "section not found: {id}"),
            Self::SavedSearchNotFound(id) => write!(f, "saved search not found: {id}"),
            Self::DuplicateId(id) => write!(f, "id already in use: {id}"),
            Self::InvalidData(message) => write!(f, "invalid repository data: {message}"),
        }
    }
}

impl Error for RepoError {}

/// Repository interface for block storage.
pub trait BlockRepository {
    /// Returns a consistent copy of the whole store.
    fn snapshot(&self) -> RepoResult<BlockStore>;
    /// Lists the blocks of one collection in stored order.
    fn list_blocks(&self, collection: &str) -> RepoResult<Vec<Block>>;
    /// Gets one block of one collection.
    fn get_block(&self, collection: &str, block_id: &str) -> RepoResult<Option<Block>>;
    /// Creates an empty collection if it does not exist yet.
    fn ensure_collection(&mut self, collection: &str) -> RepoResult<()>;
    /// Inserts a block at `index` (or at the end when `None`/out of range).
    fn insert_block(
        &mut self,
        collection: &str,
        index: Option<usize>,
        block: &Block,
    ) -> RepoResult<()>;
    /// Replaces one block in place, keeping its position.
    fn update_block(&mut self, collection: &str, block: &Block) -> RepoResult<()>;
    /// Removes one block and returns it.
    fn remove_block(&mut self, collection: &str, block_id: &str) -> RepoResult<Block>;
    /// Replaces the full ordered block list of one collection.
    fn replace_blocks(&mut self, collection: &str, blocks: Vec<Block>) -> RepoResult<()>;
    /// Removes one collection with all its blocks.
    fn remove_collection(&mut self, collection: &str) -> RepoResult<Vec<Block>>;
}

impl<R: BlockRepository + ?Sized> BlockRepository for &mut R {
    fn snapshot(&self) -> RepoResult<BlockStore> {
        (**self).snapshot()
    }

    fn list_blocks(&self, collection: &str) -> RepoResult<Vec<Block>> {
        (**self).list_blocks(collection)
    }

    fn get_block(&self, collection: &str, block_id: &str) -> RepoResult<Option<Block>> {
        (**self).get_block(collection, block_id)
    }

    fn ensure_collection(&mut self, collection: &str) -> RepoResult<()> {
        (**self).ensure_collection(collection)
    }

    fn insert_block(
        &mut self,
        collection: &str,
        index: Option<usize>,
        block: &Block,
    ) -> RepoResult<()> {
        (**self).insert_block(collection, index, block)
    }

    fn update_block(&mut self, collection: &str, block: &Block) -> RepoResult<()> {
        (**self).update_block(collection, block)
    }

    fn remove_block(&mut self, collection: &str, block_id: &str) -> RepoResult<Block> {
        (**self).remove_block(collection, block_id)
    }

    fn replace_blocks(&mut self, collection: &str, blocks: Vec<Block>) -> RepoResult<()> {
        (**self).replace_blocks(collection, blocks)
    }

    fn remove_collection(&mut self, collection: &str) -> RepoResult<Vec<Block>> {
        (**self).remove_collection(collection)
    }
}

/// Block repository backed by an in-process [`BlockStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlockRepository {
    store: BlockStore,
}

impl InMemoryBlockRepository {
    pub fn new(store: BlockStore) -> Self {
        Self { store }
    }

    /// Read-only view of the backing store.
    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    pub fn into_store(self) -> BlockStore {
        self.store
    }

    fn blocks_mut(&mut self, collection: &str) -> RepoResult<&mut Vec<Block>> {
        self.store
            .collection_mut(collection)
            .ok_or_else(|| RepoError::CollectionNotFound(collection.to_string()))
    }
}

impl BlockRepository for InMemoryBlockRepository {
    fn snapshot(&self) -> RepoResult<BlockStore> {
        Ok(self.store.clone())
    }

    fn list_blocks(&self, collection: &str) -> RepoResult<Vec<Block>> {
        self.store
            .collection(collection)
            .map(<[Block]>::to_vec)
            .ok_or_else(|| RepoError::CollectionNotFound(collection.to_string()))
    }

    fn get_block(&self, collection: &str, block_id: &str) -> RepoResult<Option<Block>> {
        let blocks = self
            .store
            .collection(collection)
            .ok_or_else(|| RepoError::CollectionNotFound(collection.to_string()))?;
        Ok(blocks.iter().find(|block| block.id == block_id).cloned())
    }

    fn ensure_collection(&mut self, collection: &str) -> RepoResult<()> {
        self.store.ensure_collection(collection);
        Ok(())
    }

    fn insert_block(
        &mut self,
        collection: &str,
        index: Option<usize>,
        block: &Block,
    ) -> RepoResult<()> {
        if self.store.find_block(&block.id).is_some() {
            return Err(RepoError::DuplicateBlock(block.id.clone()));
        }

        let blocks = self.blocks_mut(collection)?;
        let position = index.map_or(blocks.len(), |value| value.min(blocks.len()));
        blocks.insert(position, block.clone());
        Ok(())
    }

    fn update_block(&mut self, collection: &str, block: &Block) -> RepoResult<()> {
        let blocks = self.blocks_mut(collection)?;
        let slot = blocks
            .iter_mut()
            .find(|existing| existing.id == block.id)
            .ok_or_else(|| RepoError::BlockNotFound {
                collection: collection.to_string(),
                block_id: block.id.clone(),
            })?;
        *slot = block.clone();
        Ok(())
    }

    fn remove_block(&mut self, collection: &str, block_id: &str) -> RepoResult<Block> {
        let blocks = self.blocks_mut(collection)?;
        let index = blocks
            .iter()
            .position(|block| block.id == block_id)
            .ok_or_else(|| RepoError::BlockNotFound {
                collection: collection.to_string(),
                block_id: block_id.to_string(),
            })?;
        Ok(blocks.remove(index))
    }

    fn replace_blocks(&mut self, collection: &str, blocks: Vec<Block>) -> RepoResult<()> {
        for block in &blocks {
            if let Some((owner, _)) = self.store.find_block(&block.id) {
                if owner != collection {
                    return Err(RepoError::DuplicateBlock(block.id.clone()));
                }
            }
        }
        *self.blocks_mut(collection)? = blocks;
        Ok(())
    }

    fn remove_collection(&mut self, collection: &str) -> RepoResult<Vec<Block>> {
        self.store
            .remove_collection(collection)
            .ok_or_else(|| RepoError::CollectionNotFound(collection.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{BlockRepository, InMemoryBlockRepository, RepoError};
    use crate::model::block::{Block, BlockKind};
    use crate::model::store::BlockStore;

    fn repo() -> InMemoryBlockRepository {
        InMemoryBlockRepository::new(
            BlockStore::new()
                .with_collection("inbox", vec![Block::with_id("a", BlockKind::Text, "a")])
                .with_collection("work", vec![Block::with_id("b", BlockKind::Text, "b")]),
        )
    }

    #[test]
    fn insert_rejects_ids_used_in_other_collections() {
        let mut repo = repo();
        let err = repo
            .insert_block("inbox", None, &Block::with_id("b", BlockKind::Text, "dup"))
            .unwrap_err();
        assert_eq!(err, RepoError::DuplicateBlock("b".to_string()));
    }

    #[test]
    fn insert_clamps_index_to_collection_length() {
        let mut repo = repo();
        repo.insert_block("inbox", Some(99), &Block::with_id("c", BlockKind::Text, "c"))
            .unwrap();
        repo.insert_block("inbox", Some(0), &Block::with_id("d", BlockKind::Text, "d"))
            .unwrap();
        let ids: Vec<String> = repo
            .list_blocks("inbox")
            .unwrap()
            .into_iter()
            .map(|block| block.id)
            .collect();
        assert_eq!(ids, vec!["d", "a", "c"]);
    }

    #[test]
    fn update_only_touches_the_addressed_collection() {
        let mut repo = repo();
        let err = repo
            .update_block("inbox", &Block::with_id("b", BlockKind::Text, "moved"))
            .unwrap_err();
        assert!(matches!(err, RepoError::BlockNotFound { .. }));

        repo.update_block("work", &Block::with_id("b", BlockKind::Text, "edited"))
            .unwrap();
        let block = repo.get_block("work", "b").unwrap().unwrap();
        assert_eq!(block.content, "edited");
    }

    #[test]
    fn unknown_collection_is_reported() {
        let repo = repo();
        assert_eq!(
            repo.list_blocks("missing").unwrap_err(),
            RepoError::CollectionNotFound("missing".to_string())
        );
    }

    #[test]
    fn mutable_reference_delegates_to_inner_repository() {
        fn touch<R: BlockRepository>(mut repo: R) {
            repo.ensure_collection("later").unwrap();
        }

        let mut inner = repo();
        touch(&mut inner);
        assert!(inner.store().contains_collection("later"));
    }
}
