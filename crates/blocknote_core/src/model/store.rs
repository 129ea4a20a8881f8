//! Ordered block store snapshot.
//!
//! # Responsibility
//! - Hold the mapping collection id -> ordered blocks.
//! - Preserve collection insertion order for deterministic query results.

use crate::model::block::{Block, CollectionId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered mapping from collection id to its blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockStore {
    collections: IndexMap<CollectionId, Vec<Block>>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one collection, keeping its original position
    /// when it already exists.
    pub fn insert_collection(&mut self, id: impl Into<CollectionId>, blocks: Vec<Block>) {
        self.collections.insert(id.into(), blocks);
    }

    /// Builder-style variant of [`BlockStore::insert_collection`].
    pub fn with_collection(mut self, id: impl Into<CollectionId>, blocks: Vec<Block>) -> Self {
        self.insert_collection(id, blocks);
        self
    }

    pub fn contains_collection(&self, id: &str) -> bool {
        self.collections.contains_key(id)
    }

    pub fn collection(&self, id: &str) -> Option<&[Block]> {
        self.collections.get(id).map(Vec::as_slice)
    }

    pub fn collection_mut(&mut self, id: &str) -> Option<&mut Vec<Block>> {
        self.collections.get_mut(id)
    }

    /// Returns the collection, creating it empty (appended last) if absent.
    pub fn ensure_collection(&mut self, id: &str) -> &mut Vec<Block> {
        self.collections.entry(id.to_string()).or_default()
    }

    /// Removes one collection, preserving the order of the others.
    pub fn remove_collection(&mut self, id: &str) -> Option<Vec<Block>> {
        self.collections.shift_remove(id)
    }

    pub fn collection_ids(&self) -> impl Iterator<Item = &CollectionId> {
        self.collections.keys()
    }

    /// Iterates collections in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&CollectionId, &[Block])> {
        self.collections
            .iter()
            .map(|(id, blocks)| (id, blocks.as_slice()))
    }

    /// Locates a block anywhere in the store.
    pub fn find_block(&self, block_id: &str) -> Option<(&CollectionId, &Block)> {
        self.collections.iter().find_map(|(collection_id, blocks)| {
            blocks
                .iter()
                .find(|block| block.id == block_id)
                .map(|block| (collection_id, block))
        })
    }

    /// Total number of blocks across all collections.
    pub fn block_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::BlockStore;
    use crate::model::block::{Block, BlockKind};

    #[test]
    fn iteration_follows_insertion_order() {
        let store = BlockStore::new()
            .with_collection("zeta", vec![])
            .with_collection("alpha", vec![])
            .with_collection("mid", vec![]);
        let ids: Vec<&str> = store.collection_ids().map(String::as_str).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn find_block_reports_owning_collection() {
        let store = BlockStore::new()
            .with_collection("inbox", vec![Block::with_id("a", BlockKind::Text, "a")])
            .with_collection("work", vec![Block::with_id("b", BlockKind::Text, "b")]);
        let (owner, block) = store.find_block("b").expect("block should be found");
        assert_eq!(owner, "work");
        assert_eq!(block.content, "b");
        assert_eq!(store.block_count(), 2);
    }
}
