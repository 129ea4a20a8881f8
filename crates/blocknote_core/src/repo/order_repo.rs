//! Order overlay repository contracts and in-memory implementation.
//!
//! # Invariants
//! - Overlays are independent per [`OrderKey`]; there is no global order.
//! - A stored overlay is the full id sequence last shown to the user.

use crate::model::block::BlockId;
use crate::query::order::OrderKey;
use crate::repo::block_repo::RepoResult;
use indexmap::IndexMap;

/// Repository interface for persisted result orders.
pub trait OrderRepository {
    /// Loads the overlay for `key`, `None` when never reordered.
    fn get_order(&self, key: &OrderKey) -> RepoResult<Option<Vec<BlockId>>>;
    /// Stores the full id sequence for `key`.
    fn set_order(&mut self, key: &OrderKey, order: Vec<BlockId>) -> RepoResult<()>;
    /// Drops the overlay for `key`; returns whether one existed.
    fn clear_order(&mut self, key: &OrderKey) -> RepoResult<bool>;
}

impl<R: OrderRepository + ?Sized> OrderRepository for &mut R {
    fn get_order(&self, key: &OrderKey) -> RepoResult<Option<Vec<BlockId>>> {
        (**self).get_order(key)
    }

    fn set_order(&mut self, key: &OrderKey, order: Vec<BlockId>) -> RepoResult<()> {
        (**self).set_order(key, order)
    }

    fn clear_order(&mut self, key: &OrderKey) -> RepoResult<bool> {
        (**self).clear_order(key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: IndexMap<OrderKey, Vec<BlockId>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn get_order(&self, key: &OrderKey) -> RepoResult<Option<Vec<BlockId>>> {
        Ok(self.orders.get(key).cloned())
    }

    fn set_order(&mut self, key: &OrderKey, order: Vec<BlockId>) -> RepoResult<()> {
        self.orders.insert(key.clone(), order);
        Ok(())
    }

    fn clear_order(&mut self, key: &OrderKey) -> RepoResult<bool> {
        Ok(self.orders.shift_remove(key).is_some())
    }
}
