//! Query engine: cross-collection evaluation and result ordering.
//!
//! # Responsibility
//! - Evaluate query criteria over a block store snapshot.
//! - Layer user-chosen orders on top of evaluator order.
//!
//! # Invariants
//! - Every function here is pure and total.

pub mod evaluator;
pub mod order;

pub use evaluator::{
    evaluate, evaluate_excluding, evaluate_search, matches, matches_search, SurfacedBlock,
};
pub use order::{apply_order, merge_ids, reorder_ids, OrderKey};
