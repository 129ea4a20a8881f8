//! Domain model for blocks, collections, projects and queries.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep per-type block fields in a tagged union.
//!
//! # Invariants
//! - Every block is identified by a stable `BlockId`.
//! - Collection membership lives in `BlockStore`, never on the block.

pub mod block;
pub mod criteria;
pub mod project;
pub mod store;
