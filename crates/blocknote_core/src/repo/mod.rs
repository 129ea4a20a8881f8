//! Repository layer abstractions and in-memory implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts injected into services.
//! - Keep storage details out of the query engine.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`*NotFound`, `Duplicate*`)
//!   instead of panicking on bad addresses.

pub mod block_repo;
pub mod order_repo;
pub mod project_repo;
