//! Core domain logic for BlockNote.
//! This crate is the single source of truth for block, query and ordering
//! invariants.

pub mod config;
pub mod logging;
pub mod metadata;
pub mod model;
pub mod query;
pub mod repo;
pub mod seed;
pub mod service;

pub use config::{default_log_level, ConfigError, LogLevel, LoggingConfig};
pub use logging::{init_logging, logging_status};
pub use metadata::input::{apply_command, apply_input, BlockCommand};
pub use metadata::parser::{parse_content, BlockMetadata};
pub use metadata::sanitize::display_content;
pub use model::block::{Block, BlockId, BlockKind, BlockType, CollectionId, DueDate, Priority};
pub use model::criteria::{DateClass, QueryCriteria, SavedSearch, SearchQuery};
pub use model::project::{Project, ProjectColor, ProjectKind, Section};
pub use model::store::BlockStore;
pub use query::{evaluate, OrderKey, SurfacedBlock};
pub use repo::block_repo::{BlockRepository, InMemoryBlockRepository, RepoError, RepoResult};
pub use repo::order_repo::{InMemoryOrderRepository, OrderRepository};
pub use repo::project_repo::{InMemoryProjectRepository, ProjectRepository};
pub use service::block_service::BlockService;
pub use service::project_service::{ProjectService, ProjectServiceError, ProjectUpdate};
pub use service::query_service::{QueryService, QueryServiceError, TODAY_COLLECTION_ID};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
