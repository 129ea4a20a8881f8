//! Inline metadata handling for block content.
//!
//! # Responsibility
//! - Parse `!pN`, `^date` and `#tag` markers into structured metadata.
//! - Render marker-free display text.
//! - Apply edits and command-menu changes to blocks.
//!
//! # Invariants
//! - Raw content is the single source of truth; everything here is derived
//!   from it and recomputed on every call.

pub mod input;
pub mod parser;
pub mod sanitize;
