//! Notion Render Core
//!
//! This crate turns Notion pages into renderable documents: it rebuilds the
//! nested block tree from the content API's flat, paginated child listings and
//! renders each block to an HTML fragment with configurable CSS classes.
//!
//! # Architecture
//!
//! - **Raw records in, typed models out**: API JSON is read defensively into
//!   `Block` and `Page`; missing keys never fail construction
//! - **Tree building**: recursive child fetch, numbered list sibling merge and
//!   refresh of expired hosted media
//! - **Pure rendering**: fragments are derived from a finished forest and
//!   never fail; unknown block types render an `Error` placeholder
//! - **Explicit collaborators**: content client, cache store and clock are
//!   injected, with no global state
//!
//! # Modules
//!
//! - [`models`] - Blocks, pages, rich text and assembled documents
//! - [`render`] - Markup primitives, CSS slots and block renderers
//! - [`client`] - Content API abstraction and an in-memory fixture client
//! - [`cache`] - Block forest cache stores
//! - [`services`] - Tree builder and article service
//! - [`config`] - Service configuration

pub mod cache;
pub mod client;
pub mod config;
pub mod models;
pub mod render;
pub mod services;

// Re-export commonly used types
pub use client::{ContentClient, InMemoryClient};
pub use config::NotionConfig;
pub use models::*;
pub use render::{Markup, RenderOptions, StyleSlot};
pub use services::*;
