//! Content Fetch Client
//!
//! This module defines the `ContentClient` trait, the boundary between the
//! tree builder / article service and whatever talks to the Notion API.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: every call is a network fetch in production
//! 2. **Raw records**: results are the API's JSON maps; models read them
//!    defensively
//! 3. **Error Handling**: `anyhow::Result` so transport crates can attach their
//!    own context; the service layer wraps failures in `NotionServiceError`
//! 4. **No timeouts or retries here**: those belong to the implementation
//!
//! An HTTP implementation lives outside this crate. `InMemoryClient` serves
//! fixtures for tests and offline rendering.

mod memory;

pub use memory::InMemoryClient;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a paginated list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListResponse {
    pub results: Vec<Value>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

impl ListResponse {
    /// A complete, single-page response
    pub fn complete(results: Vec<Value>) -> Self {
        Self {
            results,
            has_more: false,
            next_cursor: None,
        }
    }
}

/// Body of a database query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseQuery {
    pub filter: Value,
    pub sorts: Vec<Value>,
    pub page_size: usize,
}

/// Abstraction over the Notion content API
///
/// Implementations must be `Send + Sync`; the tree builder holds one behind an
/// `Arc` and awaits calls one at a time.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Query a database for page records
    async fn query_database(&self, database_id: &str, query: &DatabaseQuery)
        -> Result<ListResponse>;

    /// Fetch one page record by id
    async fn fetch_page(&self, page_id: &str) -> Result<Value>;

    /// Fetch one page of a block's children, starting at `start_cursor`
    async fn fetch_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<ListResponse>;

    /// Fetch one block record by id
    async fn fetch_block(&self, block_id: &str) -> Result<Value>;
}
