//! Fixture-backed content client
//!
//! Serves raw records from memory and records every call it receives, so tests
//! can assert on fetch counts (asset refresh, cache hits) and on the query
//! bodies the article service sends.

use crate::client::{ContentClient, DatabaseQuery, ListResponse};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory `ContentClient`
///
/// # Examples
///
/// ```rust
/// use notion_render_core::client::{ContentClient, InMemoryClient};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let client = InMemoryClient::new()
///     .with_children("page-1", vec![json!({ "id": "b1", "type": "paragraph" })]);
///
/// let page = client.fetch_block_children("page-1", None).await.unwrap();
/// assert_eq!(page.results.len(), 1);
/// assert_eq!(client.children_calls("page-1"), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryClient {
    databases: HashMap<String, Vec<Value>>,
    pages: HashMap<String, Value>,
    children: HashMap<String, Vec<Value>>,
    blocks: HashMap<String, Value>,
    failing: HashSet<String>,
    children_page_size: Option<usize>,
    calls: Mutex<CallLog>,
}

#[derive(Debug, Default)]
struct CallLog {
    queries: Vec<(String, DatabaseQuery)>,
    pages: Vec<String>,
    children: Vec<String>,
    blocks: Vec<String>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page records returned by queries against `database_id`
    pub fn with_database(mut self, database_id: impl Into<String>, pages: Vec<Value>) -> Self {
        self.databases.insert(database_id.into(), pages);
        self
    }

    /// Page record served by `fetch_page`
    pub fn with_page(mut self, page: Value) -> Self {
        let id = page
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.pages.insert(id, page);
        self
    }

    /// Flat child records of `parent_id`, in API order
    pub fn with_children(mut self, parent_id: impl Into<String>, children: Vec<Value>) -> Self {
        self.children.insert(parent_id.into(), children);
        self
    }

    /// Record served by `fetch_block`
    pub fn with_block(mut self, block: Value) -> Self {
        let id = block
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.blocks.insert(id, block);
        self
    }

    /// Make every fetch for `id` fail
    pub fn with_failure(mut self, id: impl Into<String>) -> Self {
        self.failing.insert(id.into());
        self
    }

    /// Split children responses into pages of `size` records
    pub fn with_children_page_size(mut self, size: usize) -> Self {
        self.children_page_size = Some(size.max(1));
        self
    }

    /// Number of `fetch_block` calls made for `block_id`
    pub fn block_calls(&self, block_id: &str) -> usize {
        self.log().blocks.iter().filter(|id| *id == block_id).count()
    }

    /// Total number of `fetch_block` calls
    pub fn total_block_calls(&self) -> usize {
        self.log().blocks.len()
    }

    /// Number of `fetch_block_children` calls made for `block_id`
    pub fn children_calls(&self, block_id: &str) -> usize {
        self.log().children.iter().filter(|id| *id == block_id).count()
    }

    /// Number of `fetch_page` calls made for `page_id`
    pub fn page_calls(&self, page_id: &str) -> usize {
        self.log().pages.iter().filter(|id| *id == page_id).count()
    }

    /// Every database query received, in order
    pub fn recorded_queries(&self) -> Vec<(String, DatabaseQuery)> {
        self.log().queries.clone()
    }

    fn log(&self) -> std::sync::MutexGuard<'_, CallLog> {
        self.calls.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn check_failure(&self, id: &str) -> Result<()> {
        if self.failing.contains(id) {
            return Err(anyhow!("simulated fetch failure for {}", id));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentClient for InMemoryClient {
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<ListResponse> {
        self.log()
            .queries
            .push((database_id.to_string(), query.clone()));
        self.check_failure(database_id)?;

        let pages = self
            .databases
            .get(database_id)
            .ok_or_else(|| anyhow!("database not found: {}", database_id))?;

        Ok(ListResponse::complete(
            pages.iter().take(query.page_size).cloned().collect(),
        ))
    }

    async fn fetch_page(&self, page_id: &str) -> Result<Value> {
        self.log().pages.push(page_id.to_string());
        self.check_failure(page_id)?;

        self.pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| anyhow!("page not found: {}", page_id))
    }

    async fn fetch_block_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<ListResponse> {
        self.log().children.push(block_id.to_string());
        self.check_failure(block_id)?;

        let records = self.children.get(block_id).cloned().unwrap_or_default();
        let Some(size) = self.children_page_size else {
            return Ok(ListResponse::complete(records));
        };

        // Cursors are stringified offsets into the fixture list
        let offset = match start_cursor {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|e| anyhow!("invalid cursor '{}': {}", cursor, e))?,
            None => 0,
        };
        let end = (offset + size).min(records.len());
        let has_more = end < records.len();

        Ok(ListResponse {
            results: records.get(offset..end).map(<[Value]>::to_vec).unwrap_or_default(),
            has_more,
            next_cursor: has_more.then(|| end.to_string()),
        })
    }

    async fn fetch_block(&self, block_id: &str) -> Result<Value> {
        self.log().blocks.push(block_id.to_string());
        self.check_failure(block_id)?;

        self.blocks
            .get(block_id)
            .cloned()
            .ok_or_else(|| anyhow!("block not found: {}", block_id))
    }
}
