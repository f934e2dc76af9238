//! Block Tree Builder
//!
//! Turns the flat, paginated child listings of the content API into an ordered
//! forest of `Block`s.
//!
//! # Algorithm
//!
//! For one parent id, all child pages are drained into a single flat sequence
//! first. Each record is then, in order:
//!
//! 1. Refetched by id when it is a media block whose hosted file URL expired
//! 2. Converted into a `Block`
//! 3. Given its children by recursing on its id when `has_children` is set
//! 4. Merged into the preceding numbered list item as a sibling when both are
//!    `numbered_list_item`s under the same parent
//!
//! Bulleted list items are never merged; each one stays a top-level block.
//!
//! Every fetch is awaited in sequence, depth first. Any fetch failure aborts
//! the whole build and no partial forest is returned.

use crate::client::ContentClient;
use crate::models::time::{SystemTimeProvider, TimeProvider};
use crate::models::{Block, BlockKind, Media};
use crate::services::error::NotionServiceError;
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;

/// Builds block forests from a `ContentClient`
#[derive(Clone)]
pub struct BlockTreeBuilder {
    client: Arc<dyn ContentClient>,
    clock: Arc<dyn TimeProvider>,
}

impl BlockTreeBuilder {
    /// Builder reading "now" from the system clock
    pub fn new(client: Arc<dyn ContentClient>) -> Self {
        Self {
            client,
            clock: Arc::new(SystemTimeProvider),
        }
    }

    /// Replace the clock used for asset expiry checks
    pub fn with_clock(mut self, clock: Arc<dyn TimeProvider>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the ordered forest of blocks under `block_id`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use notion_render_core::client::InMemoryClient;
    /// use notion_render_core::services::BlockTreeBuilder;
    /// use serde_json::json;
    /// use std::sync::Arc;
    ///
    /// # tokio_test::block_on(async {
    /// let parent = json!({ "type": "page_id", "page_id": "page-1" });
    /// let client = InMemoryClient::new().with_children("page-1", vec![
    ///     json!({ "id": "n1", "type": "numbered_list_item", "parent": parent }),
    ///     json!({ "id": "n2", "type": "numbered_list_item", "parent": parent }),
    ///     json!({ "id": "p1", "type": "paragraph", "parent": parent }),
    /// ]);
    ///
    /// let blocks = BlockTreeBuilder::new(Arc::new(client))
    ///     .build_blocks("page-1")
    ///     .await
    ///     .unwrap();
    ///
    /// assert_eq!(blocks.len(), 2);
    /// assert_eq!(blocks[0].siblings()[0].id(), "n2");
    /// # });
    /// ```
    pub fn build_blocks<'a>(
        &'a self,
        block_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Block>, NotionServiceError>> {
        Box::pin(async move {
            tracing::debug!("Building block tree for {}", block_id);

            let records = self.fetch_all_children(block_id).await?;
            let mut results: Vec<Block> = Vec::with_capacity(records.len());
            let mut last_list_index: Option<usize> = None;

            for (index, raw) in records.into_iter().enumerate() {
                let raw = if self.needs_refresh(&raw) {
                    self.refresh(raw).await?
                } else {
                    raw
                };

                let mut block = Block::from_raw(raw);
                if block.has_children() {
                    let children = self.build_blocks(block.id()).await?;
                    block = block.with_children(children);
                }

                if block.kind() != &BlockKind::NumberedListItem {
                    last_list_index = None;
                    results.push(block);
                    continue;
                }

                match last_list_index {
                    Some(last)
                        if last != index && results[last].shares_list_with(&block) =>
                    {
                        tracing::debug!(
                            "Merging numbered list item {} into {}",
                            block.id(),
                            results[last].id()
                        );
                        results[last].push_sibling(block);
                    }
                    _ => {
                        last_list_index = Some(results.len());
                        results.push(block);
                    }
                }
            }

            tracing::debug!(
                "Built {} top-level blocks for {}",
                results.len(),
                block_id
            );
            Ok(results)
        })
    }

    /// Drain every page of children for `block_id` into one flat sequence
    async fn fetch_all_children(&self, block_id: &str) -> Result<Vec<Value>, NotionServiceError> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .client
                .fetch_block_children(block_id, cursor.as_deref())
                .await
                .map_err(|e| {
                    NotionServiceError::fetch_failed(format!("children of {}", block_id), e)
                })?;

            records.extend(page.results);

            if !page.has_more {
                break;
            }
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => {
                    return Err(NotionServiceError::invalid_response(format!(
                        "children of {} report more results without a cursor",
                        block_id
                    )))
                }
            }
        }

        Ok(records)
    }

    /// Media blocks hosting a file whose signed URL has already expired
    fn needs_refresh(&self, raw: &Value) -> bool {
        let Some(tag) = raw.get("type").and_then(Value::as_str) else {
            return false;
        };
        if !BlockKind::from_type(tag).is_media() {
            return false;
        }

        raw.get(tag)
            .map(Media::from_properties)
            .is_some_and(|media| media.is_expired(self.clock.now()))
    }

    async fn refresh(&self, raw: Value) -> Result<Value, NotionServiceError> {
        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| NotionServiceError::invalid_response("expired media block without id"))?;

        tracing::debug!("Refreshing expired media block {}", id);
        self.client
            .fetch_block(id)
            .await
            .map_err(|e| NotionServiceError::fetch_failed(format!("block {}", id), e))
    }
}
