//! Article Service
//!
//! Discovery and assembly on top of the tree builder: lists the public
//! articles of the configured database and turns one of them into a
//! `Document`.
//!
//! Block forests are read through the injected `BlockCache`, keyed by page
//! id. Page metadata is always fetched fresh.

use crate::cache::{self, BlockCache};
use crate::client::{ContentClient, DatabaseQuery};
use crate::config::NotionConfig;
use crate::models::time::TimeProvider;
use crate::models::{Block, Document, Page};
use crate::services::block_tree::BlockTreeBuilder;
use crate::services::error::NotionServiceError;
use serde_json::{json, Value};
use std::sync::Arc;

/// Filters for listing articles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    /// Only articles carrying this tag
    pub tag: Option<String>,
    /// Only the article with this slug
    pub slug: Option<String>,
    /// Overrides the configured page size
    pub page_size: Option<usize>,
}

impl ArticleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Lists and assembles articles from one content database
pub struct ArticleService {
    config: NotionConfig,
    client: Arc<dyn ContentClient>,
    cache: Arc<dyn BlockCache>,
    tree: BlockTreeBuilder,
}

impl ArticleService {
    /// Create a service using the cache store described by `config`
    pub fn new(config: NotionConfig, client: Arc<dyn ContentClient>) -> Self {
        let cache = config.build_cache();
        Self::with_cache(config, client, cache)
    }

    /// Create a service with an explicit cache store
    pub fn with_cache(
        config: NotionConfig,
        client: Arc<dyn ContentClient>,
        cache: Arc<dyn BlockCache>,
    ) -> Self {
        let tree = BlockTreeBuilder::new(Arc::clone(&client));
        Self {
            config,
            client,
            cache,
            tree,
        }
    }

    /// Replace the clock used for media expiry checks
    pub fn with_clock(mut self, clock: Arc<dyn TimeProvider>) -> Self {
        self.tree = self.tree.with_clock(clock);
        self
    }

    pub fn config(&self) -> &NotionConfig {
        &self.config
    }

    /// Filter conditions combined with `and` when listing articles
    ///
    /// Always requires the `public` checkbox; slug and tag conditions are
    /// appended when given.
    pub fn default_query(slug: Option<&str>, tag: Option<&str>) -> Vec<Value> {
        let mut query = vec![json!({
            "property": "public",
            "checkbox": { "equals": true }
        })];

        if let Some(slug) = slug {
            query.push(json!({
                "property": "slug",
                "rich_text": { "equals": slug }
            }));
        }
        if let Some(tag) = tag {
            query.push(json!({
                "property": "tags",
                "multi_select": { "contains": tag }
            }));
        }

        query
    }

    /// Newest published first
    pub fn default_sorting() -> Value {
        json!({ "property": "published", "direction": "descending" })
    }

    /// List public articles matching `query`
    pub async fn get_articles(&self, query: &ArticleQuery) -> Result<Vec<Page>, NotionServiceError> {
        let request = DatabaseQuery {
            filter: json!({
                "and": Self::default_query(query.slug.as_deref(), query.tag.as_deref())
            }),
            sorts: vec![Self::default_sorting()],
            page_size: query.page_size.unwrap_or(self.config.page_size),
        };

        tracing::debug!(
            "Querying database {} (tag: {:?}, slug: {:?}, page_size: {})",
            self.config.database_id,
            query.tag,
            query.slug,
            request.page_size
        );

        let response = self
            .client
            .query_database(&self.config.database_id, &request)
            .await
            .map_err(|e| {
                NotionServiceError::fetch_failed(
                    format!("query of database {}", self.config.database_id),
                    e,
                )
            })?;

        Ok(response.results.into_iter().map(Page::from_raw).collect())
    }

    /// Fetch one article and its block forest
    ///
    /// The forest comes from the cache when present; on a miss it is built
    /// and stored. A failed build leaves the cache untouched.
    pub async fn get_article(&self, id: &str) -> Result<Document, NotionServiceError> {
        let raw_page = self
            .client
            .fetch_page(id)
            .await
            .map_err(|e| NotionServiceError::fetch_failed(format!("page {}", id), e))?;
        let page = Page::from_raw(raw_page);

        let blocks = cache::fetch_or_compute(self.cache.as_ref(), id, || self.get_blocks(id)).await?;

        Ok(Document::assemble(page, blocks))
    }

    /// Build the block forest under `id`, bypassing the cache
    pub async fn get_blocks(&self, id: &str) -> Result<Vec<Block>, NotionServiceError> {
        self.tree.build_blocks(id).await
    }
}
