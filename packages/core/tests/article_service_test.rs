//! Article Service Integration Tests
//!
//! Drives `ArticleService` end to end against `InMemoryClient` fixtures:
//! query construction, article listing, document assembly and the block
//! forest cache.

use anyhow::Result;
use notion_render_core::cache::{BlockCache, MemoryBlockCache};
use notion_render_core::models::RichTextRun;
use notion_render_core::services::{ArticleQuery, ArticleService, NotionServiceError};
use notion_render_core::{InMemoryClient, NotionConfig, RenderOptions};
use serde_json::{json, Value};
use std::sync::Arc;

fn page_record(id: &str, title: &str, slug: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "parent": { "type": "database_id", "database_id": "db-1" },
        "properties": {
            "name": { "type": "title", "title": [{ "plain_text": title }] },
            "slug": { "type": "rich_text", "rich_text": [{ "plain_text": slug }] },
            "tags": { "type": "multi_select", "multi_select": [{ "name": "test" }] },
            "published": { "type": "date", "date": { "start": "2023-07-13" } },
            "description": { "type": "rich_text", "rich_text": [{ "plain_text": "Summary" }] },
            "public": { "type": "checkbox", "checkbox": true }
        }
    })
}

fn paragraph(id: &str, parent: &str, text: &str) -> Value {
    json!({
        "id": id,
        "type": "paragraph",
        "parent": { "type": "page_id", "page_id": parent },
        "has_children": false,
        "paragraph": { "rich_text": [{ "plain_text": text }] }
    })
}

fn fixture_client() -> InMemoryClient {
    InMemoryClient::new()
        .with_database(
            "db-1",
            vec![
                page_record("page-1", "First", "first"),
                page_record("page-2", "Second", "second"),
                page_record("page-3", "Third", "third"),
            ],
        )
        .with_page(page_record("page-1", "First", "first"))
        .with_children("page-1", vec![paragraph("b1", "page-1", "Hello")])
}

fn config() -> NotionConfig {
    NotionConfig::new("secret", "db-1")
}

#[test]
fn test_default_query_without_filters() {
    assert_eq!(
        ArticleService::default_query(None, None),
        vec![json!({ "property": "public", "checkbox": { "equals": true } })]
    );
}

#[test]
fn test_default_query_with_slug_and_tag() {
    assert_eq!(
        ArticleService::default_query(Some("example-slug"), Some("example-tag")),
        vec![
            json!({ "property": "public", "checkbox": { "equals": true } }),
            json!({ "property": "slug", "rich_text": { "equals": "example-slug" } }),
            json!({ "property": "tags", "multi_select": { "contains": "example-tag" } }),
        ]
    );
}

#[test]
fn test_default_sorting() {
    assert_eq!(
        ArticleService::default_sorting(),
        json!({ "property": "published", "direction": "descending" })
    );
}

#[tokio::test]
async fn test_get_articles_sends_filter_and_sort() -> Result<()> {
    let client = Arc::new(fixture_client());
    let service = ArticleService::new(config(), client.clone());

    let pages = service
        .get_articles(&ArticleQuery::new().with_tag("test").with_page_size(2))
        .await?;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].id(), "page-1");
    assert_eq!(RichTextRun::plain_text_of(pages[1].title()), "Second");

    let queries = client.recorded_queries();
    assert_eq!(queries.len(), 1);
    let (database_id, query) = &queries[0];
    assert_eq!(database_id, "db-1");
    assert_eq!(query.page_size, 2);
    assert_eq!(
        query.filter,
        json!({ "and": ArticleService::default_query(None, Some("test")) })
    );
    assert_eq!(query.sorts, vec![ArticleService::default_sorting()]);

    Ok(())
}

#[tokio::test]
async fn test_get_articles_uses_configured_page_size() -> Result<()> {
    let client = Arc::new(fixture_client());
    let service = ArticleService::new(config().with_page_size(1), client.clone());

    let pages = service.get_articles(&ArticleQuery::new()).await?;

    assert_eq!(pages.len(), 1);
    assert_eq!(client.recorded_queries()[0].1.page_size, 1);
    Ok(())
}

#[tokio::test]
async fn test_get_articles_propagates_query_failure() -> Result<()> {
    let client = Arc::new(fixture_client().with_failure("db-1"));
    let service = ArticleService::new(config(), client);

    let err = service.get_articles(&ArticleQuery::new()).await.unwrap_err();

    assert!(matches!(err, NotionServiceError::FetchFailed { .. }));
    Ok(())
}

#[tokio::test]
async fn test_get_article_assembles_document() -> Result<()> {
    let client = Arc::new(fixture_client());
    let service = ArticleService::new(config(), client);
    let options = RenderOptions::new();

    let document = service.get_article("page-1").await?;

    assert_eq!(document.metadata().slug(), Some("first"));
    assert_eq!(document.blocks().len(), 1);
    assert_eq!(
        document.formatted_title(&options).as_str(),
        "<h1 class=\"mb-4 mt-6 text-3xl font-semibold\"><span>First</span></h1>"
    );
    assert_eq!(
        document.formatted_description(&options).as_str(),
        "<p><span>Summary</span></p>"
    );
    assert_eq!(
        document.formatted_published_at(&options).as_str(),
        "<p>July 13, 2023</p>"
    );
    assert_eq!(
        document.format_blocks(&options)[0].as_str(),
        "<p><span>Hello</span></p>"
    );

    Ok(())
}

#[tokio::test]
async fn test_get_article_reads_blocks_through_cache() -> Result<()> {
    let client = Arc::new(fixture_client());
    let cache = Arc::new(MemoryBlockCache::new());
    let service = ArticleService::with_cache(config(), client.clone(), cache.clone());

    service.get_article("page-1").await?;
    service.get_article("page-1").await?;

    // Metadata is fetched each time, the forest only once
    assert_eq!(client.page_calls("page-1"), 2);
    assert_eq!(client.children_calls("page-1"), 1);
    assert!(cache.get("page-1").await.is_some());

    Ok(())
}

#[tokio::test]
async fn test_failed_block_build_is_not_cached() -> Result<()> {
    let client = Arc::new(
        fixture_client()
            .with_children(
                "page-1",
                vec![json!({ "id": "n1", "type": "numbered_list_item", "has_children": true })],
            )
            .with_failure("n1"),
    );
    let cache = Arc::new(MemoryBlockCache::new());
    let service = ArticleService::with_cache(config(), client, cache.clone());

    assert!(service.get_article("page-1").await.is_err());
    assert!(service.get_article("page-1").await.is_err());
    assert!(cache.is_empty().await);

    Ok(())
}

#[tokio::test]
async fn test_get_blocks_bypasses_cache() -> Result<()> {
    let client = Arc::new(fixture_client());
    let cache = Arc::new(MemoryBlockCache::new());
    let service = ArticleService::with_cache(config(), client.clone(), cache.clone());

    let blocks = service.get_blocks("page-1").await?;
    service.get_blocks("page-1").await?;

    assert_eq!(blocks[0].id(), "b1");
    assert_eq!(client.children_calls("page-1"), 2);
    assert_eq!(cache.len().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_page_fails_article() -> Result<()> {
    let service = ArticleService::new(config(), Arc::new(fixture_client()));

    let err = service.get_article("page-404").await.unwrap_err();

    assert_eq!(err.to_string(), "Fetch failed: page page-404");
    Ok(())
}
