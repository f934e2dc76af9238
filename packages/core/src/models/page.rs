//! Page Metadata
//!
//! A `Page` is the typed view of one database row returned by the Notion API.
//! The article fields (title, slug, tags, publish date, description) are
//! derived once, at construction, from fixed property keys:
//!
//! | Field          | Property path            |
//! |----------------|--------------------------|
//! | `title`        | `name.title`             |
//! | `slug`         | `slug`                   |
//! | `tags`         | `tags`                   |
//! | `published_at` | `published.date.start`   |
//! | `description`  | `description.rich_text`  |

use crate::models::block::{parse_timestamp, string_at, Icon, ParentRef};
use crate::models::rich_text::RichTextRun;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

/// Typed page metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    id: String,
    created_time: Option<DateTime<Utc>>,
    last_edited_time: Option<DateTime<Utc>>,
    created_by: Value,
    last_edited_by: Value,
    cover: Value,
    icon: Option<Icon>,
    parent: Option<ParentRef>,
    archived: bool,
    properties: Value,
    url: Option<String>,

    title: Vec<RichTextRun>,
    slug: Option<String>,
    tags: Vec<String>,
    published_at: Option<NaiveDate>,
    description: Vec<RichTextRun>,
}

impl Page {
    /// Construct a page from a raw API record
    pub fn from_raw(mut raw: Value) -> Self {
        let properties = raw
            .get_mut("properties")
            .map(Value::take)
            .unwrap_or(Value::Null);

        Self {
            id: string_at(&raw, &["id"]).unwrap_or_default(),
            created_time: string_at(&raw, &["created_time"])
                .as_deref()
                .and_then(parse_timestamp),
            last_edited_time: string_at(&raw, &["last_edited_time"])
                .as_deref()
                .and_then(parse_timestamp),
            created_by: raw.get_mut("created_by").map(Value::take).unwrap_or_default(),
            last_edited_by: raw
                .get_mut("last_edited_by")
                .map(Value::take)
                .unwrap_or_default(),
            cover: raw.get_mut("cover").map(Value::take).unwrap_or_default(),
            icon: raw.get("icon").and_then(Icon::from_value),
            parent: raw.get("parent").and_then(ParentRef::from_value),
            archived: raw.get("archived").and_then(Value::as_bool).unwrap_or(false),
            url: string_at(&raw, &["url"]),

            title: RichTextRun::list_from_value(
                properties.get("name").and_then(|name| name.get("title")),
            ),
            slug: properties.get("slug").and_then(slug_from_property),
            tags: properties
                .get("tags")
                .map(tags_from_property)
                .unwrap_or_default(),
            published_at: string_at(&properties, &["published", "date", "start"])
                .as_deref()
                .and_then(parse_date),
            description: RichTextRun::list_from_value(
                properties
                    .get("description")
                    .and_then(|description| description.get("rich_text")),
            ),
            properties,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        self.created_time
    }

    pub fn last_edited_time(&self) -> Option<DateTime<Utc>> {
        self.last_edited_time
    }

    pub fn created_by(&self) -> &Value {
        &self.created_by
    }

    pub fn last_edited_by(&self) -> &Value {
        &self.last_edited_by
    }

    pub fn cover(&self) -> &Value {
        &self.cover
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub fn archived(&self) -> bool {
        self.archived
    }

    pub fn properties(&self) -> &Value {
        &self.properties
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn title(&self) -> &[RichTextRun] {
        &self.title
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn published_at(&self) -> Option<NaiveDate> {
        self.published_at
    }

    pub fn description(&self) -> &[RichTextRun] {
        &self.description
    }
}

/// A slug is either a bare string or a rich_text property
fn slug_from_property(value: &Value) -> Option<String> {
    if let Some(slug) = value.as_str() {
        return Some(slug.to_string());
    }

    let runs = RichTextRun::list_from_value(value.get("rich_text"));
    if runs.is_empty() {
        return None;
    }
    Some(RichTextRun::plain_text_of(&runs))
}

/// Tags are either a multi_select property or a bare string array
fn tags_from_property(value: &Value) -> Vec<String> {
    let items = value
        .get("multi_select")
        .and_then(Value::as_array)
        .or_else(|| value.as_array());

    items
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    item.as_str()
                        .or_else(|| item.get("name").and_then(Value::as_str))
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a date property start, `YYYY-MM-DD` or a full timestamp
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|timestamp| timestamp.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article_record() -> Value {
        json!({
            "object": "page",
            "id": "page-1",
            "created_time": "2023-07-10T08:00:00.000Z",
            "last_edited_time": "2023-07-12T09:30:00.000Z",
            "created_by": { "object": "user", "id": "user-1" },
            "last_edited_by": { "object": "user", "id": "user-1" },
            "cover": null,
            "icon": { "type": "emoji", "emoji": "📝" },
            "parent": { "type": "database_id", "database_id": "db-1" },
            "archived": false,
            "url": "https://www.notion.so/page-1",
            "properties": {
                "name": { "id": "title", "type": "title", "title": [{ "plain_text": "My Article" }] },
                "slug": { "type": "rich_text", "rich_text": [{ "plain_text": "my-article" }] },
                "tags": { "type": "multi_select", "multi_select": [{ "name": "rust" }, { "name": "notion" }] },
                "published": { "type": "date", "date": { "start": "2023-07-13", "end": null } },
                "description": { "type": "rich_text", "rich_text": [{ "plain_text": "About things" }] },
                "public": { "type": "checkbox", "checkbox": true }
            }
        })
    }

    #[test]
    fn test_derived_fields() {
        let page = Page::from_raw(article_record());

        assert_eq!(page.id(), "page-1");
        assert_eq!(RichTextRun::plain_text_of(page.title()), "My Article");
        assert_eq!(page.slug(), Some("my-article"));
        assert_eq!(page.tags(), ["rust".to_string(), "notion".to_string()]);
        assert_eq!(page.published_at(), NaiveDate::from_ymd_opt(2023, 7, 13));
        assert_eq!(RichTextRun::plain_text_of(page.description()), "About things");
        assert_eq!(page.url(), Some("https://www.notion.so/page-1"));
        assert_eq!(page.icon(), Some(&Icon::Emoji("📝".to_string())));
        assert_eq!(page.parent(), Some(&ParentRef::Database("db-1".to_string())));
        assert!(page.created_time().is_some());
    }

    #[test]
    fn test_missing_properties_yield_empty_fields() {
        let page = Page::from_raw(json!({ "id": "bare" }));

        assert_eq!(page.id(), "bare");
        assert!(page.title().is_empty());
        assert!(page.slug().is_none());
        assert!(page.tags().is_empty());
        assert!(page.published_at().is_none());
        assert!(page.description().is_empty());
        assert!(page.url().is_none());
        assert!(!page.archived());
    }

    #[test]
    fn test_plain_slug_and_tag_array() {
        let page = Page::from_raw(json!({
            "id": "p",
            "properties": { "slug": "hello", "tags": ["a", "b"] }
        }));

        assert_eq!(page.slug(), Some("hello"));
        assert_eq!(page.tags(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_published_accepts_timestamp() {
        let page = Page::from_raw(json!({
            "id": "p",
            "properties": { "published": { "date": { "start": "2023-07-13T10:00:00.000+00:00" } } }
        }));

        assert_eq!(page.published_at(), NaiveDate::from_ymd_opt(2023, 7, 13));
    }

    #[test]
    fn test_malformed_published_date_is_absent() {
        let page = Page::from_raw(json!({
            "id": "p",
            "properties": { "published": { "date": { "start": "next tuesday" } } }
        }));

        assert!(page.published_at().is_none());
    }
}
