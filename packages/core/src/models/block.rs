//! Block Data Structures
//!
//! This module defines the `Block` struct, the typed representation of one
//! content block returned by the Notion API.
//!
//! # Architecture
//!
//! - **Closed kind set**: `BlockKind` enumerates the renderable block types plus
//!   an explicit `Unknown` variant carrying the raw type tag
//! - **Opaque payload**: the per-type property map (`raw[type]`) is kept as JSON
//!   and read through defensive accessors
//! - **Owned tree**: a block exclusively owns its `children` and `siblings`;
//!   the only link back to a parent is the `parent` reference value
//!
//! # Examples
//!
//! ```rust
//! use notion_render_core::models::{Block, BlockKind};
//! use serde_json::json;
//!
//! let block = Block::from_raw(json!({
//!     "id": "b1",
//!     "type": "paragraph",
//!     "has_children": false,
//!     "paragraph": { "rich_text": [{ "plain_text": "Hi" }] }
//! }));
//!
//! assert_eq!(block.kind(), &BlockKind::Paragraph);
//! assert_eq!(block.rich_text()[0].plain_text, "Hi");
//! ```

use crate::models::rich_text::RichTextRun;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Block type tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletedListItem,
    NumberedListItem,
    Quote,
    Callout,
    Code,
    Image,
    Video,
    TableOfContents,
    /// Any type tag outside the renderable set
    Unknown(String),
}

impl BlockKind {
    /// Parse an API type tag
    pub fn from_type(tag: &str) -> Self {
        match tag {
            "paragraph" => Self::Paragraph,
            "heading_1" => Self::Heading1,
            "heading_2" => Self::Heading2,
            "heading_3" => Self::Heading3,
            "bulleted_list_item" => Self::BulletedListItem,
            "numbered_list_item" => Self::NumberedListItem,
            "quote" => Self::Quote,
            "callout" => Self::Callout,
            "code" => Self::Code,
            "image" => Self::Image,
            "video" => Self::Video,
            "table_of_contents" => Self::TableOfContents,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// API type tag for this kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading1 => "heading_1",
            Self::Heading2 => "heading_2",
            Self::Heading3 => "heading_3",
            Self::BulletedListItem => "bulleted_list_item",
            Self::NumberedListItem => "numbered_list_item",
            Self::Quote => "quote",
            Self::Callout => "callout",
            Self::Code => "code",
            Self::Image => "image",
            Self::Video => "video",
            Self::TableOfContents => "table_of_contents",
            Self::Unknown(tag) => tag,
        }
    }

    /// Media kinds carry a file or external source
    pub fn is_media(&self) -> bool {
        matches!(self, Self::Image | Self::Video)
    }
}

impl From<String> for BlockKind {
    fn from(tag: String) -> Self {
        Self::from_type(&tag)
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the object a block or page belongs to
///
/// A relation, not an ownership edge. Two blocks share a parent when their
/// references compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ParentRef {
    Page(String),
    Block(String),
    Database(String),
    Workspace,
    /// Parent shapes not covered above, kept verbatim
    Other(Value),
}

impl ParentRef {
    /// Read a parent reference from its raw API value
    ///
    /// The API encodes the parent as `{ "type": "page_id", "page_id": "..." }`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let tag = object.get("type").and_then(Value::as_str);
        let id_under = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        let parent = match tag {
            Some("page_id") => id_under("page_id").map(Self::Page),
            Some("block_id") => id_under("block_id").map(Self::Block),
            Some("database_id") => id_under("database_id").map(Self::Database),
            Some("workspace") => Some(Self::Workspace),
            _ => None,
        };

        Some(parent.unwrap_or_else(|| Self::Other(value.clone())))
    }
}

/// Where a media block's asset lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSourceKind {
    /// Hosted by the API provider behind a time-limited URL
    File,
    /// Hosted elsewhere, URL does not expire
    External,
}

impl MediaSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::External => "external",
        }
    }
}

/// Media properties of an image or video block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Media {
    pub url: Option<String>,
    pub expiry_time: Option<DateTime<Utc>>,
    pub caption: Vec<RichTextRun>,
    pub source: Option<MediaSourceKind>,
}

impl Media {
    /// Derive media fields from a media block's property map
    ///
    /// Without a recognised source type only the caption is populated.
    pub fn from_properties(properties: &Value) -> Self {
        let caption = RichTextRun::list_from_value(properties.get("caption"));

        match properties.get("type").and_then(Value::as_str) {
            Some("file") => Self {
                url: string_at(properties, &["file", "url"]),
                expiry_time: string_at(properties, &["file", "expiry_time"])
                    .as_deref()
                    .and_then(parse_timestamp),
                caption,
                source: Some(MediaSourceKind::File),
            },
            Some("external") => Self {
                url: string_at(properties, &["external", "url"]),
                expiry_time: None,
                caption,
                source: Some(MediaSourceKind::External),
            },
            _ => Self {
                caption,
                ..Self::default()
            },
        }
    }

    /// True when the asset URL has a recorded expiry before `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.source == Some(MediaSourceKind::File)
            && self.expiry_time.is_some_and(|expiry| expiry < now)
    }
}

/// Icon attached to a callout or page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Icon {
    Emoji(String),
    External(String),
    File(String),
}

impl Icon {
    /// Resolve an icon object by its `type` key
    pub fn from_value(value: &Value) -> Option<Self> {
        match value.get("type").and_then(Value::as_str)? {
            "emoji" => value
                .get("emoji")
                .and_then(Value::as_str)
                .map(|emoji| Self::Emoji(emoji.to_string())),
            "external" => string_at(value, &["external", "url"]).map(Self::External),
            "file" => string_at(value, &["file", "url"]).map(Self::File),
            other => {
                tracing::debug!("Unsupported icon type '{}'", other);
                None
            }
        }
    }
}

/// One content block
///
/// # Fields
///
/// - `id`: Block identifier assigned by the API
/// - `kind`: Type tag (`raw["type"]`)
/// - `parent`: Reference to the owning page or block
/// - `has_children`: Whether the API reports nested children
/// - `properties`: Per-type payload (`raw[type]`), opaque
/// - `children`: Nested blocks, populated by the tree builder
/// - `siblings`: Numbered list items merged into this one by the tree builder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    id: String,
    kind: BlockKind,
    created_time: Option<DateTime<Utc>>,
    last_edited_time: Option<DateTime<Utc>>,
    created_by: Value,
    last_edited_by: Value,
    parent: Option<ParentRef>,
    archived: bool,
    has_children: bool,
    properties: Value,
    children: Vec<Block>,
    siblings: Vec<Block>,
}

impl Block {
    /// Construct a block from a raw API record
    ///
    /// Absent keys yield empty or absent values; no key is required.
    pub fn from_raw(mut raw: Value) -> Self {
        let type_tag = string_at(&raw, &["type"]).unwrap_or_default();
        let properties = raw
            .get_mut(type_tag.as_str())
            .map(Value::take)
            .unwrap_or(Value::Null);

        Self {
            id: string_at(&raw, &["id"]).unwrap_or_default(),
            kind: BlockKind::from_type(&type_tag),
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
            parent: raw.get("parent").and_then(ParentRef::from_value),
            archived: bool_at(&raw, "archived"),
            has_children: bool_at(&raw, "has_children"),
            properties,
            children: Vec::new(),
            siblings: Vec::new(),
        }
    }

    /// Attach nested children (consumes and returns the block)
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// Attach merged siblings (consumes and returns the block)
    pub fn with_siblings(mut self, siblings: Vec<Block>) -> Self {
        self.siblings = siblings;
        self
    }

    /// Append a merged sibling; only the tree builder does this
    pub(crate) fn push_sibling(&mut self, sibling: Block) {
        self.siblings.push(sibling);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
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

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub fn archived(&self) -> bool {
        self.archived
    }

    pub fn has_children(&self) -> bool {
        self.has_children
    }

    pub fn properties(&self) -> &Value {
        &self.properties
    }

    pub fn children(&self) -> &[Block] {
        &self.children
    }

    pub fn siblings(&self) -> &[Block] {
        &self.siblings
    }

    /// The block's `rich_text` property, empty when absent
    pub fn rich_text(&self) -> Vec<RichTextRun> {
        RichTextRun::list_from_value(self.properties.get("rich_text"))
    }

    /// The block's icon, resolved by icon type
    pub fn icon(&self) -> Option<Icon> {
        self.properties.get("icon").and_then(Icon::from_value)
    }

    /// Language tag of a code block
    pub fn language(&self) -> Option<&str> {
        self.properties.get("language").and_then(Value::as_str)
    }

    /// Media fields of an image or video block
    pub fn media(&self) -> Media {
        Media::from_properties(&self.properties)
    }

    /// True when `other` can be merged into this block as a list sibling
    pub fn shares_list_with(&self, other: &Block) -> bool {
        self.kind == other.kind && self.parent == other.parent
    }
}

/// Read a nested string value by key path
pub(crate) fn string_at(value: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn bool_at(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Parse an RFC 3339 timestamp, absent when malformed
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => Some(timestamp.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!("Ignoring malformed timestamp '{}': {}", raw, e);
            None
        }
    }
}
