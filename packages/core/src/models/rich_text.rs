//! Rich Text Runs
//!
//! A rich text run is one span of styled text as returned by the Notion API:
//! its plain text, the annotation set applied to it, and an optional link.
//!
//! # Examples
//!
//! ```rust
//! use notion_render_core::models::RichTextRun;
//! use serde_json::json;
//!
//! let runs = RichTextRun::list_from_value(Some(&json!([
//!     { "plain_text": "Hello", "annotations": { "bold": true } },
//!     { "plain_text": " world", "href": "https://example.com" }
//! ])));
//!
//! assert_eq!(runs.len(), 2);
//! assert!(runs[0].annotations.bold);
//! assert_eq!(runs[1].href.as_deref(), Some("https://example.com"));
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Default annotation color reported by the API
pub const DEFAULT_COLOR: &str = "default";

/// Annotation set applied to a rich text run
///
/// The known keys are typed fields. Any other key the API sends is kept in
/// `extra` and treated as a boolean style toggle. A known key holding `null`
/// or a value of the wrong type reads as unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    #[serde(deserialize_with = "lenient_bool")]
    pub bold: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub italic: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub strikethrough: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub underline: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub code: bool,
    #[serde(deserialize_with = "lenient_color")]
    pub color: String,

    /// Keys outside the known set
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: DEFAULT_COLOR.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

impl Annotations {
    /// Names of unknown annotation keys whose value is truthy, in key order
    pub fn extra_toggles(&self) -> impl Iterator<Item = &str> {
        self.extra
            .iter()
            .filter(|(_, value)| is_truthy(value))
            .map(|(key, _)| key.as_str())
    }
}

/// Truthiness of an opaque annotation value (null and false are falsy)
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// One span of styled text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichTextRun {
    #[serde(deserialize_with = "lenient_string")]
    pub plain_text: String,
    #[serde(deserialize_with = "lenient_annotations")]
    pub annotations: Annotations,
    #[serde(deserialize_with = "lenient_href")]
    pub href: Option<String>,
}

impl RichTextRun {
    /// Create an unstyled run
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            ..Self::default()
        }
    }

    /// Set the run's link target
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Set the run's annotations
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Parse a rich text array from a raw API value
    ///
    /// Absent or non-array values yield an empty sequence. Mistyped fields
    /// inside a run fall back to their defaults; only items that are not
    /// objects are skipped.
    pub fn list_from_value(value: Option<&Value>) -> Vec<RichTextRun> {
        let Some(items) = value.and_then(Value::as_array) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match RichTextRun::deserialize(item) {
                Ok(run) => Some(run),
                Err(e) => {
                    tracing::warn!("Skipping malformed rich text run: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Concatenated plain text of a run sequence
    pub fn plain_text_of(runs: &[RichTextRun]) -> String {
        runs.iter().map(|run| run.plain_text.as_str()).collect()
    }
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}

fn lenient_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_str()
        .unwrap_or(DEFAULT_COLOR)
        .to_string())
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_str()
        .unwrap_or_default()
        .to_string())
}

fn lenient_href<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_str()
        .map(str::to_string))
}

fn lenient_annotations<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Annotations, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(Annotations::default());
    }
    Annotations::deserialize(value).map_err(serde::de::Error::custom)
}
