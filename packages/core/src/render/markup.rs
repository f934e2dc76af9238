//! Markup Emission Primitives
//!
//! A small element builder. Text content and attribute values are escaped on
//! the way out, so renderers hand raw API text straight to it and concatenate
//! the resulting `Markup` fragments without escaping anything themselves.
//!
//! # Examples
//!
//! ```rust
//! use notion_render_core::render::markup::Element;
//!
//! let html = Element::new("a")
//!     .attr("href", "https://example.com?a=1&b=2")
//!     .class("link")
//!     .text("Tom & Jerry")
//!     .render();
//!
//! assert_eq!(
//!     html.as_str(),
//!     r#"<a href="https://example.com?a=1&amp;b=2" class="link">Tom &amp; Jerry</a>"#
//! );
//! ```

use serde::Serialize;
use std::fmt;

/// Elements that never have content or a closing tag
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "source", "input", "meta", "link"];

/// An already-escaped markup fragment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// An empty fragment
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Wrap a string that is already safe to emit
    ///
    /// Only for literal fragments; dynamic text goes through `Element::text`.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append another fragment
    pub fn push(&mut self, other: &Markup) {
        self.0.push_str(&other.0);
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut joined = Markup::empty();
        for fragment in iter {
            joined.push(&fragment);
        }
        joined
    }
}

#[derive(Debug, Clone)]
enum Content {
    Text(String),
    Markup(Markup),
}

#[derive(Debug, Clone)]
enum Attribute {
    Value(&'static str, String),
    Flag(&'static str),
}

/// Builder for one element
#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attributes: Vec<Attribute>,
    content: Vec<Content>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Add an attribute; the value is escaped on render
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::Value(name, value.into()));
        self
    }

    /// Add an attribute when a value is present
    pub fn attr_opt(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Add a boolean attribute, rendered as `name="name"`
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attributes.push(Attribute::Flag(name));
        self
    }

    /// Set the class attribute; an empty or blank class is omitted
    pub fn class(self, class: impl AsRef<str>) -> Self {
        let class = class.as_ref().trim();
        if class.is_empty() {
            return self;
        }
        self.attr("class", class)
    }

    /// Append text content; escaped on render
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content.push(Content::Text(text.into()));
        self
    }

    /// Append an already-rendered fragment
    pub fn child(mut self, markup: Markup) -> Self {
        self.content.push(Content::Markup(markup));
        self
    }

    /// Append several fragments in order
    pub fn children(mut self, fragments: impl IntoIterator<Item = Markup>) -> Self {
        self.content
            .extend(fragments.into_iter().map(Content::Markup));
        self
    }

    pub fn render(self) -> Markup {
        let mut out = String::new();
        out.push('<');
        out.push_str(self.tag);

        for attribute in &self.attributes {
            match attribute {
                Attribute::Value(name, value) => {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
                Attribute::Flag(name) => {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(name);
                    out.push('"');
                }
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return Markup(out);
        }

        for content in &self.content {
            match content {
                Content::Text(text) => out.push_str(&html_escape::encode_text(text)),
                Content::Markup(markup) => out.push_str(markup.as_str()),
            }
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
        Markup(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_class_is_omitted() {
        let html = Element::new("span").class("  ").text("Hi").render();
        assert_eq!(html.as_str(), "<span>Hi</span>");
    }

    #[test]
    fn test_text_is_escaped() {
        let html = Element::new("p").text("<script>alert(1)</script>").render();
        assert_eq!(html.as_str(), "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
    }

    #[test]
    fn test_attribute_is_escaped() {
        let html = Element::new("img").attr("src", "a\"b.png").render();
        assert_eq!(html.as_str(), "<img src=\"a&quot;b.png\">");
    }

    #[test]
    fn test_child_markup_is_not_escaped_again() {
        let inner = Element::new("span").text("a & b").render();
        let html = Element::new("p").child(inner).render();
        assert_eq!(html.as_str(), "<p><span>a &amp; b</span></p>");
    }

    #[test]
    fn test_flag_attribute() {
        let html = Element::new("video").attr("src", "v.mp4").flag("controls").render();
        assert_eq!(html.as_str(), "<video src=\"v.mp4\" controls=\"controls\"></video>");
    }

    #[test]
    fn test_void_element_has_no_closing_tag() {
        let html = Element::new("img").attr("alt", "").text("ignored").render();
        assert_eq!(html.as_str(), "<img alt=\"\">");
    }

    #[test]
    fn test_collect_concatenates_in_order() {
        let joined: Markup = vec![Markup::trusted("a"), Markup::trusted("b")]
            .into_iter()
            .collect();
        assert_eq!(joined.as_str(), "ab");
    }
}
