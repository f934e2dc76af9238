//! Style slots and class composition
//!
//! Every rendered container belongs to a `StyleSlot`. A slot has a fixed
//! default class; callers add their own class per slot through
//! `RenderOptions`. By default the two are concatenated (default first). With
//! `override_defaults` set, the caller's class replaces the default.

use std::collections::HashMap;

/// Styling target for one kind of rendered element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleSlot {
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
    Date,
}

impl StyleSlot {
    pub fn default_class(self) -> &'static str {
        match self {
            Self::BulletedListItem => "list-disc break-words",
            Self::Callout => "flex flex-column p-4 rounded mt-4",
            Self::Code => "border-2 p-6 rounded w-full overflow-x-auto",
            Self::Heading1 => "mb-4 mt-6 text-3xl font-semibold",
            Self::Heading2 => "mb-4 mt-6 text-2xl font-semibold",
            Self::Heading3 => "mb-2 mt-6 text-xl font-semibold",
            Self::NumberedListItem => "list-decimal",
            Self::Quote => "border-l-4 border-black px-5 py-1",
            Self::Paragraph
            | Self::Image
            | Self::Video
            | Self::TableOfContents
            | Self::Date => "",
        }
    }
}

/// Caller-supplied classes for rendering
///
/// # Examples
///
/// ```rust
/// use notion_render_core::render::{RenderOptions, StyleSlot};
///
/// let options = RenderOptions::new().with_class(StyleSlot::Paragraph, "prose");
/// assert_eq!(options.class_for(StyleSlot::Paragraph), "prose");
/// assert_eq!(options.class_for(StyleSlot::Quote), "border-l-4 border-black px-5 py-1");
///
/// let replaced = RenderOptions::new()
///     .with_class(StyleSlot::Quote, "my-quote")
///     .override_defaults(true);
/// assert_eq!(replaced.class_for(StyleSlot::Quote), "my-quote");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    classes: HashMap<StyleSlot, String>,
    override_defaults: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the caller class for a slot
    pub fn with_class(mut self, slot: StyleSlot, class: impl Into<String>) -> Self {
        self.classes.insert(slot, class.into());
        self
    }

    /// Replace default classes with caller classes instead of concatenating
    pub fn override_defaults(mut self, enabled: bool) -> Self {
        self.override_defaults = enabled;
        self
    }

    /// Caller class for a slot, if any
    pub fn caller_class(&self, slot: StyleSlot) -> Option<&str> {
        self.classes.get(&slot).map(String::as_str)
    }

    /// Composed class for a slot's container
    pub fn class_for(&self, slot: StyleSlot) -> String {
        let caller = self.caller_class(slot).unwrap_or("");
        if self.override_defaults {
            return caller.trim().to_string();
        }
        join_classes([slot.default_class(), caller])
    }
}

/// Whitespace-join the non-blank parts
pub(crate) fn join_classes<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
