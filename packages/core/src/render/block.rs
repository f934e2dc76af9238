//! Block Renderer
//!
//! Dispatches on `BlockKind` and produces one markup fragment per block.
//! List items recurse into their children and, for numbered lists, into the
//! siblings the tree builder merged into them.
//!
//! Rendering never fails. A block of unknown kind yields the `Error`
//! sentinel fragment and rendering of the rest of the document continues.

use crate::models::{Block, BlockKind, Icon, Media, MediaSourceKind, RichTextRun};
use crate::render::css::{join_classes, RenderOptions, StyleSlot};
use crate::render::markup::{Element, Markup};
use crate::render::rich_text::render_rich_text;

/// Fragment emitted for blocks that cannot be rendered
pub const ERROR_SENTINEL: &str = "Error";

/// Render one block
///
/// # Examples
///
/// ```rust
/// use notion_render_core::models::Block;
/// use notion_render_core::render::{render_block, RenderOptions};
/// use serde_json::json;
///
/// let block = Block::from_raw(json!({
///     "id": "b1",
///     "type": "paragraph",
///     "paragraph": { "rich_text": [{ "plain_text": "Hi" }] }
/// }));
///
/// assert_eq!(render_block(&block, &RenderOptions::new()).as_str(), "<p><span>Hi</span></p>");
/// ```
pub fn render_block(block: &Block, options: &RenderOptions) -> Markup {
    match block.kind() {
        BlockKind::Paragraph => render_paragraph(&block.rich_text(), options),
        BlockKind::Heading1 => render_heading(StyleSlot::Heading1, &block.rich_text(), options),
        BlockKind::Heading2 => render_heading(StyleSlot::Heading2, &block.rich_text(), options),
        BlockKind::Heading3 => render_heading(StyleSlot::Heading3, &block.rich_text(), options),
        BlockKind::BulletedListItem => render_bulleted_list_item(block, options),
        BlockKind::NumberedListItem => render_numbered_list_item(block, options),
        BlockKind::Quote => render_quote(&block.rich_text(), options),
        BlockKind::Callout => render_callout(&block.rich_text(), block.icon().as_ref(), options),
        BlockKind::Code => render_code(&block.rich_text(), block.language(), options),
        BlockKind::Image => render_image(&block.media(), options),
        BlockKind::Video => render_video(&block.media(), options),
        BlockKind::TableOfContents => render_table_of_contents(),
        BlockKind::Unknown(tag) => {
            tracing::warn!(
                "Rendering error sentinel for block {} with unsupported type '{}'",
                block.id(),
                tag
            );
            Markup::trusted(ERROR_SENTINEL)
        }
    }
}

/// Render each block in order
pub fn render_blocks(blocks: &[Block], options: &RenderOptions) -> Vec<Markup> {
    blocks
        .iter()
        .map(|block| render_block(block, options))
        .collect()
}

pub fn render_paragraph(runs: &[RichTextRun], options: &RenderOptions) -> Markup {
    Element::new("p")
        .class(options.class_for(StyleSlot::Paragraph))
        .child(render_rich_text(runs, None))
        .render()
}

/// Render a heading; `slot` selects the level
pub fn render_heading(slot: StyleSlot, runs: &[RichTextRun], options: &RenderOptions) -> Markup {
    let tag = match slot {
        StyleSlot::Heading2 => "h2",
        StyleSlot::Heading3 => "h3",
        _ => "h1",
    };

    Element::new(tag)
        .class(options.class_for(slot))
        .child(render_rich_text(runs, None))
        .render()
}

pub fn render_quote(runs: &[RichTextRun], options: &RenderOptions) -> Markup {
    let paragraph = Element::new("p")
        .class(options.class_for(StyleSlot::Quote))
        .child(render_rich_text(runs, None))
        .render();

    Element::new("div")
        .class(options.caller_class(StyleSlot::Quote).unwrap_or(""))
        .child(Element::new("cite").child(paragraph).render())
        .render()
}

pub fn render_callout(runs: &[RichTextRun], icon: Option<&Icon>, options: &RenderOptions) -> Markup {
    Element::new("div")
        .class(options.class_for(StyleSlot::Callout))
        .child(render_icon(icon))
        .child(Element::new("div").child(render_rich_text(runs, None)).render())
        .render()
}

fn render_icon(icon: Option<&Icon>) -> Markup {
    let span = Element::new("span").class("mr-4");
    match icon {
        Some(Icon::Emoji(emoji)) => span.text(emoji.as_str()).render(),
        Some(Icon::External(url)) | Some(Icon::File(url)) => span
            .child(Element::new("img").attr("src", url.as_str()).attr("alt", "").render())
            .render(),
        None => span.render(),
    }
}

/// Render a code block for client-side highlighting
///
/// The language class is `language-{lang}` with spaces replaced by `-`, so
/// `plain text` becomes `language-plain-text` and stays a single class token.
pub fn render_code(runs: &[RichTextRun], language: Option<&str>, options: &RenderOptions) -> Markup {
    // TODO: render code captions once the caption property is carried through
    let language_class = language
        .map(|language| format!("language-{}", language.replace(' ', "-")))
        .unwrap_or_default();
    let pre = Element::new("pre")
        .class(join_classes([
            options.class_for(StyleSlot::Code).as_str(),
            language_class.as_str(),
        ]))
        .child(render_rich_text(runs, None))
        .render();

    Element::new("div")
        .attr("data-controller", "highlight")
        .child(
            Element::new("div")
                .attr("data-highlight-target", "source")
                .child(pre)
                .render(),
        )
        .render()
}

pub fn render_image(media: &Media, options: &RenderOptions) -> Markup {
    Element::new("figure")
        .class(options.class_for(StyleSlot::Image))
        .child(
            Element::new("img")
                .attr_opt("src", media.url.as_deref())
                .attr("alt", "")
                .render(),
        )
        .child(render_caption(&media.caption))
        .render()
}

pub fn render_video(media: &Media, options: &RenderOptions) -> Markup {
    let class = options.class_for(StyleSlot::Video);
    let player = match media.source {
        Some(MediaSourceKind::File) => Element::new("video")
            .attr_opt("src", media.url.as_deref())
            .flag("controls")
            .class(class)
            .render(),
        Some(MediaSourceKind::External) => Element::new("iframe")
            .attr_opt("src", media.url.as_deref())
            .flag("allowfullscreen")
            .class(class)
            .render(),
        None => Markup::empty(),
    };

    Element::new("figure")
        .class(options.caller_class(StyleSlot::Video).unwrap_or(""))
        .child(player)
        .child(render_caption(&media.caption))
        .render()
}

fn render_caption(caption: &[RichTextRun]) -> Markup {
    Element::new("figcaption")
        .child(render_rich_text(caption, None))
        .render()
}

/// Table of contents blocks render nothing yet
pub fn render_table_of_contents() -> Markup {
    Markup::empty()
}

/// `<ul>` with the item, then each child as a nested bulleted list
///
/// Bulleted items never carry siblings; consecutive bulleted items stay
/// separate lists.
pub fn render_bulleted_list_item(block: &Block, options: &RenderOptions) -> Markup {
    let nested = block
        .children()
        .iter()
        .map(|child| render_bulleted_list_item(child, options));

    Element::new("ul")
        .class(options.class_for(StyleSlot::BulletedListItem))
        .child(list_item(block, StyleSlot::BulletedListItem, options))
        .children(nested)
        .render()
}

/// `<ol>` with the item, its nested children, then each merged sibling
///
/// Siblings share the caller's options. Nested child lists render with the
/// default options, so the caller's classes stop at the first level.
pub fn render_numbered_list_item(block: &Block, options: &RenderOptions) -> Markup {
    Element::new("ol")
        .class(options.class_for(StyleSlot::NumberedListItem))
        .child(numbered_items(block, options))
        .render()
}

fn numbered_items(block: &Block, options: &RenderOptions) -> Markup {
    let mut content = list_item(block, StyleSlot::NumberedListItem, options);

    let nested = RenderOptions::new();
    for child in block.children() {
        content.push(&render_numbered_list_item(child, &nested));
    }
    for sibling in block.siblings() {
        content.push(&numbered_items(sibling, options));
    }

    content
}

fn list_item(block: &Block, slot: StyleSlot, options: &RenderOptions) -> Markup {
    Element::new("li")
        .class(options.caller_class(slot).unwrap_or(""))
        .child(render_rich_text(&block.rich_text(), None))
        .render()
}
