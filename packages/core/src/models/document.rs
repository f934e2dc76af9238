//! Document Assembler
//!
//! A `Document` pairs a page's metadata with its rendered-ready block forest.
//! It is the artifact handed to callers and is immutable once assembled.

use crate::models::{Block, Page};
use crate::render::{self, Markup, RenderOptions};
use serde::Serialize;

/// Page metadata plus its top-level blocks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    metadata: Page,
    blocks: Vec<Block>,
}

impl Document {
    /// Pair a page with its block forest
    pub fn assemble(metadata: Page, blocks: Vec<Block>) -> Self {
        Self { metadata, blocks }
    }

    pub fn metadata(&self) -> &Page {
        &self.metadata
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Title rendered as a first-level heading
    pub fn formatted_title(&self, options: &RenderOptions) -> Markup {
        render::render_title(self.metadata.title(), options)
    }

    /// Description rendered as a paragraph
    pub fn formatted_description(&self, options: &RenderOptions) -> Markup {
        render::render_description(self.metadata.description(), options)
    }

    /// Publish date in long form; empty when the page has none
    pub fn formatted_published_at(&self, options: &RenderOptions) -> Markup {
        render::render_date(self.metadata.published_at(), options)
    }

    /// One fragment per top-level block, in order
    pub fn format_blocks(&self, options: &RenderOptions) -> Vec<Markup> {
        render::render_blocks(&self.blocks, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::StyleSlot;
    use serde_json::json;

    fn page() -> Page {
        Page::from_raw(json!({
            "id": "page-1",
            "properties": {
                "name": { "title": [{ "plain_text": "Title", "annotations": { "bold": true } }] },
                "description": { "rich_text": [{ "plain_text": "Summary" }] },
                "published": { "date": { "start": "2023-07-13" } }
            }
        }))
    }

    fn blocks() -> Vec<Block> {
        vec![
            Block::from_raw(json!({
                "id": "b1",
                "type": "heading_2",
                "heading_2": { "rich_text": [{ "plain_text": "Intro" }] }
            })),
            Block::from_raw(json!({ "id": "b2", "type": "unsupported" })),
            Block::from_raw(json!({
                "id": "b3",
                "type": "paragraph",
                "paragraph": { "rich_text": [{ "plain_text": "Body" }] }
            })),
        ]
    }

    #[test]
    fn test_formatted_title() {
        let document = Document::assemble(page(), Vec::new());
        let options = RenderOptions::new().with_class(StyleSlot::Heading1, "custom-title-class");

        assert_eq!(
            document.formatted_title(&options).as_str(),
            "<h1 class=\"mb-4 mt-6 text-3xl font-semibold custom-title-class\">\
             <span class=\"font-bold\">Title</span></h1>"
        );
    }

    #[test]
    fn test_formatted_description_and_date() {
        let document = Document::assemble(page(), Vec::new());
        let options = RenderOptions::new();

        assert_eq!(
            document.formatted_description(&options).as_str(),
            "<p><span>Summary</span></p>"
        );
        assert_eq!(
            document.formatted_published_at(&options).as_str(),
            "<p>July 13, 2023</p>"
        );
    }

    #[test]
    fn test_format_blocks_keeps_order_and_sentinel() {
        let document = Document::assemble(page(), blocks());
        let fragments = document.format_blocks(&RenderOptions::new());

        let rendered: Vec<&str> = fragments.iter().map(Markup::as_str).collect();
        assert_eq!(
            rendered,
            vec![
                "<h2 class=\"mb-4 mt-6 text-2xl font-semibold\"><span>Intro</span></h2>",
                "Error",
                "<p><span>Body</span></p>",
            ]
        );
    }

    #[test]
    fn test_document_serializes_to_json() {
        let document = Document::assemble(page(), blocks());
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value["metadata"]["id"], "page-1");
        assert_eq!(value["blocks"][0]["kind"], "heading_2");
        assert_eq!(value["blocks"][1]["kind"], "unsupported");
        assert_eq!(value["metadata"]["published_at"], "2023-07-13");
    }
}
