//! Data Models
//!
//! This module contains the typed views over raw Notion API records:
//!
//! - `RichTextRun` / `Annotations` - Styled text spans
//! - `Block` - One content block with its nested children and merged siblings
//! - `Page` - Page metadata with derived article fields
//! - `Document` - A page paired with its block forest
//!
//! Raw records are nested JSON maps. Every accessor reads its keys
//! defensively: absent keys yield empty or absent values, never an error.

mod block;
mod document;
mod page;
mod rich_text;
pub mod time;


pub use block::{Block, BlockKind, Icon, Media, MediaSourceKind, ParentRef};
pub use document::Document;
pub use page::Page;
pub use rich_text::{Annotations, RichTextRun, DEFAULT_COLOR};
