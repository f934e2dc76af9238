//! Rendering
//!
//! Turns the block forest and page fields into HTML fragments:
//!
//! - [`markup`] - Element builder with automatic escaping
//! - [`css`] - Style slots, default classes and caller options
//! - [`rich_text`] - Rich text run formatter
//! - [`block`] - Per-kind block renderer
//! - [`page`] - Title, description and publish date renderers
//!
//! Rendering is pure: every fetch already happened while building the tree.

pub mod block;
pub mod css;
pub mod markup;
pub mod page;
pub mod rich_text;


pub use block::{render_block, render_blocks, ERROR_SENTINEL};
pub use css::{RenderOptions, StyleSlot};
pub use markup::{Element, Markup};
pub use page::{render_date, render_description, render_title};
pub use rich_text::{annotation_to_css_class, render_rich_text};
