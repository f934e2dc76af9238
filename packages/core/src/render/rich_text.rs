//! RichText Formatter
//!
//! Converts a run sequence into inline markup. Each run becomes a `<span>`, or
//! an `<a class="link ...">` when it carries an `href`. Run fragments are
//! concatenated in order with no separator.

use crate::models::{Annotations, RichTextRun, DEFAULT_COLOR};
use crate::render::css::join_classes;
use crate::render::markup::{Element, Markup};

/// Class string for an annotation set
///
/// Order: bold, italic, strikethrough, underline, code, color, then unknown
/// toggles by key.
///
/// # Examples
///
/// ```rust
/// use notion_render_core::models::Annotations;
/// use notion_render_core::render::annotation_to_css_class;
///
/// let annotations = Annotations { bold: true, color: "red".to_string(), ..Annotations::default() };
/// assert_eq!(annotation_to_css_class(&annotations), "font-bold text-red-600");
/// ```
pub fn annotation_to_css_class(annotations: &Annotations) -> String {
    let mut classes: Vec<String> = Vec::new();

    if annotations.bold {
        classes.push("font-bold".to_string());
    }
    if annotations.italic {
        classes.push("italic".to_string());
    }
    if annotations.strikethrough {
        classes.push("line-through".to_string());
    }
    if annotations.underline {
        classes.push("underline".to_string());
    }
    if annotations.code {
        classes.push("inline-code".to_string());
    }
    if !annotations.color.is_empty() && annotations.color != DEFAULT_COLOR {
        classes.push(format!("text-{}-600", annotations.color));
    }
    classes.extend(annotations.extra_toggles().map(str::to_string));

    classes.join(" ")
}

/// Render a run sequence; `extra_class` is added to every run element
pub fn render_rich_text(runs: &[RichTextRun], extra_class: Option<&str>) -> Markup {
    runs.iter().map(|run| render_run(run, extra_class)).collect()
}

fn render_run(run: &RichTextRun, extra_class: Option<&str>) -> Markup {
    let classes = annotation_to_css_class(&run.annotations);
    let extra = extra_class.unwrap_or("");

    match &run.href {
        Some(href) => Element::new("a")
            .attr("href", href.as_str())
            .class(join_classes(["link", classes.as_str(), extra]))
            .text(run.plain_text.as_str())
            .render(),
        None => Element::new("span")
            .class(join_classes([classes.as_str(), extra]))
            .text(run.plain_text.as_str())
            .render(),
    }
}
