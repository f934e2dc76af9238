//! Page field renderers
//!
//! Title and description reuse the block renderers (heading 1 and paragraph
//! slots). Publish dates render in long form, e.g. `July 13, 2023`.

use crate::models::RichTextRun;
use crate::render::block::{render_heading, render_paragraph};
use crate::render::css::{RenderOptions, StyleSlot};
use crate::render::markup::{Element, Markup};
use chrono::NaiveDate;

/// Long-form date format
pub const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

pub fn render_title(title: &[RichTextRun], options: &RenderOptions) -> Markup {
    render_heading(StyleSlot::Heading1, title, options)
}

pub fn render_description(description: &[RichTextRun], options: &RenderOptions) -> Markup {
    render_paragraph(description, options)
}

/// Render a date as `<p>Month D, YYYY</p>`; an absent date renders nothing
///
/// Only the start date is rendered. End dates and time zones are not.
pub fn render_date(date: Option<NaiveDate>, options: &RenderOptions) -> Markup {
    match date {
        Some(date) => Element::new("p")
            .class(options.class_for(StyleSlot::Date))
            .text(date.format(LONG_DATE_FORMAT).to_string())
            .render(),
        None => Markup::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_date_long_form() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 13);
        let html = render_date(date, &RenderOptions::new());
        assert_eq!(html.as_str(), "<p>July 13, 2023</p>");
    }

    #[test]
    fn test_render_date_single_digit_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5);
        let html = render_date(date, &RenderOptions::new());
        assert_eq!(html.as_str(), "<p>January 5, 2024</p>");
    }

    #[test]
    fn test_render_date_custom_class() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 13);
        let options = RenderOptions::new().with_class(StyleSlot::Date, "custom-date-class");
        let html = render_date(date, &options);
        assert_eq!(html.as_str(), "<p class=\"custom-date-class\">July 13, 2023</p>");
    }

    #[test]
    fn test_render_absent_date() {
        assert!(render_date(None, &RenderOptions::new()).is_empty());
    }

    #[test]
    fn test_render_title_as_heading() {
        let options = RenderOptions::new().with_class(StyleSlot::Heading1, "custom-title-class");
        let html = render_title(&[RichTextRun::plain("Title")], &options);
        assert_eq!(
            html.as_str(),
            "<h1 class=\"mb-4 mt-6 text-3xl font-semibold custom-title-class\"><span>Title</span></h1>"
        );
    }
}
