//! Overlay rendering
//!
//! Produces the markup for the overlay container. Enriched HTML from the
//! host is inserted verbatim; every other string is escaped.

use std::fmt::Write;

use super::overlay_state::{Overlay, Palette};
use crate::content::{TooltipBody, TooltipContent};

pub const OVERLAY_ELEMENT_ID: &str = "map-note-hover-display";

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render the whole overlay element, hidden or not
pub fn render_overlay_html(overlay: &Overlay) -> String {
    let style = overlay.style();
    let palette = style.palette();

    let mut css = format!(
        "position: fixed; z-index: 1000; background: {}; border: 2px solid {}; \
         border-radius: 5px; padding: 15px; max-width: {}px; max-height: {}px; \
         overflow-y: auto; pointer-events: none; font-size: {}; color: {}; line-height: 1.4;",
        palette.background,
        palette.border,
        style.max_width,
        style.max_height,
        escape_html(&style.font_size),
        palette.text,
    );

    if let Some(pos) = overlay.position() {
        let _ = write!(css, " left: {}px; top: {}px;", pos.x, pos.y);
    }
    css.push_str(if overlay.is_visible() {
        " display: block;"
    } else {
        " display: none;"
    });

    let inner = match overlay.content() {
        Some(content) if overlay.is_visible() => render_content(content, &palette),
        _ => String::new(),
    };

    format!(
        "<div id=\"{}\" class=\"map-note-hover-display\" style=\"{}\">{}</div>",
        OVERLAY_ELEMENT_ID, css, inner
    )
}

fn render_content(content: &TooltipContent, palette: &Palette) -> String {
    let (accent_title, accent_border) = if content.is_error() {
        (Palette::ERROR_ACCENT, Palette::ERROR_ACCENT)
    } else {
        (palette.title, palette.border)
    };

    format!(
        "<div class=\"hover-display-title\" style=\"font-weight: bold; font-size: 1.2em; \
         margin-bottom: 10px; padding-bottom: 5px; border-bottom: 1px solid {}; color: {};\">{}</div>\
         <div class=\"hover-display-content\">{}</div>",
        accent_border,
        accent_title,
        escape_html(&content.title),
        render_body(&content.body),
    )
}

fn render_body(body: &TooltipBody) -> String {
    match body {
        TooltipBody::Html(html) => html.clone(),
        TooltipBody::Image { src, caption } => {
            let mut figure = format!(
                "<figure><img src=\"{}\" style=\"max-width: 100%;\">",
                escape_html(src)
            );
            if let Some(caption) = caption.as_deref().filter(|c| !c.is_empty()) {
                let _ = write!(figure, "<figcaption>{}</figcaption>", escape_html(caption));
            }
            figure.push_str("</figure>");
            figure
        }
        TooltipBody::Placeholder(placeholder) => {
            format!("<em>{}</em>", escape_html(placeholder.message()))
        }
    }
}

#[cfg(test)]
#[path = "overlay_render_tests.rs"]
mod overlay_render_tests;
