//! Tests for overlay/overlay_render

use super::*;
use crate::config::TooltipSettings;
use crate::content::Placeholder;
use crate::overlay::{OverlayStyle, Point};

fn visible_overlay(content: TooltipContent) -> Overlay {
    let mut overlay = Overlay::default();
    overlay.display(content);
    overlay.move_to(Point { x: 680.0, y: 70.0 });
    overlay
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
}

#[test]
fn test_escape_html_plain_text_unchanged() {
    assert_eq!(escape_html("The Prancing Pony"), "The Prancing Pony");
}

#[test]
fn test_hidden_overlay_renders_empty_container() {
    let html = render_overlay_html(&Overlay::default());

    assert!(html.starts_with("<div id=\"map-note-hover-display\""));
    assert!(html.contains("display: none;"));
    assert!(html.ends_with("\"></div>"));
}

#[test]
fn test_visible_overlay_includes_position_and_content() {
    let overlay = visible_overlay(TooltipContent::new(
        "Tavern",
        TooltipBody::Html("<p>Ale &amp; bread</p>".to_string()),
    ));

    let html = render_overlay_html(&overlay);

    assert!(html.contains("left: 680px; top: 70px;"));
    assert!(html.contains("display: block;"));
    assert!(html.contains(">Tavern</div>"));
    // Enriched HTML is trusted and inserted as-is
    assert!(html.contains("<div class=\"hover-display-content\"><p>Ale &amp; bread</p></div>"));
}

#[test]
fn test_title_is_escaped() {
    let overlay = visible_overlay(TooltipContent::placeholder(
        "<script>x</script>",
        Placeholder::NoContent,
    ));

    let html = render_overlay_html(&overlay);

    assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn test_image_body_with_caption() {
    let overlay = visible_overlay(TooltipContent::new(
        "Map",
        TooltipBody::Image {
            src: "maps/keep.png".to_string(),
            caption: Some("Ground floor".to_string()),
        },
    ));

    let html = render_overlay_html(&overlay);

    assert!(html.contains("<img src=\"maps/keep.png\""));
    assert!(html.contains("<figcaption>Ground floor</figcaption>"));
}

#[test]
fn test_image_body_without_caption() {
    let overlay = visible_overlay(TooltipContent::new(
        "Map",
        TooltipBody::Image {
            src: "a.png".to_string(),
            caption: None,
        },
    ));

    let html = render_overlay_html(&overlay);

    assert!(!html.contains("figcaption"));
}

#[test]
fn test_placeholder_body_is_emphasised() {
    let overlay = visible_overlay(TooltipContent::placeholder("Empty", Placeholder::NoPages));

    let html = render_overlay_html(&overlay);

    assert!(html.contains("<em>This entry has no pages</em>"));
}

#[test]
fn test_error_content_uses_error_accent() {
    let overlay = visible_overlay(TooltipContent::load_error());

    let html = render_overlay_html(&overlay);

    assert!(html.contains("color: #ff4444;"));
    assert!(html.contains("Error loading content"));
}

#[test]
fn test_style_reflects_settings() {
    let settings = TooltipSettings {
        max_width: 600,
        font_size: "1.2rem".to_string(),
        dark_mode: false,
        ..TooltipSettings::default()
    };
    let mut overlay = Overlay::default();
    overlay.set_style(OverlayStyle::from_settings(&settings));

    let html = render_overlay_html(&overlay);

    assert!(html.contains("max-width: 600px;"));
    assert!(html.contains("font-size: 1.2rem;"));
    assert!(html.contains("rgba(255, 255, 255, 0.95)"));
}

#[test]
fn test_dark_mode_palette_by_default() {
    let html = render_overlay_html(&Overlay::default());

    assert!(html.contains("rgba(0, 0, 0, 0.95)"));
    assert!(html.contains("max-width: 400px;"));
    assert!(html.contains("font-size: 14px;"));
}
