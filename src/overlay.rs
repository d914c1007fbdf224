//! Overlay module
//!
//! The floating panel itself: its content and style, where it goes on
//! screen, and the HTML the host inserts into the page.

mod overlay_render;
mod overlay_state;
mod placement;

pub use overlay_render::{OVERLAY_ELEMENT_ID, escape_html, render_overlay_html};
pub use overlay_state::{MAX_OVERLAY_HEIGHT, Overlay, OverlayStyle, Palette};
pub use placement::{ANCHOR_MARGIN, MIN_VIEWPORT_INSET, Point, Size, place_near_anchor};
