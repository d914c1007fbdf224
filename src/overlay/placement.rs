use serde::Deserialize;

/// Gap between the marker anchor and the overlay corner
pub const ANCHOR_MARGIN: f64 = 20.0;

/// Minimum distance kept from the top and left viewport edges
pub const MIN_VIEWPORT_INSET: f64 = 10.0;

/// Viewport coordinates in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Top-left corner for an overlay of `size` shown next to `anchor`.
///
/// Starts down-right of the anchor. Flips left when the right edge would
/// overflow and above when the bottom edge would, judged on the unflipped
/// candidate. The result is clamped to [`MIN_VIEWPORT_INSET`] last, so a
/// flip never pushes the overlay off the top or left edge.
pub fn place_near_anchor(anchor: Point, size: Size, viewport: Size, margin: f64) -> Point {
    let mut x = anchor.x + margin;
    let mut y = anchor.y + margin;

    if x + size.width > viewport.width {
        x = anchor.x - size.width - margin;
    }

    if y + size.height > viewport.height {
        y = anchor.y - size.height - margin;
    }

    Point {
        x: x.max(MIN_VIEWPORT_INSET),
        y: y.max(MIN_VIEWPORT_INSET),
    }
}

#[cfg(test)]
#[path = "placement_tests.rs"]
mod placement_tests;
