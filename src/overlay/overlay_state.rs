use super::placement::Point;
use crate::config::TooltipSettings;
use crate::content::TooltipContent;

/// Overlay never grows taller than this; longer entries scroll
pub const MAX_OVERLAY_HEIGHT: u32 = 500;

/// Colour scheme for the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub title: &'static str,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: "rgba(0, 0, 0, 0.95)",
        border: "#7a7971",
        text: "#f0f0e0",
        title: "#ffd700",
    };

    pub const LIGHT: Palette = Palette {
        background: "rgba(255, 255, 255, 0.95)",
        border: "#c9c7b8",
        text: "#191813",
        title: "#825000",
    };

    /// Title and underline colour for error content
    pub const ERROR_ACCENT: &'static str = "#ff4444";

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::DARK } else { Self::LIGHT }
    }
}

/// Style derived from settings, re-applied on every show
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub font_size: String,
    /// Width constraint in pixels
    pub max_width: u32,
    pub max_height: u32,
    pub dark_mode: bool,
}

impl OverlayStyle {
    pub fn from_settings(settings: &TooltipSettings) -> Self {
        Self {
            font_size: settings.font_size.clone(),
            max_width: settings.max_width,
            max_height: MAX_OVERLAY_HEIGHT,
            dark_mode: settings.dark_mode,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.dark_mode)
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from_settings(&TooltipSettings::default())
    }
}

/// The single floating panel, created once per session and reused
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    content: Option<TooltipContent>,
    style: OverlayStyle,
    position: Option<Point>,
    visible: bool,
}

impl Overlay {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            content: None,
            style,
            position: None,
            visible: false,
        }
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_style(&mut self, style: OverlayStyle) {
        self.style = style;
    }

    /// Replace the content and make the overlay visible
    pub fn display(&mut self, content: TooltipContent) {
        self.content = Some(content);
        self.visible = true;
    }

    pub fn move_to(&mut self, position: Point) {
        self.position = Some(position);
    }

    /// Collapse to the empty, invisible state
    pub fn clear(&mut self) {
        self.content = None;
        self.position = None;
        self.visible = false;
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(OverlayStyle::default())
    }
}
