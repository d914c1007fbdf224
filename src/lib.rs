//! Hover tooltips for map markers
//!
//! A single reusable overlay shows the first page of the journal entry a
//! marker links to, after a short hover delay, positioned next to the marker
//! and kept inside the viewport. The embedding application supplies content,
//! geometry and settings through the traits in [`host`].

pub mod config;
pub mod content;
pub mod error;
pub mod host;
pub mod overlay;
pub mod replay;
pub mod tooltip;


pub use error::MarkerHoverError;
pub use host::TooltipHost;
pub use tooltip::{HoverTooltip, TooltipPhase};
