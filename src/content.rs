//! Content module
//!
//! Markers, the journal documents they point at, and the fallback chain that
//! turns a document into something the overlay can display.

mod document;
mod resolver;

pub use document::{ContentDocument, DocumentRef, Marker, MarkerId, Page, PageKind};
pub use resolver::{Placeholder, TooltipBody, TooltipContent, UNKNOWN_ENTRY_TITLE, resolve_content};
