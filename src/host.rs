//! Host service boundary
//!
//! The tooltip never touches document storage, HTML sanitisation, settings
//! persistence or the screen directly. Everything it needs from the host
//! application goes through the traits in this module.

use std::future::Future;

use thiserror::Error;

use crate::config::SettingsStore;
use crate::content::{ContentDocument, DocumentRef, MarkerId};
use crate::overlay::{Overlay, Point, Size};

/// Failures reported by host services
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host knows the reference but could not load it
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Rich text enrichment rejected the markup
    #[error("Enrichment failed: {0}")]
    Enrichment(String),

    /// Any other backend failure
    #[error("Host backend error: {0}")]
    Backend(String),
}

/// Options passed along with markup to the enrichment service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichOptions {
    /// Whether secret blocks are revealed to the viewer
    pub secrets: bool,
    /// Document that relative links resolve against
    pub relative_to: DocumentRef,
}

/// Document lookup and rich text enrichment
///
/// Both operations may suspend. Returned futures must be `Send` because
/// resolution runs on a spawned tokio task.
pub trait ContentHost: Send + Sync + 'static {
    /// Resolve a content reference.
    ///
    /// `Ok(None)` means the reference points at nothing; `Err` means the
    /// lookup itself failed.
    fn resolve_document(
        &self,
        reference: &DocumentRef,
    ) -> impl Future<Output = Result<Option<ContentDocument>, HostError>> + Send;

    /// Turn raw page markup into sanitised, cross-linked HTML
    fn enrich_html(
        &self,
        markup: &str,
        options: &EnrichOptions,
    ) -> impl Future<Output = Result<String, HostError>> + Send;
}

/// Screen geometry and hover state owned by the host canvas
pub trait CanvasHost {
    /// Marker anchor in viewport coordinates, `None` once the marker is gone
    fn screen_position(&self, marker: &MarkerId) -> Option<Point>;

    /// Whether the pointer is still over the marker
    fn is_hovered(&self, marker: &MarkerId) -> bool;

    fn viewport(&self) -> Size;

    /// Rendered size of the overlay with its current content and style
    fn measure(&self, overlay: &Overlay) -> Size;
}

/// Everything the controller needs from its host
pub trait TooltipHost: ContentHost + CanvasHost + SettingsStore {}

impl<T> TooltipHost for T where T: ContentHost + CanvasHost + SettingsStore {}
