//! Content resolution
//!
//! Walks the fallback chain for a marker's journal entry. Exactly one branch
//! produces the result; host failures become the error content and are
//! logged here so they never reach the caller.

use super::document::{ContentDocument, DocumentRef, Marker, PageKind};
use crate::host::{ContentHost, EnrichOptions, HostError};

/// Title used when the marker has no label and its entry cannot be found
pub const UNKNOWN_ENTRY_TITLE: &str = "Unknown entry";

const ERROR_TITLE: &str = "Error";

/// Fixed messages shown instead of page content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Entry missing, or its first page has nothing to show
    NoContent,
    /// Entry exists but has no pages
    NoPages,
    /// First page has a type the tooltip cannot render
    UnsupportedPage,
    /// Lookup or enrichment failed
    LoadError,
}

impl Placeholder {
    pub fn message(self) -> &'static str {
        match self {
            Placeholder::NoContent => "No content available",
            Placeholder::NoPages => "This entry has no pages",
            Placeholder::UnsupportedPage => "This page type is not supported",
            Placeholder::LoadError => "Error loading content",
        }
    }
}

/// Body of the tooltip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TooltipBody {
    /// Enriched HTML from the host, already sanitised
    Html(String),
    Image {
        src: String,
        caption: Option<String>,
    },
    Placeholder(Placeholder),
}

/// Title and body ready for the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub title: String,
    pub body: TooltipBody,
}

impl TooltipContent {
    pub fn new(title: impl Into<String>, body: TooltipBody) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }

    pub fn placeholder(title: impl Into<String>, placeholder: Placeholder) -> Self {
        Self::new(title, TooltipBody::Placeholder(placeholder))
    }

    /// Content shown when the host failed to deliver the entry
    pub fn load_error() -> Self {
        Self::placeholder(ERROR_TITLE, Placeholder::LoadError)
    }

    pub fn is_error(&self) -> bool {
        self.body == TooltipBody::Placeholder(Placeholder::LoadError)
    }
}

/// Resolve what the tooltip for `marker` should display.
///
/// Never fails: host errors are logged and rendered as [`TooltipContent::load_error`].
pub async fn resolve_content<H: ContentHost>(host: &H, marker: &Marker) -> TooltipContent {
    let Some(reference) = marker.entry.as_ref() else {
        return unknown_entry(marker);
    };

    match resolve_reference(host, marker, reference).await {
        Ok(content) => content,
        Err(e) => {
            log::error!(
                "Error loading journal entry {} for marker {}: {}",
                reference,
                marker.id,
                e
            );
            TooltipContent::load_error()
        }
    }
}

async fn resolve_reference<H: ContentHost>(
    host: &H,
    marker: &Marker,
    reference: &DocumentRef,
) -> Result<TooltipContent, HostError> {
    let Some(document) = host.resolve_document(reference).await? else {
        log::debug!("Journal entry {} not found for marker {}", reference, marker.id);
        return Ok(unknown_entry(marker));
    };

    let body = render_first_page(host, &document, reference).await?;
    Ok(TooltipContent::new(document.name, body))
}

async fn render_first_page<H: ContentHost>(
    host: &H,
    document: &ContentDocument,
    reference: &DocumentRef,
) -> Result<TooltipBody, HostError> {
    let Some(page) = document.first_page() else {
        return Ok(TooltipBody::Placeholder(Placeholder::NoPages));
    };

    match &page.kind {
        PageKind::Text { .. } => {
            let Some(markup) = page.kind.text_markup() else {
                return Ok(TooltipBody::Placeholder(Placeholder::NoContent));
            };
            let options = EnrichOptions {
                secrets: document.viewer_is_owner,
                relative_to: reference.clone(),
            };
            let html = host.enrich_html(markup, &options).await?;
            Ok(TooltipBody::Html(html))
        }
        PageKind::Image { src, caption } => Ok(TooltipBody::Image {
            src: src.clone(),
            caption: caption.clone(),
        }),
        PageKind::Unsupported => Ok(TooltipBody::Placeholder(Placeholder::UnsupportedPage)),
    }
}

fn unknown_entry(marker: &Marker) -> TooltipContent {
    let title = marker
        .label
        .clone()
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_ENTRY_TITLE.to_string());
    TooltipContent::placeholder(title, Placeholder::NoContent)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod resolver_tests;
