use std::fmt;

use serde::Deserialize;

/// Identifier of a marker on the canvas
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub String);

impl MarkerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference from a marker to its journal entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(pub String);

impl DocumentRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A hoverable point of interest, owned by the host
///
/// The tooltip only reads markers. Screen position is looked up through the
/// host by `id` every time it is needed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    /// Label drawn next to the marker icon
    #[serde(default)]
    pub label: Option<String>,
    /// Journal entry this marker links to
    #[serde(default)]
    pub entry: Option<DocumentRef>,
}

impl Marker {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: MarkerId::new(id),
            label: None,
            entry: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_entry(mut self, reference: impl Into<String>) -> Self {
        self.entry = Some(DocumentRef::new(reference));
        self
    }
}

/// Journal entry made of ordered pages
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentDocument {
    pub name: String,
    /// Whether the current viewer owns the entry (reveals secrets)
    #[serde(default)]
    pub viewer_is_owner: bool,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl ContentDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            viewer_is_owner: false,
            pages: Vec::new(),
        }
    }

    pub fn owned_by_viewer(mut self) -> Self {
        self.viewer_is_owner = true;
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    /// First page in display order: lowest `sort`, ties keep stored order
    pub fn first_page(&self) -> Option<&Page> {
        self.pages.iter().min_by_key(|page| page.sort)
    }
}

/// Single journal page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(flatten)]
    pub kind: PageKind,
}

impl Page {
    pub fn text(markup: impl Into<String>) -> Self {
        Self::from_kind(PageKind::Text {
            content: Some(markup.into()),
            markdown: None,
        })
    }

    pub fn markdown(source: impl Into<String>) -> Self {
        Self::from_kind(PageKind::Text {
            content: None,
            markdown: Some(source.into()),
        })
    }

    pub fn image(src: impl Into<String>, caption: Option<&str>) -> Self {
        Self::from_kind(PageKind::Image {
            src: src.into(),
            caption: caption.map(str::to_string),
        })
    }

    pub fn unsupported() -> Self {
        Self::from_kind(PageKind::Unsupported)
    }

    pub fn with_sort(mut self, sort: i64) -> Self {
        self.sort = sort;
        self
    }

    fn from_kind(kind: PageKind) -> Self {
        Self {
            name: String::new(),
            sort: 0,
            kind,
        }
    }
}

/// Page payload, tagged by the `type` field
///
/// Any type tag this crate does not know (pdf, video, ...) lands in
/// `Unsupported` so newer documents still deserialize.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageKind {
    Text {
        /// Stored HTML
        #[serde(default)]
        content: Option<String>,
        /// Markdown source, used when there is no HTML
        #[serde(default)]
        markdown: Option<String>,
    },
    Image {
        src: String,
        #[serde(default)]
        caption: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl PageKind {
    /// Markup handed to enrichment for text pages
    pub fn text_markup(&self) -> Option<&str> {
        match self {
            PageKind::Text { content, markdown } => content
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .or_else(|| markdown.as_deref().filter(|m| !m.trim().is_empty())),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod document_tests;
