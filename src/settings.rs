//! Export-time settings
//!
//! A flat set of options fixed at the start of an export run and immutable
//! thereafter.

/// How fragment text content is encoded in the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFormat {
    /// Rich markup: text nodes carry a `format: "html"` marker
    #[default]
    Html,
    /// Plain text with markdown-style markers, no format field
    Markdown,
}

impl ContentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentFormat::Html => "html",
            ContentFormat::Markdown => "markdown",
        }
    }
}

/// Options for a single export run
#[derive(Debug, Clone, Default)]
pub struct ExportSettings {
    /// Text content encoding mode
    pub content_format: ContentFormat,
    /// Whether to format the output document with indentation
    pub pretty: bool,
}

impl ExportSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text content format
    pub fn with_content_format(mut self, format: ContentFormat) -> Self {
        self.content_format = format;
        self
    }

    /// Enable or disable pretty-printed output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
