//! Final document tree and metadata

pub mod assembler;

pub use assembler::{DocumentAssembler, DocumentError, FORMAT_VERSION};

/// Document-level identity fields emitted at the top of the output
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    /// Stable identifier of the exported entry
    pub identifier: String,
    /// Optional display title
    pub title: Option<String>,
    /// BCP 47 language tag
    pub language: String,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            identifier: "article".to_string(),
            title: None,
            language: "en".to_string(),
        }
    }
}

impl DocumentMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}
