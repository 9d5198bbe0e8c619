//! Newsdoc - content-to-article JSON export engine
//!
//! This library converts parsed content fragments into a single article
//! JSON document for a third-party publishing API. Named specs hold JSON
//! skeletons with `#token#` placeholders, a theme supplies concrete values,
//! and the build step substitutes tokens, registers deduplicated
//! style/layout entries, and assembles the ordered component tree.
//!
//! # Example
//!
//! ```rust
//! use newsdoc::{export, Fragment};
//!
//! let json = export(&[Fragment::Slug {
//!     markup: "EXCLUSIVE".into(),
//!     alignment: None,
//! }])
//! .unwrap();
//!
//! assert!(json.contains("componentTextStyles"));
//! ```

pub mod component;
pub mod document;
pub mod error;
pub mod settings;
pub mod spec;
pub mod style;
pub mod theme;

pub use component::{Fragment, TextAlignment};
pub use document::{DocumentError, DocumentMetadata};
pub use error::BuildError;
pub use settings::{ContentFormat, ExportSettings};
pub use style::{StyleCategory, StyleTable};
pub use theme::{Theme, ThemeError};

use component::builder::{self, BuildContext};
use component::{defaults, pair_cover_captions};
use document::DocumentAssembler;
use thiserror::Error;

/// Errors that can occur during the export pipeline
#[derive(Debug, Error)]
pub enum ExportError {
    /// Error while building a component from a fragment
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// Error while assembling or serializing the document
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
}

/// Configuration for a complete export run
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// Theme supplying style and layout values
    pub theme: Theme,
    /// Export-time options
    pub settings: ExportSettings,
    /// Document-level identity fields
    pub metadata: DocumentMetadata,
}

impl ExportConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the export settings
    pub fn with_settings(mut self, settings: ExportSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the document metadata
    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Export fragments to an article JSON document with default configuration
///
/// This is the main entry point for the library. Fragments are processed
/// strictly in order; a build failure for any fragment aborts the run.
pub fn export(fragments: &[Fragment]) -> Result<String, ExportError> {
    export_with_config(fragments, &ExportConfig::default())
}

/// Export fragments with custom configuration
///
/// # Example
///
/// ```rust
/// use newsdoc::{export_with_config, DocumentMetadata, ExportConfig, Fragment};
///
/// let config = ExportConfig::new()
///     .with_metadata(DocumentMetadata::new().with_identifier("post-42"));
///
/// let json = export_with_config(
///     &[Fragment::Body { markup: "<p>Hello</p>".into(), alignment: None }],
///     &config,
/// )
/// .unwrap();
///
/// assert!(json.contains("\"identifier\":\"post-42\""));
/// ```
pub fn export_with_config(
    fragments: &[Fragment],
    config: &ExportConfig,
) -> Result<String, ExportError> {
    // The catalog and theme are read-only for the rest of the run and could
    // be shared across runs; the style table and assembler are per-run.
    let mut catalog = defaults::default_catalog();
    catalog.apply_theme(&config.theme);

    let fragments = pair_cover_captions(fragments);

    let mut styles = StyleTable::new();
    let mut assembler = DocumentAssembler::new();
    {
        let mut ctx = BuildContext {
            theme: &config.theme,
            settings: &config.settings,
            catalog: &catalog,
            styles: &mut styles,
            assembler: &mut assembler,
        };
        for fragment in &fragments {
            builder::build(fragment, &mut ctx)?;
        }
    }

    assembler.assemble()?;
    let json = assembler.serialize(
        &config.theme,
        &config.metadata,
        styles,
        config.settings.pretty,
    )?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_simple_slug() {
        let json = export(&[Fragment::Slug {
            markup: "EXCLUSIVE".into(),
            alignment: None,
        }])
        .unwrap();

        assert!(json.contains("\"role\":\"heading\""));
        assert!(json.contains("\"text\":\"EXCLUSIVE\""));
        assert!(json.contains("componentLayouts"));
    }

    #[test]
    fn test_export_empty_run() {
        let json = export(&[]).unwrap();
        assert!(json.contains("\"components\":[]"));
    }

    #[test]
    fn test_export_skips_empty_fragments() {
        let json = export(&[
            Fragment::Body {
                markup: "<p></p>".into(),
                alignment: None,
            },
            Fragment::Body {
                markup: "<p>Kept</p>".into(),
                alignment: None,
            },
        ])
        .unwrap();

        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["components"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_export_pretty_output() {
        let config =
            ExportConfig::new().with_settings(ExportSettings::new().with_pretty(true));
        let json = export_with_config(
            &[Fragment::Body {
                markup: "<p>Hello</p>".into(),
                alignment: None,
            }],
            &config,
        )
        .unwrap();

        assert!(json.contains("\"role\": \"body\""));
    }

    #[test]
    fn test_export_with_theme_override() {
        let theme = Theme::from_str(
            r##"
[json_templates.slug.json]
role = "heading"
text = "#text#"
identifier = "slug"
"##,
        )
        .unwrap();
        let config = ExportConfig::new().with_theme(theme);

        let json = export_with_config(
            &[Fragment::Slug {
                markup: "EXCLUSIVE".into(),
                alignment: None,
            }],
            &config,
        )
        .unwrap();

        assert!(json.contains("\"identifier\":\"slug\""));
    }
}
