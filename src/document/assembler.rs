//! Document assembly and serialization
//!
//! Collects built component nodes in encounter order, pins the cover ahead
//! of everything else, and serializes the finished tree together with the
//! style/layout tables and theme-derived document settings. Field names and
//! nesting of the output are the compatibility surface with the publishing
//! API and must not drift.

use std::fmt;

use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::document::DocumentMetadata;
use crate::style::{StyleCategory, StyleTable};
use crate::theme::Theme;

/// Version tag of the target document format
pub const FORMAT_VERSION: &str = "1.7";

/// Assembly progresses strictly INIT -> BUILDING -> ASSEMBLED -> SERIALIZED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Init,
    Building,
    Assembled,
    Serialized,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Init => "INIT",
            Phase::Building => "BUILDING",
            Phase::Assembled => "ASSEMBLED",
            Phase::Serialized => "SERIALIZED",
        })
    }
}

/// Errors raised by the assembler
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("{operation} requires phase {expected}, current phase is {actual}")]
    InvalidPhase {
        operation: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// A component references a style or layout name missing from the table
    #[error("dangling {category} reference '{name}' in component tree")]
    DanglingReference {
        category: &'static str,
        name: String,
    },

    #[error("document serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-run, exclusively owned accumulator for the output component tree
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    phase: Phase,
    cover: Option<Value>,
    components: Vec<Value>,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level component node in encounter order
    pub fn push(&mut self, node: Value) -> Result<(), DocumentError> {
        self.enter_building("push")?;
        self.components.push(node);
        Ok(())
    }

    /// Set the cover node, which is pinned ahead of all other components
    /// at assembly time. A later cover replaces an earlier one.
    pub fn set_cover(&mut self, node: Value) -> Result<(), DocumentError> {
        self.enter_building("set_cover")?;
        if self.cover.is_some() {
            warn!("replacing previously set cover component");
        }
        self.cover = Some(node);
        Ok(())
    }

    /// Freeze the component tree. A run that emitted no nodes assembles
    /// directly from INIT into an empty tree.
    pub fn assemble(&mut self) -> Result<(), DocumentError> {
        match self.phase {
            Phase::Init | Phase::Building => {
                if let Some(cover) = self.cover.take() {
                    self.components.insert(0, cover);
                }
                self.phase = Phase::Assembled;
                Ok(())
            }
            other => Err(DocumentError::InvalidPhase {
                operation: "assemble",
                expected: "INIT or BUILDING",
                actual: other.to_string(),
            }),
        }
    }

    /// The assembled tree, for inspection after `assemble`
    pub fn components(&self) -> &[Value] {
        &self.components
    }

    /// Serialize the assembled tree plus the style table partitions and
    /// theme-derived document settings into the final JSON document.
    /// Terminal: the assembler cannot be reused afterwards.
    pub fn serialize(
        &mut self,
        theme: &Theme,
        metadata: &DocumentMetadata,
        styles: StyleTable,
        pretty: bool,
    ) -> Result<String, DocumentError> {
        if self.phase != Phase::Assembled {
            return Err(DocumentError::InvalidPhase {
                operation: "serialize",
                expected: "ASSEMBLED",
                actual: self.phase.to_string(),
            });
        }

        check_references(&self.components, &styles)?;

        let mut doc = Map::new();
        doc.insert("version".into(), Value::from(FORMAT_VERSION));
        doc.insert("identifier".into(), Value::from(metadata.identifier.as_str()));
        doc.insert("language".into(), Value::from(metadata.language.as_str()));
        if let Some(title) = &metadata.title {
            doc.insert("title".into(), Value::from(title.as_str()));
        }
        doc.insert("layout".into(), document_layout(theme));
        doc.insert(
            "components".into(),
            Value::Array(std::mem::take(&mut self.components)),
        );
        let (text_styles, layouts) = styles.into_partitions();
        doc.insert("componentTextStyles".into(), Value::Object(text_styles));
        doc.insert("componentLayouts".into(), Value::Object(layouts));

        self.phase = Phase::Serialized;
        debug!(identifier = %metadata.identifier, "document serialized");

        let doc = Value::Object(doc);
        let out = if pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        Ok(out)
    }

    fn enter_building(&mut self, operation: &'static str) -> Result<(), DocumentError> {
        match self.phase {
            Phase::Init => {
                self.phase = Phase::Building;
                Ok(())
            }
            Phase::Building => Ok(()),
            other => Err(DocumentError::InvalidPhase {
                operation,
                expected: "INIT or BUILDING",
                actual: other.to_string(),
            }),
        }
    }
}

/// Document-level layout settings derived from the theme
fn document_layout(theme: &Theme) -> Value {
    json!({
        "columns": theme.get_int("layout_columns"),
        "width": theme.get_int("layout_width"),
        "margin": theme.get_int("layout_margin"),
        "gutter": theme.get_int("layout_gutter")
    })
}

/// Every style/layout reference in the tree must resolve to a table entry
fn check_references(nodes: &[Value], styles: &StyleTable) -> Result<(), DocumentError> {
    for node in nodes {
        let Some(map) = node.as_object() else { continue };
        if let Some(name) = map.get("textStyle").and_then(Value::as_str) {
            if !styles.contains(StyleCategory::TextStyle, name) {
                return Err(DocumentError::DanglingReference {
                    category: "textStyle",
                    name: name.to_string(),
                });
            }
        }
        if let Some(name) = map.get("layout").and_then(Value::as_str) {
            if !styles.contains(StyleCategory::Layout, name) {
                return Err(DocumentError::DanglingReference {
                    category: "layout",
                    name: name.to_string(),
                });
            }
        }
        if let Some(children) = map.get("components").and_then(Value::as_array) {
            check_references(children, styles)?;
        }
    }
    Ok(())
}
