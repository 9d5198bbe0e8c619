//! Error types for component building

use thiserror::Error;

use crate::component::ComponentKind;
use crate::document::DocumentError;

/// Errors raised while converting a fragment into a component node.
///
/// Any of these aborts the export run: the target schema requires a
/// structurally complete document, so partial output is never produced.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Requested spec name is not registered for the component kind.
    /// Indicates a missing registration, not a data problem.
    #[error("unknown spec '{name}' for {kind} component")]
    UnknownSpec { kind: ComponentKind, name: String },

    /// A placeholder token survived substitution.
    #[error("unresolved token '{token}' in spec '{spec}'")]
    UnresolvedToken { spec: String, token: String },

    /// A spec template resolved to something other than a JSON object
    /// where a component node was expected.
    #[error("template for spec '{name}' is not a JSON object")]
    InvalidTemplate { name: String },

    /// The document assembler rejected the node.
    #[error(transparent)]
    Document(#[from] DocumentError),
}
