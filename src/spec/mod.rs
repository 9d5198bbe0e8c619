//! Component spec system
//!
//! A spec is a named JSON skeleton with `#token#` placeholders. Component
//! builders resolve specs against a token map derived from the fragment and
//! the active theme; the resolved JSON becomes a component node or a
//! style/layout table entry.

pub mod registry;
pub mod substitute;

pub use registry::{ComponentSpec, SpecCatalog, SpecRegistry};
pub use substitute::{substitute, unresolved_tokens, TokenMap};
