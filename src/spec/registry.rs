//! Spec registry: named JSON-skeleton templates per component kind

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::component::ComponentKind;
use crate::error::BuildError;
use crate::theme::Theme;

use super::substitute::{substitute, unresolved_tokens, TokenMap};

/// A named JSON template with placeholder tokens and a human-readable label
#[derive(Debug, Clone)]
pub struct ComponentSpec {
    pub name: String,
    pub label: String,
    /// Template skeleton. Strictly data, never executable: theme
    /// customization can replace templates, so nothing in a template may
    /// ever be evaluated.
    pub template: Value,
}

/// Specs registered for one component kind
#[derive(Debug, Clone)]
pub struct SpecRegistry {
    kind: ComponentKind,
    specs: Vec<ComponentSpec>,
}

impl SpecRegistry {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            specs: Vec::new(),
        }
    }

    /// The component kind this registry is scoped to
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Register a spec under `name`.
    ///
    /// Last write wins: a later registration under the same name replaces
    /// the template in place (its position in `all()` is kept), which is
    /// how theme-level customization overrides a built-in spec.
    pub fn register(&mut self, name: &str, label: &str, template: Value) {
        if let Some(existing) = self.specs.iter_mut().find(|s| s.name == name) {
            debug!(kind = %self.kind, name, "overwriting spec registration");
            existing.label = label.to_string();
            existing.template = template;
            return;
        }
        self.specs.push(ComponentSpec {
            name: name.to_string(),
            label: label.to_string(),
            template,
        });
    }

    /// Get a spec by name. `None` for unknown names; `resolve` turns that
    /// into a build failure.
    pub fn get(&self, name: &str) -> Option<&ComponentSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// All specs in registration order, for introspection and the
    /// export-settings UI
    pub fn all(&self) -> &[ComponentSpec] {
        &self.specs
    }

    /// Fetch a spec, substitute tokens, and verify the result is fully
    /// resolved
    pub fn resolve(&self, name: &str, tokens: &TokenMap) -> Result<Value, BuildError> {
        let spec = self.get(name).ok_or_else(|| BuildError::UnknownSpec {
            kind: self.kind,
            name: name.to_string(),
        })?;

        let resolved = substitute(&spec.template, tokens);
        if let Some(token) = unresolved_tokens(&resolved).into_iter().next() {
            return Err(BuildError::UnresolvedToken {
                spec: name.to_string(),
                token,
            });
        }
        Ok(resolved)
    }
}

/// Kind-indexed collection of spec registries.
///
/// Built once with the built-in specs, optionally customized by a theme,
/// then shared read-only across export runs.
#[derive(Debug, Clone, Default)]
pub struct SpecCatalog {
    registries: HashMap<ComponentKind, SpecRegistry>,
}

impl SpecCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry for a kind, created empty on first access
    pub fn registry_mut(&mut self, kind: ComponentKind) -> &mut SpecRegistry {
        self.registries
            .entry(kind)
            .or_insert_with(|| SpecRegistry::new(kind))
    }

    pub fn registry(&self, kind: ComponentKind) -> Option<&SpecRegistry> {
        self.registries.get(&kind)
    }

    pub fn get(&self, kind: ComponentKind, name: &str) -> Option<&ComponentSpec> {
        self.registries.get(&kind).and_then(|r| r.get(name))
    }

    pub fn resolve(
        &self,
        kind: ComponentKind,
        name: &str,
        tokens: &TokenMap,
    ) -> Result<Value, BuildError> {
        match self.registries.get(&kind) {
            Some(registry) => registry.resolve(name, tokens),
            None => Err(BuildError::UnknownSpec {
                kind,
                name: name.to_string(),
            }),
        }
    }

    /// Apply a theme's `[json_templates]` spec overrides.
    ///
    /// Unknown component kinds and non-table entries are logged and
    /// skipped; template content itself is not validated here.
    pub fn apply_theme(&mut self, theme: &Theme) {
        for (kind_name, overrides) in theme.json_templates() {
            let Some(kind) = ComponentKind::parse(kind_name) else {
                warn!(kind = %kind_name, "ignoring spec overrides for unknown component kind");
                continue;
            };
            let Some(table) = overrides.as_object() else {
                warn!(kind = %kind_name, "ignoring malformed spec overrides");
                continue;
            };
            for (spec_name, template) in table {
                let label = self
                    .get(kind, spec_name)
                    .map(|s| s.label.clone())
                    .unwrap_or_else(|| spec_name.clone());
                debug!(kind = %kind, spec = %spec_name, "applying theme spec override");
                self.registry_mut(kind)
                    .register(spec_name, &label, template.clone());
            }
        }
    }
}
