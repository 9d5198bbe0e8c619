//! Style and layout indirection tables
//!
//! Component nodes never embed styles directly; they reference symbolic
//! names resolved through per-run tables. The target schema charges a cost
//! per distinct named style, so identical resolved styles across many
//! fragments must collapse to a single definition.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

/// Namespace partition for table entries. Identical names in different
/// categories never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleCategory {
    TextStyle,
    Layout,
}

impl StyleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleCategory::TextStyle => "textStyle",
            StyleCategory::Layout => "layout",
        }
    }
}

impl fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-run table of symbolic name -> resolved JSON, deduplicated by value
#[derive(Debug, Default)]
pub struct StyleTable {
    text_styles: Map<String, Value>,
    layouts: Map<String, Value>,
    /// Canonical serialization -> symbolic name, for value dedup
    index: HashMap<(StyleCategory, String), String>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolved value under a preferred symbolic name.
    ///
    /// If an identical value is already registered in the category, its
    /// existing name is returned (dedup). Otherwise the preferred name is
    /// used, with a `-2`, `-3`, ... suffix when a different value already
    /// owns it: the first registration keeps the unsuffixed name.
    pub fn register(
        &mut self,
        category: StyleCategory,
        preferred_name: &str,
        value: Value,
    ) -> String {
        let canonical = value.to_string();
        if let Some(existing) = self.index.get(&(category, canonical.clone())) {
            debug!(%category, name = %existing, "style table dedup hit");
            return existing.clone();
        }

        let entries = self.entries_mut(category);
        let mut name = preferred_name.to_string();
        let mut suffix = 2;
        while entries.contains_key(&name) {
            name = format!("{preferred_name}-{suffix}");
            suffix += 1;
        }
        if name != preferred_name {
            debug!(%category, preferred = %preferred_name, assigned = %name, "style name collision, suffix assigned");
        }

        entries.insert(name.clone(), value);
        self.index.insert((category, canonical), name.clone());
        name
    }

    /// Whether a symbolic name is registered in a category
    pub fn contains(&self, category: StyleCategory, name: &str) -> bool {
        self.entries(category).contains_key(name)
    }

    /// Number of entries in a category
    pub fn len(&self, category: StyleCategory) -> usize {
        self.entries(category).len()
    }

    pub fn is_empty(&self) -> bool {
        self.text_styles.is_empty() && self.layouts.is_empty()
    }

    /// Consume the table into its output partitions, in registration order:
    /// (`componentTextStyles`, `componentLayouts`)
    pub fn into_partitions(self) -> (Map<String, Value>, Map<String, Value>) {
        (self.text_styles, self.layouts)
    }

    fn entries(&self, category: StyleCategory) -> &Map<String, Value> {
        match category {
            StyleCategory::TextStyle => &self.text_styles,
            StyleCategory::Layout => &self.layouts,
        }
    }

    fn entries_mut(&mut self, category: StyleCategory) -> &mut Map<String, Value> {
        match category {
            StyleCategory::TextStyle => &mut self.text_styles,
            StyleCategory::Layout => &mut self.layouts,
        }
    }
}
