//! Theme support for style and layout parameters
//!
//! A theme is a named set of presentation parameters (fonts, sizes, colors,
//! spacing) consulted while building component nodes. Themes are loaded from
//! TOML files and are read-only for the duration of an export run; the theme
//! in use is threaded explicitly through the build context rather than held
//! in process-global state.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur when loading or parsing themes
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("failed to read theme file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse theme TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A named mapping from setting key to value, plus optional spec overrides
#[derive(Debug, Clone)]
pub struct Theme {
    name: Option<String>,
    settings: Map<String, Value>,
    json_templates: Map<String, Value>,
}

/// TOML structure for deserializing themes
#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    settings: toml::value::Table,
    #[serde(default)]
    json_templates: toml::value::Table,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

/// Built-in theme used when no theme file is supplied
const DEFAULT_THEME: &str = r##"
[metadata]
name = "Default"

[settings]
# Document grid
layout_columns = 9
layout_width = 1024
layout_margin = 100
layout_gutter = 20

# Body text
body_font = "AvenirNext-Regular"
body_size = 18
body_line_height = 26
body_tracking = 0
body_color = "#4f4f4f"
body_orientation = "left"
body_offset = 0

# Slug
slug_font = "AvenirNext-Medium"
slug_size = 16
slug_line_height = 24
slug_tracking = 0
slug_color = "#4f4f4f"

# Image captions
caption_font = "AvenirNext-Italic"
caption_size = 16
caption_line_height = 24
caption_tracking = 0
caption_color = "#4f4f4f"

# Headings 1-6
header1_font = "AvenirNext-Bold"
header1_size = 48
header1_line_height = 52
header1_tracking = 0
header1_color = "#4f4f4f"

header2_font = "AvenirNext-Bold"
header2_size = 32
header2_line_height = 36
header2_tracking = 0
header2_color = "#4f4f4f"

header3_font = "AvenirNext-Bold"
header3_size = 24
header3_line_height = 28
header3_tracking = 0
header3_color = "#4f4f4f"

header4_font = "AvenirNext-Bold"
header4_size = 21
header4_line_height = 26
header4_tracking = 0
header4_color = "#4f4f4f"

header5_font = "AvenirNext-Bold"
header5_size = 18
header5_line_height = 24
header5_tracking = 0
header5_color = "#4f4f4f"

header6_font = "AvenirNext-Bold"
header6_size = 16
header6_line_height = 22
header6_tracking = 0
header6_color = "#4f4f4f"
"##;

impl Theme {
    /// Load a theme from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a theme from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        Ok(Theme {
            name: parsed.metadata.and_then(|m| m.name),
            settings: table_to_json(parsed.settings),
            json_templates: table_to_json(parsed.json_templates),
        })
    }

    /// The theme's display name, if the file declared one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Look up a setting value.
    ///
    /// Returns `None` for a missing key; callers supply their own literal
    /// fallback, so "use theme value X else literal Y" stays at the call
    /// site instead of being hidden in the store.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Look up a setting and coerce it to an integer.
    ///
    /// Numbers truncate, numeric strings parse, anything else coerces to 0.
    /// Non-numeric values for keys that are not coerced here pass through
    /// `get_value` untouched; validation is deferred to the consuming API.
    pub fn get_int(&self, key: &str) -> i64 {
        match self.settings.get(key) {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => i,
                None => n.as_f64().map(|f| f as i64).unwrap_or(0),
            },
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// All settings, in a stable deterministic order
    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    /// Spec template overrides declared by this theme, keyed by component
    /// kind name, each holding a spec-name -> template table
    pub fn json_templates(&self) -> &Map<String, Value> {
        &self.json_templates
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_str(DEFAULT_THEME).expect("built-in theme should be valid TOML")
    }
}

/// Convert a parsed TOML table into an ordered JSON map
fn table_to_json(table: toml::value::Table) -> Map<String, Value> {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect()
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(table_to_json(table)),
    }
}
