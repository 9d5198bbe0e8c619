//! Recursive placeholder substitution over JSON templates
//!
//! Spec templates embed `#identifier#` tokens anywhere in their string
//! values, including inside nested containers. Substitution is a pure
//! value-to-value transform; object keys are never tokenized.

use serde_json::{Map, Value};

/// Replacement values keyed by token name (without the `#` delimiters)
pub type TokenMap = Map<String, Value>;

/// Substitute tokens throughout a template, recursing into containers.
///
/// A string that is exactly one token takes the replacement value as-is,
/// so numeric theme values stay numbers in the resolved JSON. A token
/// embedded in a longer string is spliced in as its string rendering.
/// Tokens with no entry in the map are left untouched.
pub fn substitute(template: &Value, tokens: &TokenMap) -> Value {
    match template {
        Value::String(s) => substitute_string(s, tokens),
        Value::Array(items) => Value::Array(items.iter().map(|v| substitute(v, tokens)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), substitute(value, tokens)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Collect every token remaining anywhere in a value.
///
/// Used after substitution to enforce totality: an unresolved token in a
/// built node is a defect, not a rendering choice.
pub fn unresolved_tokens(value: &Value) -> Vec<String> {
    let mut found = Vec::new();
    collect_tokens(value, &mut found);
    found
}

fn substitute_string(s: &str, tokens: &TokenMap) -> Value {
    if let Some(name) = whole_token(s) {
        if let Some(value) = tokens.get(name) {
            return value.clone();
        }
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('#') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match token_end(after) {
            Some(end) if tokens.contains_key(&after[..end]) => {
                out.push_str(&render(&tokens[&after[..end]]));
                rest = &after[end + 1..];
            }
            _ => {
                out.push('#');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Value::String(out)
}

fn collect_tokens(value: &Value, found: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            let mut rest = s.as_str();
            while let Some(start) = rest.find('#') {
                let after = &rest[start + 1..];
                match token_end(after) {
                    Some(end) => {
                        found.push(after[..end].to_string());
                        rest = &after[end + 1..];
                    }
                    None => rest = after,
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_tokens(item, found);
            }
        }
        Value::Object(map) => {
            for value in map.values() {
                collect_tokens(value, found);
            }
        }
        _ => {}
    }
}

/// The token name if the whole string is a single `#name#` token
fn whole_token(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('#')?.strip_suffix('#')?;
    (!inner.is_empty() && inner.chars().all(is_token_char)).then_some(inner)
}

/// Position of the closing `#` given the text after an opening `#`, if the
/// characters between the delimiters form a valid token name
fn token_end(s: &str) -> Option<usize> {
    let end = s.find('#')?;
    (end > 0 && s[..end].chars().all(is_token_char)).then_some(end)
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// How a replacement value reads when spliced into a longer string
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tokens(pairs: &[(&str, Value)]) -> TokenMap {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_whole_token_preserves_type() {
        let template = json!({ "fontSize": "#slug_size#" });
        let resolved = substitute(&template, &tokens(&[("slug_size", json!(16))]));
        assert_eq!(resolved, json!({ "fontSize": 16 }));
    }

    #[test]
    fn test_embedded_token_splices_string() {
        let template = json!({ "role": "heading#level#" });
        let resolved = substitute(&template, &tokens(&[("level", json!(2))]));
        assert_eq!(resolved, json!({ "role": "heading2" }));
    }

    #[test]
    fn test_recurses_into_containers() {
        let template = json!({
            "caption": { "text": "#caption_text#" },
            "tags": ["#tag#", "fixed"]
        });
        let resolved = substitute(
            &template,
            &tokens(&[("caption_text", json!("A photo")), ("tag", json!("news"))]),
        );
        assert_eq!(
            resolved,
            json!({ "caption": { "text": "A photo" }, "tags": ["news", "fixed"] })
        );
    }

    #[test]
    fn test_unknown_token_left_untouched() {
        let template = json!("#mystery#");
        let resolved = substitute(&template, &TokenMap::new());
        assert_eq!(resolved, json!("#mystery#"));
        assert_eq!(unresolved_tokens(&resolved), vec!["mystery".to_string()]);
    }

    #[test]
    fn test_hex_color_is_not_a_token() {
        let template = json!({ "textColor": "#4f4f4f" });
        let resolved = substitute(&template, &TokenMap::new());
        assert_eq!(resolved, template);
        assert!(unresolved_tokens(&resolved).is_empty());
    }

    #[test]
    fn test_fully_resolved_value_has_no_tokens() {
        let template = json!({ "text": "#text#", "nested": { "n": "#n#" } });
        let resolved = substitute(
            &template,
            &tokens(&[("text", json!("Hello")), ("n", json!(1))]),
        );
        assert!(unresolved_tokens(&resolved).is_empty());
    }

    #[test]
    fn test_multiple_tokens_in_one_string() {
        let template = json!("#a# and #b#");
        let resolved = substitute(&template, &tokens(&[("a", json!("x")), ("b", json!(2))]));
        assert_eq!(resolved, json!("x and 2"));
    }
}
