//! Content fragments and the components they become
//!
//! A fragment is one unit of parsed source content (paragraph, heading,
//! cover image, ...). The builder turns each fragment into a typed JSON
//! node; this module holds the input model and the fragment-level
//! pre-processing shared by all kinds.

pub mod builder;
pub mod defaults;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use builder::{build, BuildContext};

/// The component kinds with built-in spec registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Body,
    Heading,
    Slug,
    Photo,
    Caption,
    Header,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Body,
        ComponentKind::Heading,
        ComponentKind::Slug,
        ComponentKind::Photo,
        ComponentKind::Caption,
        ComponentKind::Header,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Body => "body",
            ComponentKind::Heading => "heading",
            ComponentKind::Slug => "slug",
            ComponentKind::Photo => "photo",
            ComponentKind::Caption => "caption",
            ComponentKind::Header => "header",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal text alignment carried by a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

impl TextAlignment {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlignment::Left => "left",
            TextAlignment::Center => "center",
            TextAlignment::Right => "right",
        }
    }
}

/// One unit of source content to be converted into a component node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Fragment {
    /// Body text, raw markup as produced by the upstream parsing stage
    Body {
        markup: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alignment: Option<TextAlignment>,
    },
    /// A heading at levels 1-6
    Heading {
        markup: String,
        #[serde(default = "default_heading_level")]
        level: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alignment: Option<TextAlignment>,
    },
    /// A slug line displayed above the headline
    Slug {
        markup: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alignment: Option<TextAlignment>,
    },
    /// The cover image, optionally with its caption text
    Cover {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    /// Caption text not attached to any image
    Caption { markup: String },
}

fn default_heading_level() -> u8 {
    2
}

/// The human-meaningful text of a markup string: tags stripped, whitespace
/// trimmed. Empty means the fragment produces no node at all.
pub fn meaningful_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Merge a caption fragment adjacent to a cover into the cover itself.
///
/// The caption may appear on either side of the cover in source order; the
/// output always renders photo first, caption second. A caption already
/// set on the cover takes priority and leaves neighbors untouched.
pub fn pair_cover_captions(fragments: &[Fragment]) -> Vec<Fragment> {
    let mut out = Vec::with_capacity(fragments.len());
    let mut i = 0;
    while i < fragments.len() {
        let merged = match (&fragments[i], fragments.get(i + 1)) {
            (Fragment::Cover { url, caption: None }, Some(Fragment::Caption { markup })) => {
                Some(Fragment::Cover {
                    url: url.clone(),
                    caption: Some(markup.clone()),
                })
            }
            (Fragment::Caption { markup }, Some(Fragment::Cover { url, caption: None })) => {
                Some(Fragment::Cover {
                    url: url.clone(),
                    caption: Some(markup.clone()),
                })
            }
            _ => None,
        };
        match merged {
            Some(fragment) => {
                out.push(fragment);
                i += 2;
            }
            None => {
                out.push(fragments[i].clone());
                i += 1;
            }
        }
    }
    out
}
