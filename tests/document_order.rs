//! Component ordering in the assembled document

use pretty_assertions::assert_eq;
use serde_json::Value;

use newsdoc::{export, Fragment};

fn roles(json: &str) -> Vec<String> {
    let doc: Value = serde_json::from_str(json).expect("output should be valid JSON");
    doc["components"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["role"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_encounter_order_preserved() {
    let json = export(&[
        Fragment::Slug {
            markup: "EXCLUSIVE".into(),
            alignment: None,
        },
        Fragment::Heading {
            markup: "Hello".into(),
            level: 1,
            alignment: None,
        },
        Fragment::Body {
            markup: "<p>First paragraph.</p>".into(),
            alignment: None,
        },
        Fragment::Body {
            markup: "<p>Second paragraph.</p>".into(),
            alignment: None,
        },
    ])
    .unwrap();

    assert_eq!(roles(&json), vec!["heading", "heading1", "body", "body"]);
}

#[test]
fn test_cover_pinned_before_body() {
    // Cover appears last in source order but must lead the document.
    let json = export(&[
        Fragment::Body {
            markup: "<p>Text</p>".into(),
            alignment: None,
        },
        Fragment::Cover {
            url: "https://example.com/a.jpg".into(),
            caption: None,
        },
    ])
    .unwrap();

    assert_eq!(roles(&json), vec!["header", "body"]);
}

#[test]
fn test_body_text_order_survives_cover_pinning() {
    let json = export(&[
        Fragment::Body {
            markup: "<p>One</p>".into(),
            alignment: None,
        },
        Fragment::Cover {
            url: "https://example.com/a.jpg".into(),
            caption: None,
        },
        Fragment::Body {
            markup: "<p>Two</p>".into(),
            alignment: None,
        },
    ])
    .unwrap();

    let doc: Value = serde_json::from_str(&json).unwrap();
    let components = doc["components"].as_array().unwrap();
    assert_eq!(components[0]["role"], "header");
    assert_eq!(components[1]["text"], "<p>One</p>");
    assert_eq!(components[2]["text"], "<p>Two</p>");
}

#[test]
fn test_standalone_caption_keeps_its_place() {
    // A caption with no adjacent cover is an ordinary component.
    let json = export(&[
        Fragment::Body {
            markup: "<p>Text</p>".into(),
            alignment: None,
        },
        Fragment::Caption {
            markup: "Figure 1".into(),
        },
    ])
    .unwrap();

    assert_eq!(roles(&json), vec!["body", "caption"]);
}
