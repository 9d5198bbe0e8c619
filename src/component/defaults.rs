//! Built-in spec registrations for every component kind
//!
//! Templates here are the skeletons the publishing schema expects per role;
//! the `#token#` placeholders are filled from the fragment and the active
//! theme at build time. A theme's `[json_templates]` section can override
//! any of them by re-registering the same name.

use serde_json::json;

use crate::component::ComponentKind;
use crate::spec::SpecCatalog;

/// A catalog with every built-in spec registered
pub fn default_catalog() -> SpecCatalog {
    let mut catalog = SpecCatalog::new();
    register_body(&mut catalog);
    register_heading(&mut catalog);
    register_slug(&mut catalog);
    register_photo(&mut catalog);
    register_caption(&mut catalog);
    register_header(&mut catalog);
    catalog
}

fn register_body(catalog: &mut SpecCatalog) {
    let specs = catalog.registry_mut(ComponentKind::Body);
    specs.register("json", "JSON", json!({ "role": "body", "text": "#text#" }));
    specs.register(
        "json-html",
        "JSON (HTML)",
        json!({ "role": "body", "text": "#text#", "format": "html" }),
    );
    specs.register(
        "default-body",
        "Style",
        json!({
            "textAlignment": "#text_alignment#",
            "fontName": "#body_font#",
            "fontSize": "#body_size#",
            "lineHeight": "#body_line_height#",
            "tracking": "#body_tracking#",
            "textColor": "#body_color#"
        }),
    );
    specs.register(
        "body-layout",
        "Layout",
        json!({
            "columnStart": "#body_offset#",
            "columnSpan": "#body_column_span#",
            "margin": { "top": 12, "bottom": 12 }
        }),
    );
}

fn register_heading(catalog: &mut SpecCatalog) {
    let specs = catalog.registry_mut(ComponentKind::Heading);
    specs.register(
        "json",
        "JSON",
        json!({ "role": "heading#level#", "text": "#text#" }),
    );
    for level in 1..=6 {
        specs.register(
            &format!("default-heading-{level}"),
            "Style",
            json!({
                "textAlignment": "#text_alignment#",
                "fontName": format!("#header{level}_font#"),
                "fontSize": format!("#header{level}_size#"),
                "lineHeight": format!("#header{level}_line_height#"),
                "tracking": format!("#header{level}_tracking#"),
                "textColor": format!("#header{level}_color#")
            }),
        );
    }
    specs.register(
        "heading-layout",
        "Layout",
        json!({
            "columnStart": "#body_offset#",
            "columnSpan": "#body_column_span#",
            "margin": { "top": 24, "bottom": 8 }
        }),
    );
}

fn register_slug(catalog: &mut SpecCatalog) {
    let specs = catalog.registry_mut(ComponentKind::Slug);
    specs.register("json", "JSON", json!({ "role": "heading", "text": "#text#" }));
    specs.register(
        "default-slug",
        "Style",
        json!({
            "textAlignment": "#text_alignment#",
            "fontName": "#slug_font#",
            "fontSize": "#slug_size#",
            "lineHeight": "#slug_line_height#",
            "tracking": "#slug_tracking#",
            "textColor": "#slug_color#"
        }),
    );
    specs.register(
        "slug-layout",
        "Layout",
        json!({ "margin": { "top": 10, "bottom": 10 } }),
    );
}

fn register_photo(catalog: &mut SpecCatalog) {
    let specs = catalog.registry_mut(ComponentKind::Photo);
    specs.register("json", "JSON", json!({ "role": "photo", "URL": "#url#" }));
    specs.register(
        "json-with-caption",
        "JSON (captioned)",
        json!({
            "role": "photo",
            "URL": "#url#",
            "caption": { "text": "#caption_text#" }
        }),
    );
    specs.register(
        "header-photo-layout",
        "Layout",
        json!({ "margin": { "top": 0, "bottom": 0 } }),
    );
}

fn register_caption(catalog: &mut SpecCatalog) {
    let specs = catalog.registry_mut(ComponentKind::Caption);
    specs.register("json", "JSON", json!({ "role": "caption", "text": "#text#" }));
    specs.register(
        "json-html",
        "JSON (HTML)",
        json!({ "role": "caption", "text": "#text#", "format": "html" }),
    );
    specs.register(
        "default-caption",
        "Style",
        json!({
            "textAlignment": "#text_alignment#",
            "fontName": "#caption_font#",
            "fontSize": "#caption_size#",
            "lineHeight": "#caption_line_height#",
            "tracking": "#caption_tracking#",
            "textColor": "#caption_color#"
        }),
    );
    specs.register(
        "caption-layout",
        "Layout",
        json!({ "margin": { "top": 4, "bottom": 12 } }),
    );
}

fn register_header(catalog: &mut SpecCatalog) {
    let specs = catalog.registry_mut(ComponentKind::Header);
    specs.register("json", "JSON", json!({ "role": "header", "components": [] }));
    specs.register(
        "header-layout",
        "Layout",
        json!({ "margin": { "top": 0, "bottom": 24 } }),
    );
}
