//! Component builder: converts fragments into registered JSON nodes
//!
//! Each build step guards against empty content, resolves the kind's spec
//! against fragment- and theme-derived token values, registers the default
//! style and layout for the node, and appends the result to the document
//! assembler. A failure for one fragment aborts the whole run.

use serde_json::{Map, Value};
use tracing::debug;

use crate::component::{meaningful_text, ComponentKind, Fragment, TextAlignment};
use crate::document::DocumentAssembler;
use crate::error::BuildError;
use crate::settings::{ContentFormat, ExportSettings};
use crate::spec::{SpecCatalog, TokenMap};
use crate::style::{StyleCategory, StyleTable};
use crate::theme::Theme;

/// Everything a component build step needs for one export run.
///
/// The theme and catalog are shared read-only; the style table and
/// assembler are exclusive to this run.
pub struct BuildContext<'a> {
    pub theme: &'a Theme,
    pub settings: &'a ExportSettings,
    pub catalog: &'a SpecCatalog,
    pub styles: &'a mut StyleTable,
    pub assembler: &'a mut DocumentAssembler,
}

/// Build one fragment into zero or more registered component nodes
pub fn build(fragment: &Fragment, ctx: &mut BuildContext) -> Result<(), BuildError> {
    match fragment {
        Fragment::Body { markup, alignment } => build_body(markup, *alignment, ctx),
        Fragment::Heading {
            markup,
            level,
            alignment,
        } => build_heading(markup, *level, *alignment, ctx),
        Fragment::Slug { markup, alignment } => build_slug(markup, *alignment, ctx),
        Fragment::Cover { url, caption } => build_cover(url, caption.as_deref(), ctx),
        Fragment::Caption { markup } => build_caption(markup, ctx),
    }
}

fn build_body(
    markup: &str,
    alignment: Option<TextAlignment>,
    ctx: &mut BuildContext,
) -> Result<(), BuildError> {
    if meaningful_text(markup).is_empty() {
        debug!("skipping empty body fragment");
        return Ok(());
    }

    let spec = text_spec_name(ctx.settings.content_format);
    let mut node = resolve_node(
        ctx,
        ComponentKind::Body,
        spec,
        &tokens([("text", Value::from(markup.trim()))]),
    )?;

    let style_tokens = tokens([
        (
            "text_alignment",
            Value::from(resolve_alignment(alignment, ctx.theme)),
        ),
        (
            "body_font",
            theme_value(ctx.theme, "body_font", "AvenirNext-Regular"),
        ),
        ("body_size", Value::from(ctx.theme.get_int("body_size"))),
        (
            "body_line_height",
            Value::from(ctx.theme.get_int("body_line_height")),
        ),
        ("body_tracking", tracking(ctx.theme, "body_tracking")),
        ("body_color", theme_value(ctx.theme, "body_color", "#4f4f4f")),
    ]);
    let style = register_text_style(ctx, ComponentKind::Body, "default-body", "default-body", &style_tokens)?;
    node.insert("textStyle".into(), Value::from(style));

    let layout = register_layout(
        ctx,
        ComponentKind::Body,
        "body-layout",
        "body-layout",
        &body_column_tokens(ctx.theme),
    )?;
    node.insert("layout".into(), Value::from(layout));

    ctx.assembler.push(Value::Object(node))?;
    Ok(())
}

fn build_heading(
    markup: &str,
    level: u8,
    alignment: Option<TextAlignment>,
    ctx: &mut BuildContext,
) -> Result<(), BuildError> {
    if meaningful_text(markup).is_empty() {
        debug!("skipping empty heading fragment");
        return Ok(());
    }
    let level = level.clamp(1, 6);

    let mut node = resolve_node(
        ctx,
        ComponentKind::Heading,
        "json",
        &tokens([
            ("text", Value::from(markup.trim())),
            ("level", Value::from(i64::from(level))),
        ]),
    )?;

    let prefix = format!("header{level}");
    let mut style_tokens = TokenMap::new();
    style_tokens.insert(
        "text_alignment".to_string(),
        Value::from(resolve_alignment(alignment, ctx.theme)),
    );
    style_tokens.insert(
        format!("{prefix}_font"),
        theme_value(ctx.theme, &format!("{prefix}_font"), "AvenirNext-Bold"),
    );
    style_tokens.insert(
        format!("{prefix}_size"),
        Value::from(ctx.theme.get_int(&format!("{prefix}_size"))),
    );
    style_tokens.insert(
        format!("{prefix}_line_height"),
        Value::from(ctx.theme.get_int(&format!("{prefix}_line_height"))),
    );
    style_tokens.insert(
        format!("{prefix}_tracking"),
        tracking(ctx.theme, &format!("{prefix}_tracking")),
    );
    style_tokens.insert(
        format!("{prefix}_color"),
        theme_value(ctx.theme, &format!("{prefix}_color"), "#4f4f4f"),
    );

    let style_name = format!("default-heading-{level}");
    let style = register_text_style(ctx, ComponentKind::Heading, &style_name, &style_name, &style_tokens)?;
    node.insert("textStyle".into(), Value::from(style));

    let layout = register_layout(
        ctx,
        ComponentKind::Heading,
        "heading-layout",
        "heading-layout",
        &body_column_tokens(ctx.theme),
    )?;
    node.insert("layout".into(), Value::from(layout));

    ctx.assembler.push(Value::Object(node))?;
    Ok(())
}

fn build_slug(
    markup: &str,
    alignment: Option<TextAlignment>,
    ctx: &mut BuildContext,
) -> Result<(), BuildError> {
    if meaningful_text(markup).is_empty() {
        debug!("skipping empty slug fragment");
        return Ok(());
    }

    let mut node = resolve_node(
        ctx,
        ComponentKind::Slug,
        "json",
        &tokens([("text", Value::from(markup.trim()))]),
    )?;

    let style_tokens = tokens([
        (
            "text_alignment",
            Value::from(resolve_alignment(alignment, ctx.theme)),
        ),
        (
            "slug_font",
            theme_value(ctx.theme, "slug_font", "AvenirNext-Medium"),
        ),
        ("slug_size", Value::from(ctx.theme.get_int("slug_size"))),
        (
            "slug_line_height",
            Value::from(ctx.theme.get_int("slug_line_height")),
        ),
        ("slug_tracking", tracking(ctx.theme, "slug_tracking")),
        ("slug_color", theme_value(ctx.theme, "slug_color", "#4f4f4f")),
    ]);
    let style = register_text_style(ctx, ComponentKind::Slug, "default-slug", "default-slug", &style_tokens)?;
    node.insert("textStyle".into(), Value::from(style));

    let layout = register_full_width_layout(ctx, ComponentKind::Slug, "slug-layout", "slug-layout")?;
    node.insert("layout".into(), Value::from(layout));

    ctx.assembler.push(Value::Object(node))?;
    Ok(())
}

fn build_cover(url: &str, caption: Option<&str>, ctx: &mut BuildContext) -> Result<(), BuildError> {
    let url = url.trim();
    if url.is_empty() {
        debug!("skipping cover fragment without a url");
        return Ok(());
    }
    let caption = caption.map(str::trim).filter(|text| !text.is_empty());

    let mut photo = match caption {
        Some(text) => resolve_node(
            ctx,
            ComponentKind::Photo,
            "json-with-caption",
            &tokens([
                ("url", Value::from(url)),
                ("caption_text", Value::from(text)),
            ]),
        )?,
        None => resolve_node(
            ctx,
            ComponentKind::Photo,
            "json",
            &tokens([("url", Value::from(url))]),
        )?,
    };
    let photo_layout = register_full_width_layout(
        ctx,
        ComponentKind::Photo,
        "header-photo-layout",
        "header-photo-layout",
    )?;
    photo.insert("layout".into(), Value::from(photo_layout));

    // Photo first, caption second, whatever the source order was.
    let mut children = vec![Value::Object(photo)];
    if let Some(text) = caption {
        children.push(Value::Object(caption_node(text, ctx)?));
    }

    let mut header = resolve_node(ctx, ComponentKind::Header, "json", &TokenMap::new())?;
    header.insert("components".into(), Value::Array(children));
    let header_layout =
        register_full_width_layout(ctx, ComponentKind::Header, "header-layout", "header-layout")?;
    header.insert("layout".into(), Value::from(header_layout));

    ctx.assembler.set_cover(Value::Object(header))?;
    Ok(())
}

fn build_caption(markup: &str, ctx: &mut BuildContext) -> Result<(), BuildError> {
    if meaningful_text(markup).is_empty() {
        debug!("skipping empty caption fragment");
        return Ok(());
    }
    let node = caption_node(markup.trim(), ctx)?;
    ctx.assembler.push(Value::Object(node))?;
    Ok(())
}

/// A caption node with its style and layout attached, used both for
/// standalone captions and for the cover's caption child
fn caption_node(text: &str, ctx: &mut BuildContext) -> Result<Map<String, Value>, BuildError> {
    let spec = text_spec_name(ctx.settings.content_format);
    let mut node = resolve_node(
        ctx,
        ComponentKind::Caption,
        spec,
        &tokens([("text", Value::from(text))]),
    )?;

    let style_tokens = tokens([
        ("text_alignment", Value::from(resolve_alignment(None, ctx.theme))),
        (
            "caption_font",
            theme_value(ctx.theme, "caption_font", "AvenirNext-Italic"),
        ),
        ("caption_size", Value::from(ctx.theme.get_int("caption_size"))),
        (
            "caption_line_height",
            Value::from(ctx.theme.get_int("caption_line_height")),
        ),
        ("caption_tracking", tracking(ctx.theme, "caption_tracking")),
        (
            "caption_color",
            theme_value(ctx.theme, "caption_color", "#4f4f4f"),
        ),
    ]);
    let style = register_text_style(
        ctx,
        ComponentKind::Caption,
        "default-caption",
        "default-caption",
        &style_tokens,
    )?;
    node.insert("textStyle".into(), Value::from(style));

    let layout = register_layout(
        ctx,
        ComponentKind::Caption,
        "caption-layout",
        "caption-layout",
        &TokenMap::new(),
    )?;
    node.insert("layout".into(), Value::from(layout));

    Ok(node)
}

/// Resolve a spec that must produce a component node (a JSON object)
fn resolve_node(
    ctx: &BuildContext,
    kind: ComponentKind,
    spec: &str,
    tokens: &TokenMap,
) -> Result<Map<String, Value>, BuildError> {
    match ctx.catalog.resolve(kind, spec, tokens)? {
        Value::Object(map) => Ok(map),
        _ => Err(BuildError::InvalidTemplate {
            name: spec.to_string(),
        }),
    }
}

fn register_text_style(
    ctx: &mut BuildContext,
    kind: ComponentKind,
    spec: &str,
    preferred_name: &str,
    tokens: &TokenMap,
) -> Result<String, BuildError> {
    let resolved = ctx.catalog.resolve(kind, spec, tokens)?;
    Ok(ctx
        .styles
        .register(StyleCategory::TextStyle, preferred_name, resolved))
}

fn register_layout(
    ctx: &mut BuildContext,
    kind: ComponentKind,
    spec: &str,
    preferred_name: &str,
    tokens: &TokenMap,
) -> Result<String, BuildError> {
    let resolved = ctx.catalog.resolve(kind, spec, tokens)?;
    Ok(ctx
        .styles
        .register(StyleCategory::Layout, preferred_name, resolved))
}

/// Register a layout spanning the whole document grid with document
/// margins ignored; the spec's own fields follow the injected ones
fn register_full_width_layout(
    ctx: &mut BuildContext,
    kind: ComponentKind,
    spec: &str,
    preferred_name: &str,
) -> Result<String, BuildError> {
    let resolved = ctx.catalog.resolve(kind, spec, &TokenMap::new())?;
    let Value::Object(fields) = resolved else {
        return Err(BuildError::InvalidTemplate {
            name: spec.to_string(),
        });
    };

    let mut layout = Map::new();
    layout.insert("columnStart".into(), Value::from(0));
    layout.insert(
        "columnSpan".into(),
        Value::from(ctx.theme.get_int("layout_columns")),
    );
    layout.insert("ignoreDocumentMargin".into(), Value::Bool(true));
    layout.extend(fields);

    Ok(ctx
        .styles
        .register(StyleCategory::Layout, preferred_name, Value::Object(layout)))
}

/// Explicit fragment alignment wins; otherwise the theme-wide default
/// orientation; otherwise left.
fn resolve_alignment(explicit: Option<TextAlignment>, theme: &Theme) -> &'static str {
    if let Some(alignment) = explicit {
        return alignment.as_str();
    }
    match theme.get_value("body_orientation").and_then(Value::as_str) {
        Some("center") => "center",
        Some("right") => "right",
        _ => "left",
    }
}

/// Theme value with a caller-supplied literal fallback, passed through
/// without validation
fn theme_value(theme: &Theme, key: &str, fallback: &str) -> Value {
    theme
        .get_value(key)
        .cloned()
        .unwrap_or_else(|| Value::from(fallback))
}

/// Tracking is stored as a fraction of the theme's integer value
fn tracking(theme: &Theme, key: &str) -> Value {
    Value::from(theme.get_int(key) as f64 / 100.0)
}

fn text_spec_name(format: ContentFormat) -> &'static str {
    match format {
        ContentFormat::Html => "json-html",
        ContentFormat::Markdown => "json",
    }
}

/// Column tokens shared by body and heading layouts
fn body_column_tokens(theme: &Theme) -> TokenMap {
    let offset = theme.get_int("body_offset");
    let span = (theme.get_int("layout_columns") - offset).max(1);
    tokens([
        ("body_offset", Value::from(offset)),
        ("body_column_span", Value::from(span)),
    ])
}

fn tokens<const N: usize>(pairs: [(&str, Value); N]) -> TokenMap {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::defaults::default_catalog;
    use serde_json::json;

    fn run<F>(f: F) -> (StyleTable, DocumentAssembler)
    where
        F: FnOnce(&mut BuildContext) -> Result<(), BuildError>,
    {
        let theme = Theme::default();
        let settings = ExportSettings::default();
        let catalog = default_catalog();
        let mut styles = StyleTable::new();
        let mut assembler = DocumentAssembler::new();
        {
            let mut ctx = BuildContext {
                theme: &theme,
                settings: &settings,
                catalog: &catalog,
                styles: &mut styles,
                assembler: &mut assembler,
            };
            f(&mut ctx).expect("build should succeed");
        }
        (styles, assembler)
    }

    #[test]
    fn test_empty_fragment_produces_nothing() {
        let (styles, mut assembler) = run(|ctx| {
            build(
                &Fragment::Body {
                    markup: "<p></p>".into(),
                    alignment: None,
                },
                ctx,
            )
        });
        assert!(styles.is_empty());
        assembler.assemble().expect("assemble");
        assert!(assembler.components().is_empty());
    }

    #[test]
    fn test_slug_node_references_registered_entries() {
        let (styles, mut assembler) = run(|ctx| {
            build(
                &Fragment::Slug {
                    markup: "EXCLUSIVE".into(),
                    alignment: None,
                },
                ctx,
            )
        });

        assembler.assemble().expect("assemble");
        let node = assembler.components()[0].as_object().unwrap();
        assert_eq!(node["role"], "heading");
        assert_eq!(node["text"], "EXCLUSIVE");
        assert_eq!(node["textStyle"], "default-slug");
        assert_eq!(node["layout"], "slug-layout");
        assert!(styles.contains(StyleCategory::TextStyle, "default-slug"));
        assert!(styles.contains(StyleCategory::Layout, "slug-layout"));
    }

    #[test]
    fn test_tracking_stored_as_fraction() {
        let theme = Theme::from_str(
            r#"
[settings]
slug_tracking = 50
"#,
        )
        .expect("Should parse");
        let settings = ExportSettings::default();
        let catalog = default_catalog();
        let mut styles = StyleTable::new();
        let mut assembler = DocumentAssembler::new();
        {
            let mut ctx = BuildContext {
                theme: &theme,
                settings: &settings,
                catalog: &catalog,
                styles: &mut styles,
                assembler: &mut assembler,
            };
            build(
                &Fragment::Slug {
                    markup: "Hello".into(),
                    alignment: None,
                },
                &mut ctx,
            )
            .expect("build should succeed");
        }

        let (text_styles, _) = styles.into_partitions();
        assert_eq!(text_styles["default-slug"]["tracking"], json!(0.5));
    }

    #[test]
    fn test_alignment_explicit_overrides_theme() {
        let theme = Theme::from_str(
            r#"
[settings]
body_orientation = "center"
"#,
        )
        .expect("Should parse");
        assert_eq!(resolve_alignment(Some(TextAlignment::Right), &theme), "right");
        assert_eq!(resolve_alignment(None, &theme), "center");
        assert_eq!(resolve_alignment(None, &Theme::default()), "left");
    }

    #[test]
    fn test_full_width_layout_injection() {
        let (styles, _) = run(|ctx| {
            build(
                &Fragment::Slug {
                    markup: "EXCLUSIVE".into(),
                    alignment: None,
                },
                ctx,
            )
        });

        let (_, layouts) = styles.into_partitions();
        let layout = &layouts["slug-layout"];
        assert_eq!(layout["columnStart"], json!(0));
        assert_eq!(layout["columnSpan"], json!(9));
        assert_eq!(layout["ignoreDocumentMargin"], json!(true));
        assert_eq!(layout["margin"], json!({ "top": 10, "bottom": 10 }));
    }

    #[test]
    fn test_cover_builds_header_with_children() {
        let (_, mut assembler) = run(|ctx| {
            build(
                &Fragment::Cover {
                    url: "https://example.com/a.jpg".into(),
                    caption: Some("Test Caption".into()),
                },
                ctx,
            )
        });

        assembler.assemble().expect("assemble");
        let header = assembler.components()[0].as_object().unwrap();
        assert_eq!(header["role"], "header");
        let children = header["components"].as_array().unwrap();
        assert_eq!(children[0]["role"], "photo");
        assert_eq!(children[0]["URL"], "https://example.com/a.jpg");
        assert_eq!(children[0]["caption"]["text"], "Test Caption");
        assert_eq!(children[1]["role"], "caption");
        assert_eq!(children[1]["text"], "Test Caption");
    }

    #[test]
    fn test_heading_level_in_role() {
        let (_, mut assembler) = run(|ctx| {
            build(
                &Fragment::Heading {
                    markup: "Hello".into(),
                    level: 3,
                    alignment: None,
                },
                ctx,
            )
        });

        assembler.assemble().expect("assemble");
        let node = assembler.components()[0].as_object().unwrap();
        assert_eq!(node["role"], "heading3");
        assert_eq!(node["textStyle"], "default-heading-3");
    }

    #[test]
    fn test_markdown_mode_omits_format() {
        let theme = Theme::default();
        let settings = ExportSettings::new().with_content_format(ContentFormat::Markdown);
        let catalog = default_catalog();
        let mut styles = StyleTable::new();
        let mut assembler = DocumentAssembler::new();
        {
            let mut ctx = BuildContext {
                theme: &theme,
                settings: &settings,
                catalog: &catalog,
                styles: &mut styles,
                assembler: &mut assembler,
            };
            build(
                &Fragment::Body {
                    markup: "Plain *text*".into(),
                    alignment: None,
                },
                &mut ctx,
            )
            .expect("build should succeed");
        }

        assembler.assemble().expect("assemble");
        let node = assembler.components()[0].as_object().unwrap();
        assert_eq!(node["role"], "body");
        assert!(node.get("format").is_none());
    }
}
