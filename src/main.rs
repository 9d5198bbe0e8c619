//! Newsdoc CLI
//!
//! Usage:
//!   newsdoc [OPTIONS] [FILE]
//!
//! Reads a JSON array of content fragments from FILE (or stdin) and writes
//! the exported article JSON document to stdout.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use newsdoc::component::{defaults, ComponentKind};
use newsdoc::{
    export_with_config, ContentFormat, DocumentMetadata, ExportConfig, ExportSettings, Fragment,
    Theme,
};

#[derive(Parser)]
#[command(name = "newsdoc")]
#[command(about = "Export content fragments to an article JSON document")]
struct Cli {
    /// Input file with a JSON array of fragments (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Theme file (TOML format)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Document identifier
    #[arg(short, long)]
    identifier: Option<String>,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Document language tag
    #[arg(short, long)]
    language: Option<String>,

    /// Text content format: html or markdown
    #[arg(long, default_value = "html")]
    text_format: String,

    /// Pretty-print the output document
    #[arg(short, long)]
    pretty: bool,

    /// List all registered component specs and exit
    #[arg(long)]
    list_specs: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_specs {
        print_specs();
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let content_format = match cli.text_format.as_str() {
        "html" => ContentFormat::Html,
        "markdown" => ContentFormat::Markdown,
        other => {
            eprintln!("Error: unknown text format '{}' (expected html or markdown)", other);
            std::process::exit(1);
        }
    };

    // Load theme
    let theme = match &cli.theme {
        Some(path) => match Theme::from_file(path) {
            Ok(theme) => theme,
            Err(e) => {
                eprintln!("Error loading theme '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Theme::default(),
    };

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let fragments: Vec<Fragment> = match serde_json::from_str(&source) {
        Ok(fragments) => fragments,
        Err(e) => {
            eprintln!("Error parsing fragments: {}", e);
            std::process::exit(1);
        }
    };

    let mut metadata = DocumentMetadata::new();
    if let Some(identifier) = cli.identifier {
        metadata = metadata.with_identifier(identifier);
    }
    if let Some(title) = cli.title {
        metadata = metadata.with_title(title);
    }
    if let Some(language) = cli.language {
        metadata = metadata.with_language(language);
    }

    let config = ExportConfig::new()
        .with_theme(theme)
        .with_settings(
            ExportSettings::new()
                .with_content_format(content_format)
                .with_pretty(cli.pretty),
        )
        .with_metadata(metadata);

    match export_with_config(&fragments, &config) {
        Ok(json) => {
            println!("{}", json);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_specs() {
    let catalog = defaults::default_catalog();
    for kind in ComponentKind::ALL {
        let Some(registry) = catalog.registry(kind) else {
            continue;
        };
        println!("{}:", kind);
        for spec in registry.all() {
            println!("  {} ({})", spec.name, spec.label);
        }
    }
}

fn print_intro() {
    println!(
        r#"Newsdoc - export content fragments to an article JSON document

USAGE:
    newsdoc [OPTIONS] [FILE]
    echo '<fragments>' | newsdoc

OPTIONS:
    -t, --theme        Theme file (TOML)
    -i, --identifier   Document identifier
    --title            Document title
    -l, --language     Document language tag
    --text-format      Text content format: html (default) or markdown
    -p, --pretty       Pretty-print the output document
    --list-specs       List all registered component specs
    -h, --help         Print help

FRAGMENTS:
    The input is a JSON array of fragment objects tagged by "kind":

    [
        {{ "kind": "slug", "markup": "EXCLUSIVE" }},
        {{ "kind": "heading", "markup": "Hello", "level": 1 }},
        {{ "kind": "cover", "url": "https://example.com/a.jpg",
           "caption": "A photo" }},
        {{ "kind": "body", "markup": "<p>Article text.</p>" }}
    ]

QUICK START:
    echo '[{{"kind":"body","markup":"<p>Hello</p>"}}]' | newsdoc --pretty"#
    );
}
