//! Extract command - pull fields from a single document and validate them.

use std::path::PathBuf;

use clap::Args;
use console::style;

use intake_core::extract::extract_with_config;
use intake_core::source::load_text;
use intake_core::{validate, DocumentKind, FieldValue};

use super::config::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Document kind (company-profile, company, past-performance, pp, ...)
    #[arg(short, long)]
    kind: DocumentKind,

    /// Document file (text or PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Print fields and issues as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let text = load_text(&args.input)?;

    let document = extract_with_config(&text, args.kind, &config.extraction);
    let issues = validate(&document);

    if args.json {
        let output = serde_json::json!({
            "document": document,
            "issues": issues,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", style(document.kind()).bold());
    let fields = document.field_map();
    for name in document.kind().fields() {
        match fields.get(name) {
            Some(value) => println!("  {:<16} {}", name, display_value(value)),
            None => println!("  {:<16} {}", name, style("-").dim()),
        }
    }

    if issues.is_empty() {
        println!("{} No issues", style("✓").green());
    } else {
        println!("Issues:");
        for issue in &issues {
            println!("  {} {}", style("!").yellow(), issue);
        }
    }

    Ok(())
}

fn display_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => text.clone(),
        FieldValue::List(items) => items.join(", "),
        FieldValue::Flag(flag) => flag.to_string(),
    }
}
