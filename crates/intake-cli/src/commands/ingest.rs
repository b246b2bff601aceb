//! Ingest command - process one company profile and past performance pair.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use intake_core::source::load_text;
use intake_core::{IngestRequest, IngestResponse, IntakePipeline};

use super::config::load_config;

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// Company profile document (text or PDF)
    #[arg(long, required = true)]
    company_profile: PathBuf,

    /// Past performance document (text or PDF)
    #[arg(long, required = true)]
    past_performance: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Exit with an error when the checklist does not pass
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON response, same shape as the HTTP API
    Json,
    /// Human readable checklist
    Text,
}

pub fn run(args: IngestArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let request = IngestRequest {
        company_profile: read_document(&args.company_profile)?,
        past_performance: read_document(&args.past_performance)?,
    };

    info!(
        "Ingesting {} and {}",
        args.company_profile.display(),
        args.past_performance.display()
    );

    let response = IntakePipeline::from_config(&config).process(&request);

    let output = match args.format {
        OutputFormat::Json if args.pretty => serde_json::to_string_pretty(&response)?,
        OutputFormat::Json => serde_json::to_string(&response)?,
        OutputFormat::Text => format_text(&response),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.strict && !response.checklist.overall.ok {
        anyhow::bail!(
            "Checklist failed with {} issues",
            response.checklist.overall.total_issues
        );
    }

    Ok(())
}

fn read_document(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(load_text(path)?)
}

/// Render a response as a plain text checklist.
pub fn format_text(response: &IngestResponse) -> String {
    let mut out = String::new();
    let profile = &response.parsed.company_profile;

    out.push_str(&format!("Request: {}\n", response.request_id));
    out.push_str(&format!(
        "Company: {}\n",
        profile.company_name.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("NAICS: {}\n", or_dash(&profile.naics)));
    out.push_str(&format!(
        "Recommended SINs: {}\n",
        or_dash(&response.recommended_sins)
    ));

    out.push_str("\nChecklist:\n");
    for (name, item) in response.checklist.required.items() {
        let mark = if item.ok {
            style("✓").green()
        } else {
            style("✗").red()
        };
        out.push_str(&format!("  {} {:<22} {}\n", mark, name, item.details));
    }

    if !response.issues.is_empty() {
        out.push_str("\nIssues:\n");
        for issue in &response.issues {
            out.push_str(&format!("  - {}\n", issue));
        }
    }

    let overall = &response.checklist.overall;
    let verdict = if overall.ok {
        style("PASS").green().bold()
    } else {
        style("FAIL").red().bold()
    };
    out.push_str(&format!("\nOverall: {} ({} issues)", verdict, overall.total_issues));

    out
}

fn or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
