//! Batch command - process many JSON ingest requests.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use intake_core::{IngestRequest, IngestResponse, IntakePipeline};

use super::config::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching JSON request files
    #[arg(required = true)]
    input: String,

    /// Directory for per-request JSON responses
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write a summary CSV to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome of processing a single request file.
struct BatchResult {
    path: PathBuf,
    response: Option<IngestResponse>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!("{} Found {} requests to process", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} requests")?
            .progress_chars("=>-"),
    );

    let pipeline = IntakePipeline::from_config(&config);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match process_file(&path, &pipeline, args.output_dir.as_deref()) {
            Ok(response) => {
                results.push(BatchResult {
                    path,
                    response: Some(response),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if !args.continue_on_error {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
                warn!("Failed to process {}: {}", path.display(), error_msg);
                results.push(BatchResult {
                    path,
                    response: None,
                    error: Some(error_msg),
                });
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if let Some(ref summary_path) = args.summary {
        write_summary(summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let passed = results
        .iter()
        .filter_map(|r| r.response.as_ref())
        .filter(|r| r.checklist.overall.ok)
        .count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} requests in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} passed, {} did not pass, {} failed",
        style(passed).green(),
        style(results.len() - passed - failed.len()).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Read one request, run it, and write the response when an output
/// directory is set.
fn process_file(
    path: &Path,
    pipeline: &IntakePipeline,
    output_dir: Option<&Path>,
) -> anyhow::Result<IngestResponse> {
    let request = read_request(path)?;
    let response = pipeline.process(&request);
    if let Some(output_dir) = output_dir {
        write_response(output_dir, path, &response)
            .map_err(|e| anyhow::anyhow!("failed to write response: {}", e))?;
    }
    Ok(response)
}

fn read_request(path: &Path) -> anyhow::Result<IngestRequest> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_response(output_dir: &Path, input: &Path, response: &IngestResponse) -> anyhow::Result<()> {
    let name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("request");
    let output_path = output_dir.join(format!("{}.response.json", name));

    fs::write(&output_path, serde_json::to_string_pretty(response)?)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

fn write_summary(path: &Path, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "request_id",
        "total_issues",
        "overall",
        "recommended_sins",
        "error",
    ])?;

    for result in results {
        let filename = result.path.display().to_string();
        match &result.response {
            Some(response) => {
                let overall = &response.checklist.overall;
                wtr.write_record([
                    filename.as_str(),
                    "ok",
                    response.request_id.as_str(),
                    overall.total_issues.to_string().as_str(),
                    if overall.ok { "PASS" } else { "FAIL" },
                    response.recommended_sins.join(";").as_str(),
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    filename.as_str(),
                    "error",
                    "",
                    "",
                    "",
                    "",
                    result.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
