//! Batch command - extract contacts from multiple files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use cardex_core::models::config::CardConfig;
use cardex_core::{
    ContactDraft, ContactPipeline, ContactRecord, ExtractionAggregator, ExtractionResult,
    KeywordClassifier, PureOcrEngine,
};

use super::lines::split_lines;
use super::output::{self, OutputFormat};
use super::{build_classifier, extension, is_image, load_config, load_engine, resolve_model_dir};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (images, or .txt files of recognized lines)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of processing a single file.
struct FileOutcome {
    path: PathBuf,
    extracted: Option<(ContactRecord, ExtractionResult)>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// Extraction stages shared across files. The OCR engine is loaded on first use.
struct Extractor<'a> {
    config: &'a CardConfig,
    model_dir: PathBuf,
    classifier: KeywordClassifier,
    pipeline: Option<ContactPipeline<PureOcrEngine, KeywordClassifier>>,
}

impl Extractor<'_> {
    fn extract(&mut self, path: &Path) -> anyhow::Result<ExtractionResult> {
        if extension(path) == "txt" {
            let text = fs::read_to_string(path)?;
            let aggregator = ExtractionAggregator::from_config(&self.config.extraction);
            return Ok(aggregator.aggregate(split_lines(&text), &self.classifier));
        }

        if !is_image(path) {
            anyhow::bail!("Unsupported file format: {}", extension(path));
        }

        let image = image::open(path)?;
        if self.pipeline.is_none() {
            let engine = load_engine(&self.model_dir, self.config)?;
            self.pipeline = Some(ContactPipeline::new(
                engine,
                self.classifier.clone(),
                &self.config.extraction,
            ));
        }

        match &self.pipeline {
            Some(pipeline) => Ok(pipeline.extract(&image)?),
            None => anyhow::bail!("OCR engine unavailable"),
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_image(p) || extension(p) == "txt")
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut extractor = Extractor {
        config: &config,
        model_dir: resolve_model_dir(args.model_dir.as_deref(), &config),
        classifier: build_classifier(&config)?,
        pipeline: None,
    };

    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = extractor.extract(&path);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(result) => {
                let record = ContactDraft::from_result(&result).into_record();
                outcomes.push(FileOutcome {
                    path,
                    extracted: Some((record, result)),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    outcomes.push(FileOutcome {
                        path,
                        extracted: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    let successful = outcomes.iter().filter(|o| o.extracted.is_some()).count();
    let failed: Vec<&FileOutcome> = outcomes.iter().filter(|o| o.error.is_some()).collect();

    for outcome in &outcomes {
        let Some((record, result)) = &outcome.extracted else {
            continue;
        };
        let rendered = output::format_contact(record, result, args.format)?;

        match &args.output_dir {
            Some(output_dir) => {
                let stem = outcome
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("contact");
                let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));
                fs::write(&output_path, rendered)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => {
                if !args.summary {
                    println!("{}", rendered.trim_end());
                }
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for outcome in &failed {
            eprintln!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "name",
        "job_title",
        "company",
        "email",
        "phone",
        "website",
        "candidates",
        "processing_time_ms",
        "error",
    ])?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = outcome.processing_time_ms.to_string();

        if let Some((record, result)) = &outcome.extracted {
            let candidates = result.total_entries().to_string();
            let mut row = vec![filename, "success"];
            row.extend(output::record_fields(record));
            row.extend([candidates.as_str(), time.as_str(), ""]);
            wtr.write_record(&row)?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                time.as_str(),
                outcome.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
