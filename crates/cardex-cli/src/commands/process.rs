//! Process command - extract a contact from a single card image.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use cardex_core::{ContactPipeline, SuggestionSession, TextRecognizer};

use super::output::{self, OutputFormat};
use super::{build_classifier, is_image, load_config, load_engine, progress_bar, resolve_model_dir};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input image
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Review each field before output
    #[arg(short, long)]
    interactive: bool,

    /// Save the contact as a vCard into this directory
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Print the recognized lines to stderr
    #[arg(long)]
    show_lines: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    if !is_image(&args.input) {
        anyhow::bail!(
            "Unsupported file format: {}. Use 'cardex lines' for text input.",
            args.input.display()
        );
    }

    info!("Processing file: {}", args.input.display());

    let classifier = build_classifier(&config)?;
    let model_dir = resolve_model_dir(args.model_dir.as_deref(), &config);

    let pb = progress_bar()?;
    pb.set_message("Loading image...");
    pb.set_position(10);

    let image = image::open(&args.input)?;

    pb.set_message("Loading OCR models...");
    pb.set_position(30);

    let engine = load_engine(&model_dir, &config)?;
    let pipeline = ContactPipeline::new(engine, classifier, &config.extraction);

    pb.set_message("Recognizing text...");
    pb.set_position(50);

    let lines = pipeline.recognizer().recognize_text(&image)?;
    debug!("Recognized {} lines", lines.len());

    pb.set_message("Classifying lines...");
    pb.set_position(80);

    let result = pipeline.extract_lines(&lines)?;

    pb.finish_and_clear();

    if args.show_lines {
        for line in &lines {
            eprintln!("{} {}", style("│").dim(), line);
        }
    }

    let mut session = SuggestionSession::new(result);
    let draft = if args.interactive {
        output::review(&mut session)?
    } else {
        session.draft()
    };

    if let Some(dir) = &args.save_dir {
        output::save_draft(&draft, dir)?;
    }

    let record = draft.into_record();
    let rendered = output::format_contact(&record, session.result(), args.format)?;
    output::emit(&rendered, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
