//! Lines command - extract a contact from recognized text lines.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use cardex_core::{ExtractionAggregator, SuggestionSession};

use super::output::{self, OutputFormat};
use super::{build_classifier, load_config};

/// Arguments for the lines command.
#[derive(Args)]
pub struct LinesArgs {
    /// Text file with one recognized line per line, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Review each field before output
    #[arg(short, long)]
    interactive: bool,

    /// Save the contact as a vCard into this directory
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

pub async fn run(args: LinesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let text = read_input(&args.input)?;
    let lines = split_lines(&text);

    info!("Classifying {} lines", lines.len());

    let classifier = build_classifier(&config)?;
    let result = ExtractionAggregator::from_config(&config.extraction).aggregate(&lines, &classifier);

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
    output::emit(&rendered, args.output.as_deref())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Input lines with trailing carriage returns removed. Trailing blank lines
/// are dropped; interior blank lines are kept.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\r\nb\n\nc\n\n"), vec!["a", "b", "", "c"]);
        assert!(split_lines("").is_empty());
    }
}
