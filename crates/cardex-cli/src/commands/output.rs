//! Output formatting, interactive review and saving.

use std::path::Path;

use chrono::Utc;
use console::{style, Key, Term};
use serde::Serialize;

use cardex_core::{
    render_vcard, ContactDraft, ContactRecord, ExtractionResult, Field,
    SuggestionSession, VcardSink,
};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output with all candidates
    Json,
    /// CSV output
    Csv,
    /// Plain text summary with alternates
    Text,
    /// vCard 3.0
    Vcard,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
            Self::Vcard => "vcf",
        }
    }
}

/// A finished contact together with every extracted candidate.
#[derive(Serialize)]
struct ContactReport<'a> {
    contact: &'a ContactRecord,
    candidates: &'a ExtractionResult,
}

const CSV_HEADER: [&str; 6] = ["name", "job_title", "company", "email", "phone", "website"];

/// Format a contact in `format`.
pub fn format_contact(
    record: &ContactRecord,
    result: &ExtractionResult,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ContactReport {
            contact: record,
            candidates: result,
        })?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record, result)),
        OutputFormat::Vcard => Ok(render_vcard(record, Utc::now())),
    }
}

fn format_csv(record: &ContactRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(record_fields(record))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Record values in [`CSV_HEADER`] order.
pub fn record_fields(record: &ContactRecord) -> [&str; 6] {
    [
        record.full_name.as_str(),
        record.job_title.as_str(),
        record.organization.as_str(),
        record.email.as_str(),
        record.phone.as_str(),
        record.website.as_str(),
    ]
}

fn format_text(record: &ContactRecord, result: &ExtractionResult) -> String {
    let mut output = String::new();

    for field in Field::ALL {
        let value = match field {
            Field::Name => &record.full_name,
            Field::Job => &record.job_title,
            Field::Company => &record.organization,
            Field::Email => &record.email,
            Field::Phone => &record.phone,
            Field::Website => &record.website,
        };
        output.push_str(&format!("{:<13} {}\n", format!("{}:", field.title()), value));

        let alternates: Vec<&str> = result
            .candidates(field)
            .iter()
            .map(String::as_str)
            .filter(|c| *c != value.as_str())
            .collect();
        if !alternates.is_empty() {
            output.push_str(&format!("{:<13} also: {}\n", "", alternates.join(" | ")));
        }
    }

    if !result.other().is_empty() {
        output.push_str("\nUnclassified:\n");
        for line in result.other() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    output
}

/// Walk every field on the terminal, letting the user cycle, edit or accept.
pub fn review(session: &mut SuggestionSession) -> anyhow::Result<ContactDraft> {
    let term = Term::stderr();
    if !term.is_term() {
        anyhow::bail!("Interactive review requires a terminal");
    }

    let mut draft = session.draft();

    for field in Field::ALL {
        let mut value = draft.get(field).to_string();

        loop {
            term.write_line(&format!(
                "{} {}",
                style(format!("{}:", field.title())).bold(),
                if value.is_empty() {
                    style("(empty)".to_string()).dim()
                } else {
                    style(value.clone()).cyan()
                }
            ))?;

            let hint = if session.can_cycle(field) {
                "[Enter] accept  [n] try another  [e] edit"
            } else {
                "[Enter] accept  [e] edit"
            };
            term.write_line(&format!("  {}", style(hint).dim()))?;

            match term.read_key()? {
                Key::Enter => break,
                Key::Char('n') if session.can_cycle(field) => {
                    value = session.advance(field).to_string();
                }
                Key::Char('e') => {
                    term.write_str("  new value: ")?;
                    value = term.read_line()?.trim().to_string();
                    break;
                }
                _ => {}
            }
        }

        draft.set(field, value);
    }

    Ok(draft)
}

/// Save `draft` as a vCard in `dir`, reporting the outcome.
pub fn save_draft(draft: &ContactDraft, dir: &Path) -> anyhow::Result<bool> {
    let mut sink = VcardSink::new(dir)?;
    let saved = draft.save_to(&mut sink);

    if saved {
        for path in sink.written() {
            eprintln!("{} Saved contact to {}", style("✓").green(), path.display());
        }
    } else {
        eprintln!("{} Contact was not saved", style("✗").red());
    }

    Ok(saved)
}

/// Write `output` to `path`, or stdout.
pub fn emit(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)?;
            eprintln!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => print!("{}", ensure_newline(output)),
    }
    Ok(())
}

fn ensure_newline(output: &str) -> String {
    if output.ends_with('\n') {
        output.to_string()
    } else {
        format!("{}\n", output)
    }
}
