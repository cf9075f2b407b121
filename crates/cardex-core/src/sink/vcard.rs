//! vCard 3.0 output.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::SinkError;
use crate::models::contact::{ContactLabel, ContactRecord};

use super::ContactSink;

/// Render `record` as a vCard 3.0 document with CRLF line endings.
///
/// Empty email, phone and URL values are omitted. Output is deterministic
/// for a given `revision`.
pub fn render_vcard(record: &ContactRecord, revision: DateTime<Utc>) -> String {
    let label = match record.value_label() {
        ContactLabel::Home => "HOME",
        ContactLabel::Work => "WORK",
    };

    let mut lines: Vec<String> = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];

    lines.push(format!(
        "N:{};{};;;",
        escape(record.family_name()),
        escape(record.given_name())
    ));
    lines.push(format!("FN:{}", escape(&record.full_name)));

    if !record.organization.is_empty() {
        lines.push(format!("ORG:{}", escape(&record.organization)));
    }
    if !record.job_title.is_empty() {
        lines.push(format!("TITLE:{}", escape(&record.job_title)));
    }
    if !record.email.is_empty() {
        lines.push(format!("EMAIL;TYPE=INTERNET,{}:{}", label, escape(&record.email)));
    }
    if !record.phone.is_empty() {
        lines.push(format!("TEL;TYPE={}:{}", label, escape(&record.phone)));
    }
    if !record.website.is_empty() {
        lines.push(format!("URL;TYPE={}:{}", label, escape(&record.website)));
    }

    lines.push(format!("REV:{}", revision.format("%Y-%m-%dT%H:%M:%SZ")));
    lines.push("END:VCARD".to_string());

    let mut out = String::new();
    for line in lines {
        let _ = write!(out, "{}\r\n", line);
    }
    out
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ',' => escaped.push_str("\\,"),
            ';' => escaped.push_str("\\;"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

/// Writes one `.vcf` file per saved contact into a directory.
#[derive(Debug, Clone)]
pub struct VcardSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl VcardSink {
    /// Create a sink writing into `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// First free `<stem>.vcf`, `<stem>-2.vcf`, ... path.
    fn next_path(&self, record: &ContactRecord) -> PathBuf {
        let stem = file_stem(record);
        let mut path = self.dir.join(format!("{}.vcf", stem));
        let mut n = 2;
        while path.exists() {
            path = self.dir.join(format!("{}-{}.vcf", stem, n));
            n += 1;
        }
        path
    }
}

fn file_stem(record: &ContactRecord) -> String {
    let source = if record.full_name.is_empty() {
        &record.organization
    } else {
        &record.full_name
    };

    let slug: String = source
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "contact".to_string()
    } else {
        slug
    }
}

impl ContactSink for VcardSink {
    fn save(&mut self, record: &ContactRecord) -> Result<(), SinkError> {
        if record.is_empty() {
            return Err(SinkError::Rejected("contact has no values".to_string()));
        }

        let path = self.next_path(record);
        std::fs::write(&path, render_vcard(record, Utc::now()))?;
        debug!("Wrote vCard to {}", path.display());

        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn revision() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_render_work_contact() {
        let record = ContactRecord {
            full_name: "Mary Jane Watson".to_string(),
            job_title: "Photographer".to_string(),
            organization: "Daily Bugle".to_string(),
            email: "mj@bugle.example.com".to_string(),
            phone: "(212) 555-0142".to_string(),
            website: "www.bugle.example.com".to_string(),
        };

        let expected = [
            "BEGIN:VCARD",
            "VERSION:3.0",
            "N:Watson;Mary Jane;;;",
            "FN:Mary Jane Watson",
            "ORG:Daily Bugle",
            "TITLE:Photographer",
            "EMAIL;TYPE=INTERNET,WORK:mj@bugle.example.com",
            "TEL;TYPE=WORK:(212) 555-0142",
            "URL;TYPE=WORK:www.bugle.example.com",
            "REV:2024-03-01T12:00:00Z",
            "END:VCARD",
            "",
        ]
        .join("\r\n");

        assert_eq!(render_vcard(&record, revision()), expected);
    }

    #[test]
    fn test_render_home_contact_omits_empty_values() {
        let record = ContactRecord {
            full_name: "Prince".to_string(),
            phone: "416-555-0199".to_string(),
            ..ContactRecord::default()
        };
        let card = render_vcard(&record, revision());

        assert!(card.contains("N:;Prince;;;\r\n"));
        assert!(card.contains("TEL;TYPE=HOME:416-555-0199\r\n"));
        assert!(!card.contains("EMAIL"));
        assert!(!card.contains("URL"));
        assert!(!card.contains("ORG"));
    }

    #[test]
    fn test_escaping() {
        let record = ContactRecord {
            full_name: "Smith, John".to_string(),
            organization: "A;B\\C".to_string(),
            ..ContactRecord::default()
        };
        let card = render_vcard(&record, revision());

        assert!(card.contains("FN:Smith\\, John\r\n"));
        assert!(card.contains("ORG:A\\;B\\\\C\r\n"));
    }

    #[test]
    fn test_sink_writes_unique_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = VcardSink::new(dir.path().join("cards")).unwrap();
        let record = ContactRecord {
            full_name: "Jo Bloggs".to_string(),
            ..ContactRecord::default()
        };

        sink.save(&record).unwrap();
        sink.save(&record).unwrap();

        let names: Vec<String> = sink
            .written()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["jo-bloggs.vcf", "jo-bloggs-2.vcf"]);

        let content = std::fs::read_to_string(&sink.written()[0]).unwrap();
        assert!(content.starts_with("BEGIN:VCARD\r\n"));
    }

    #[test]
    fn test_file_stem_fallbacks() {
        let record = ContactRecord {
            organization: "Acme Corp.".to_string(),
            ..ContactRecord::default()
        };
        assert_eq!(file_stem(&record), "acme-corp");
        assert_eq!(file_stem(&ContactRecord::default()), "contact");
    }
}
