//! Rule-based matchers for structured business card fields.
//!
//! Matchers are authoritative: when one claims a line, the line is never
//! handed to the probabilistic label classifier.

pub mod email;
pub mod patterns;
pub mod phone;
pub mod website;

pub use email::{match_email, EmailMatcher};
pub use phone::{match_phone, PhoneMatcher};
pub use website::{match_website, WebsiteMatcher};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structured fields recognized by pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuredField {
    Email,
    Phone,
    Website,
}

/// A pattern match within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    /// The matched substring.
    pub value: String,
    /// Byte offset of the match start in the original line.
    pub start: usize,
    /// Byte offset of the match end in the original line.
    pub end: usize,
}

/// Trait for structured field matchers.
pub trait FieldExtractor {
    /// The field this matcher recognizes.
    fn field(&self) -> StructuredField;

    /// Return the first match in `text`, if any.
    fn extract(&self, text: &str) -> Option<FieldMatch>;

    /// Whether `text` contains a match.
    fn is_match(&self, text: &str) -> bool {
        self.extract(text).is_some()
    }
}

/// Run `pattern` against `text` with surrounding whitespace removed.
///
/// Offsets in the returned match refer to the untrimmed `text`.
pub(crate) fn find_trimmed(pattern: &Regex, text: &str) -> Option<FieldMatch> {
    let leading = text.len() - text.trim_start().len();
    let trimmed = text.trim();

    pattern.find(trimmed).map(|m| FieldMatch {
        value: m.as_str().to_string(),
        start: leading + m.start(),
        end: leading + m.end(),
    })
}

/// The three structured matchers in precedence order: email, phone, website.
#[derive(Debug, Clone, Default)]
pub struct FieldMatchers {
    email: EmailMatcher,
    phone: PhoneMatcher,
    website: WebsiteMatcher,
}

impl FieldMatchers {
    /// Create matchers with default settings (strict NANP phone rules).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether phone numbers must satisfy the NANP exchange rules.
    pub fn with_strict_nanp(mut self, strict: bool) -> Self {
        self.phone = PhoneMatcher::new().with_strict_nanp(strict);
        self
    }

    /// Return the first matcher (in precedence order) that claims `line`.
    pub fn first_match(&self, line: &str) -> Option<(StructuredField, FieldMatch)> {
        let matchers: [&dyn FieldExtractor; 3] = [&self.email, &self.phone, &self.website];

        matchers
            .iter()
            .find_map(|m| m.extract(line).map(|found| (m.field(), found)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_email_takes_precedence_over_website() {
        let matchers = FieldMatchers::new();
        let (field, found) = matchers.first_match("visit john@site.com").unwrap();

        assert_eq!(field, StructuredField::Email);
        assert_eq!(found.value, "john@site.com");
        assert_eq!(found.start, 6);
    }

    #[test]
    fn test_phone_takes_precedence_over_website() {
        let matchers = FieldMatchers::new();
        let (field, _) = matchers.first_match("Tel 416.555.0199").unwrap();
        assert_eq!(field, StructuredField::Phone);
    }

    #[test]
    fn test_no_match_for_plain_text() {
        let matchers = FieldMatchers::new();
        assert!(matchers.first_match("John Smith").is_none());
        assert!(matchers.first_match("Senior Engineer").is_none());
        assert!(matchers.first_match("").is_none());
    }

    #[test]
    fn test_offsets_account_for_leading_whitespace() {
        let found = find_trimmed(&patterns::EMAIL, "   jane@acme.io  ").unwrap();
        assert_eq!(found.value, "jane@acme.io");
        assert_eq!(found.start, 3);
        assert_eq!(found.end, 15);
    }

    #[test]
    fn test_lenient_phone_rules() {
        let strict = FieldMatchers::new();
        let lenient = FieldMatchers::new().with_strict_nanp(false);

        assert!(strict.first_match("555-123-4567").is_none());
        assert_eq!(
            lenient.first_match("555-123-4567").map(|(f, _)| f),
            Some(StructuredField::Phone)
        );
    }
}
