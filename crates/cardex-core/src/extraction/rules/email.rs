//! Email address matching.

use super::patterns::EMAIL;
use super::{find_trimmed, FieldExtractor, FieldMatch, StructuredField};

/// Email field matcher.
#[derive(Debug, Clone, Default)]
pub struct EmailMatcher;

impl EmailMatcher {
    /// Create a new email matcher.
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for EmailMatcher {
    fn field(&self) -> StructuredField {
        StructuredField::Email
    }

    fn extract(&self, text: &str) -> Option<FieldMatch> {
        find_trimmed(&EMAIL, text)
    }
}

/// Extract the email address that ends `text`.
pub fn match_email(text: &str) -> Option<String> {
    EmailMatcher::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_email_plain() {
        assert_eq!(match_email("john@acme.com"), Some("john@acme.com".to_string()));
        assert_eq!(
            match_email("first.last+cards@mail.example.org"),
            Some("first.last+cards@mail.example.org".to_string())
        );
    }

    #[test]
    fn test_match_email_with_prefix() {
        assert_eq!(match_email("Email: jane_doe@acme.co"), Some("jane_doe@acme.co".to_string()));
        assert_eq!(match_email("visit john@site.com"), Some("john@site.com".to_string()));
    }

    #[test]
    fn test_match_email_uppercase() {
        assert_eq!(match_email("JOHN@ACME.COM"), Some("JOHN@ACME.COM".to_string()));
    }

    #[test]
    fn test_match_email_must_end_line() {
        assert_eq!(match_email("john@acme.com (work)"), None);
        assert_eq!(match_email("john@acme.com  "), Some("john@acme.com".to_string()));
    }

    #[test]
    fn test_match_email_rejects_non_emails() {
        assert_eq!(match_email("John Smith"), None);
        assert_eq!(match_email("@acme.com"), None);
        assert_eq!(match_email("john@acme"), None);
        assert_eq!(match_email("john@acme.c"), None);
        assert_eq!(match_email(""), None);
    }

    #[test]
    fn test_match_email_is_idempotent() {
        let inputs = [
            "john@acme.com",
            "Email: jane@acme.co",
            "a.b.c@d.e.fg",
            "contact me at x+y@z-q.info",
            "no email here",
            "Ünïcödé ☃ mail@ex.am",
        ];

        for input in inputs {
            if let Some(found) = match_email(input) {
                assert_eq!(match_email(&found), Some(found.clone()), "input: {}", input);
            }
        }
    }
}
