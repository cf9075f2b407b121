//! Website matching.

use super::patterns::WEBSITE;
use super::{find_trimmed, FieldExtractor, FieldMatch, StructuredField};

/// Website field matcher.
#[derive(Debug, Clone, Default)]
pub struct WebsiteMatcher;

impl WebsiteMatcher {
    /// Create a new website matcher.
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for WebsiteMatcher {
    fn field(&self) -> StructuredField {
        StructuredField::Website
    }

    fn extract(&self, text: &str) -> Option<FieldMatch> {
        find_trimmed(&WEBSITE, text)
    }
}

/// Extract the first website in `text`.
pub fn match_website(text: &str) -> Option<String> {
    WebsiteMatcher::new().extract(text).map(|m| m.value)
}
