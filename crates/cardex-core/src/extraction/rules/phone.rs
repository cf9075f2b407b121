//! North American phone number matching.

use super::patterns::{PHONE_LENIENT, PHONE_NANP};
use super::{find_trimmed, FieldExtractor, FieldMatch, StructuredField};

/// Phone number matcher.
#[derive(Debug, Clone)]
pub struct PhoneMatcher {
    strict_nanp: bool,
}

impl PhoneMatcher {
    /// Create a new phone matcher with strict NANP rules.
    pub fn new() -> Self {
        Self { strict_nanp: true }
    }

    /// Set whether the exchange must satisfy NANP rules.
    ///
    /// Area code rules apply in both modes.
    pub fn with_strict_nanp(mut self, strict: bool) -> Self {
        self.strict_nanp = strict;
        self
    }
}

impl Default for PhoneMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneMatcher {
    fn field(&self) -> StructuredField {
        StructuredField::Phone
    }

    fn extract(&self, text: &str) -> Option<FieldMatch> {
        let pattern = if self.strict_nanp {
            &*PHONE_NANP
        } else {
            &*PHONE_LENIENT
        };
        find_trimmed(pattern, text)
    }
}

/// Extract the phone number that ends `text` using strict NANP rules.
pub fn match_phone(text: &str) -> Option<String> {
    PhoneMatcher::new().extract(text).map(|m| m.value)
}
