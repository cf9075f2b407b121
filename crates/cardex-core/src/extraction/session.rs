//! Suggestion cursors for the "try another" interaction.

use crate::models::contact::ContactDraft;

use super::result::{ExtractionResult, Field};

/// Position within one field's candidate list.
///
/// Invariant: `index < candidates.len()` whenever the candidate list is
/// non-empty. With an empty list the cursor is inert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionCursor {
    index: usize,
}

impl SuggestionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Current candidate, if any.
    pub fn current<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        candidates.get(self.index).map(String::as_str)
    }

    /// Move to the next candidate, wrapping after the last one.
    pub fn advance<'a>(&mut self, candidates: &'a [String]) -> Option<&'a str> {
        if candidates.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % candidates.len();
        self.current(candidates)
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

/// An extraction result plus one cursor per field.
///
/// Owned by a single editing session; only the cursors move.
#[derive(Debug, Clone)]
pub struct SuggestionSession {
    result: ExtractionResult,
    cursors: [SuggestionCursor; 6],
}

impl SuggestionSession {
    pub fn new(result: ExtractionResult) -> Self {
        Self {
            result,
            cursors: [SuggestionCursor::default(); 6],
        }
    }

    /// The underlying result.
    pub fn result(&self) -> &ExtractionResult {
        &self.result
    }

    /// Consume the session, returning the result.
    pub fn into_result(self) -> ExtractionResult {
        self.result
    }

    pub fn cursor(&self, field: Field) -> SuggestionCursor {
        self.cursors[field.index()]
    }

    /// Value under the field's cursor, with the `other` fallback for name,
    /// job and company.
    pub fn suggested(&self, field: Field) -> &str {
        self.result.suggestion_at(field, self.cursor(field).index())
    }

    /// Advance the field's cursor and return the new value.
    ///
    /// A no-op returning `""` when the field has no candidates of its own.
    pub fn advance(&mut self, field: Field) -> &str {
        let candidates = self.result.candidates(field);
        self.cursors[field.index()]
            .advance(candidates)
            .unwrap_or_default()
    }

    /// Whether "try another" has anything to offer for this field.
    pub fn can_cycle(&self, field: Field) -> bool {
        self.result.candidates(field).len() > 1
    }

    /// Reset every cursor to the first candidate.
    pub fn reset(&mut self) {
        self.cursors.iter_mut().for_each(SuggestionCursor::reset);
    }

    /// A draft seeded with the current suggestion for every field.
    pub fn draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.suggested(Field::Name).to_string(),
            job_title: self.suggested(Field::Job).to_string(),
            company: self.suggested(Field::Company).to_string(),
            email: self.suggested(Field::Email).to_string(),
            phone: self.suggested(Field::Phone).to_string(),
            website: self.suggested(Field::Website).to_string(),
        }
    }
}

impl From<ExtractionResult> for SuggestionSession {
    fn from(result: ExtractionResult) -> Self {
        Self::new(result)
    }
}
