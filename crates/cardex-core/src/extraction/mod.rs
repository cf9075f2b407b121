//! Contact field extraction from recognized card lines.

mod aggregator;
mod line;
mod result;
pub mod rules;
mod session;

pub use aggregator::{aggregate, ExtractionAggregator};
pub use line::{ClassificationOutcome, LineClassifier};
pub use result::{Category, ExtractionResult, ExtractionResultBuilder, Field};
pub use rules::{
    match_email, match_phone, match_website, FieldExtractor, FieldMatch, FieldMatchers,
    StructuredField,
};
pub use session::{SuggestionCursor, SuggestionSession};
