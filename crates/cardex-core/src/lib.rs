//! Core library for business card contact extraction.
//!
//! This crate provides:
//! - Pattern matchers for email, phone and website lines
//! - A pluggable label classifier for names, job titles and companies
//! - Aggregation of OCR lines into ranked per-field candidates
//! - Suggestion cycling, contact drafts and vCard output
//! - An OCR adapter using PaddleOCR models (`native` feature)

pub mod classifier;
pub mod error;
pub mod extraction;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod sink;

pub use classifier::{KeywordClassifier, Label, LabelClassifier, LabelHypothesis, Prediction};
pub use error::{CardError, ClassifierError, RecognitionError, Result, SinkError};
pub use extraction::{
    aggregate, Category, ClassificationOutcome, ExtractionAggregator, ExtractionResult, Field,
    LineClassifier, SuggestionCursor, SuggestionSession,
};
pub use models::config::{CardConfig, ExtractionConfig, RoutingPolicy};
pub use models::contact::{split_full_name, ContactDraft, ContactLabel, ContactRecord};
pub use ocr::{into_reading_order, RecognizedRegion, TextRecognizer};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use pipeline::{ContactPipeline, SelectionTicket, SelectionTracker};
pub use sink::{render_vcard, ContactSink, MemorySink, VcardSink};
