//! End-to-end extraction: image to suggestion session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use image::DynamicImage;
use tracing::{debug, info};

use crate::classifier::LabelClassifier;
use crate::error::Result;
use crate::extraction::{ExtractionAggregator, ExtractionResult, SuggestionSession};
use crate::models::config::ExtractionConfig;
use crate::ocr::TextRecognizer;

/// Runs OCR, then line classification and aggregation.
pub struct ContactPipeline<R, C> {
    recognizer: R,
    classifier: C,
    aggregator: ExtractionAggregator,
}

impl<R: TextRecognizer, C: LabelClassifier> ContactPipeline<R, C> {
    /// Create a pipeline from its two capabilities.
    pub fn new(recognizer: R, classifier: C, config: &ExtractionConfig) -> Self {
        Self {
            recognizer,
            classifier,
            aggregator: ExtractionAggregator::from_config(config),
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// Extract candidates from an image.
    ///
    /// Fails when the classifier is not ready, OCR fails, or no text is found.
    pub fn extract(&self, image: &DynamicImage) -> Result<ExtractionResult> {
        let start = Instant::now();

        self.classifier.ready()?;
        let lines = self.recognizer.recognize_text(image)?;
        debug!("Recognized {} lines", lines.len());

        let result = self.aggregator.aggregate(&lines, &self.classifier);

        info!(
            "Extracted {} candidates from image in {}ms",
            result.total_entries(),
            start.elapsed().as_millis()
        );

        Ok(result)
    }

    /// Extract candidates from already-recognized lines.
    pub fn extract_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<ExtractionResult> {
        self.classifier.ready()?;
        Ok(self.aggregator.aggregate(lines, &self.classifier))
    }

    /// Extract and open a suggestion session.
    pub fn session(&self, image: &DynamicImage) -> Result<SuggestionSession> {
        self.extract(image).map(SuggestionSession::new)
    }
}

/// Identifies one image selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket(u64);

impl SelectionTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Tracks the current image selection so results for superseded selections
/// can be discarded.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    generation: AtomicU64,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection, superseding any earlier one.
    pub fn select(&self) -> SelectionTicket {
        SelectionTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Invalidate every outstanding ticket.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// `Some(value)` if `ticket` still names the current selection.
    pub fn accept<T>(&self, ticket: SelectionTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            debug!(
                "Discarding result for stale selection {} (current {})",
                ticket.0,
                self.generation.load(Ordering::SeqCst)
            );
            None
        }
    }
}
