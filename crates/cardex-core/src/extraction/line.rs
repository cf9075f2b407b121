//! Per-line classification: pattern matchers first, label classifier second.

use tracing::{trace, warn};

use crate::classifier::{LabelClassifier, LabelHypothesis};
use crate::models::config::ExtractionConfig;

use super::rules::{FieldMatchers, StructuredField};

/// Outcome of classifying a single OCR line.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationOutcome {
    Email(String),
    Phone(String),
    Website(String),
    /// Accepted hypotheses, most confident first. At least one has a
    /// recognized label.
    Labeled(Vec<LabelHypothesis>),
    Unclassified,
}

/// Classifies one line at a time.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    matchers: FieldMatchers,
    max_hypotheses: usize,
    min_confidence: f32,
}

impl LineClassifier {
    /// Create a line classifier with default settings.
    pub fn new() -> Self {
        Self {
            matchers: FieldMatchers::new(),
            max_hypotheses: 3,
            min_confidence: 0.0,
        }
    }

    /// Create a line classifier from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_strict_nanp(config.strict_nanp)
            .with_max_hypotheses(config.max_hypotheses)
            .with_min_confidence(config.min_label_confidence)
    }

    /// Set NANP strictness for phone numbers.
    pub fn with_strict_nanp(mut self, strict: bool) -> Self {
        self.matchers = FieldMatchers::new().with_strict_nanp(strict);
        self
    }

    /// Set the number of hypotheses requested per line.
    pub fn with_max_hypotheses(mut self, max: usize) -> Self {
        self.max_hypotheses = max;
        self
    }

    /// Set the minimum accepted hypothesis confidence.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence;
        self
    }

    /// Classify `line`.
    ///
    /// Never fails: classifier errors degrade to [`ClassificationOutcome::Unclassified`].
    pub fn classify<C: LabelClassifier + ?Sized>(
        &self,
        line: &str,
        classifier: &C,
    ) -> ClassificationOutcome {
        if let Some((field, found)) = self.matchers.first_match(line) {
            trace!("Line {:?} matched {:?}", line, field);
            return match field {
                StructuredField::Email => ClassificationOutcome::Email(found.value),
                StructuredField::Phone => ClassificationOutcome::Phone(found.value),
                StructuredField::Website => ClassificationOutcome::Website(found.value),
            };
        }

        if line.trim().is_empty() {
            return ClassificationOutcome::Unclassified;
        }

        let predictions = match classifier.predict_labels(line, self.max_hypotheses) {
            Ok(predictions) => predictions,
            Err(e) => {
                warn!(
                    "Classifier {} failed on line {:?}: {}",
                    classifier.name(),
                    line,
                    e
                );
                return ClassificationOutcome::Unclassified;
            }
        };

        let mut hypotheses: Vec<LabelHypothesis> = predictions
            .iter()
            .take(self.max_hypotheses)
            .map(LabelHypothesis::from)
            .filter(|h| h.confidence.is_finite() && h.confidence >= self.min_confidence)
            .collect();

        if !hypotheses.iter().any(|h| h.label.is_recognized()) {
            return ClassificationOutcome::Unclassified;
        }

        hypotheses.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        ClassificationOutcome::Labeled(hypotheses)
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::testing::{BrokenClassifier, LookupClassifier};
    use crate::classifier::Label;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_structured_fields_short_circuit() {
        // the classifier would call every line a name
        let classifier = LookupClassifier::new()
            .with("john@acme.com", &[("name", 0.99)])
            .with("acme.com", &[("company", 0.99)]);
        let lines = LineClassifier::new();

        assert_eq!(
            lines.classify("john@acme.com", &classifier),
            ClassificationOutcome::Email("john@acme.com".to_string())
        );
        assert_eq!(
            lines.classify("acme.com", &classifier),
            ClassificationOutcome::Website("acme.com".to_string())
        );
        assert_eq!(
            lines.classify("Phone: 416-555-0199", &classifier),
            ClassificationOutcome::Phone("416-555-0199".to_string())
        );
    }

    #[test]
    fn test_labeled_hypotheses_sorted() {
        let classifier =
            LookupClassifier::new().with("Acme Founder", &[("job", 0.4), ("company", 0.7)]);
        let outcome = LineClassifier::new().classify("Acme Founder", &classifier);

        match outcome {
            ClassificationOutcome::Labeled(hyps) => {
                let labels: Vec<Label> = hyps.iter().map(|h| h.label).collect();
                assert_eq!(labels, vec![Label::Company, Label::Job]);
            }
            other => panic!("expected labeled outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_only_unrecognized_labels_is_unclassified() {
        let classifier =
            LookupClassifier::new().with("123 Main St", &[("address", 0.9), ("other", 0.6)]);
        assert_eq!(
            LineClassifier::new().classify("123 Main St", &classifier),
            ClassificationOutcome::Unclassified
        );
    }

    #[test]
    fn test_no_hypotheses_is_unclassified() {
        let classifier = LookupClassifier::new();
        assert_eq!(
            LineClassifier::new().classify("Suite 400", &classifier),
            ClassificationOutcome::Unclassified
        );
    }

    #[test]
    fn test_min_confidence_filters_hypotheses() {
        let classifier = LookupClassifier::new().with("Jo Bloggs", &[("name", 0.2)]);
        let lines = LineClassifier::new().with_min_confidence(0.5);
        assert_eq!(
            lines.classify("Jo Bloggs", &classifier),
            ClassificationOutcome::Unclassified
        );
    }

    #[test]
    fn test_non_finite_confidence_discarded() {
        let classifier = LookupClassifier::new().with("Jo Bloggs", &[("name", f32::NAN)]);
        assert_eq!(
            LineClassifier::new().classify("Jo Bloggs", &classifier),
            ClassificationOutcome::Unclassified
        );
    }

    #[test]
    fn test_classifier_failure_degrades() {
        let classifier = BrokenClassifier { unavailable: false };
        assert_eq!(
            LineClassifier::new().classify("Jane Doe", &classifier),
            ClassificationOutcome::Unclassified
        );
    }

    #[test]
    fn test_blank_line_skips_classifier() {
        let classifier = BrokenClassifier { unavailable: false };
        assert_eq!(
            LineClassifier::new().classify("   ", &classifier),
            ClassificationOutcome::Unclassified
        );
    }
}
