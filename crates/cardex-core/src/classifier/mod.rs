//! Label classifier capability for unstructured card lines.
//!
//! Lines that no pattern matcher claims are handed to a [`LabelClassifier`],
//! which returns ranked `(label, confidence)` predictions. Any implementation
//! (rule-based, statistical, remote) can be plugged in.

mod keyword;

pub use keyword::KeywordClassifier;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// Contact field labels a classifier can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Name,
    Job,
    Company,
    Other,
}

impl Label {
    /// Map a raw classifier label. Only `name`, `job` and `company` are recognized.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "name" => Self::Name,
            "job" => Self::Job,
            "company" => Self::Company,
            _ => Self::Other,
        }
    }

    /// Raw label string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Job => "job",
            Self::Company => "company",
            Self::Other => "other",
        }
    }

    /// Whether this label maps to a dedicated contact field.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Raw prediction as produced by a classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// A normalized label hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelHypothesis {
    pub label: Label,
    pub confidence: f32,
}

impl From<&Prediction> for LabelHypothesis {
    fn from(prediction: &Prediction) -> Self {
        Self {
            label: Label::from_raw(&prediction.label),
            confidence: prediction.confidence,
        }
    }
}

/// Trait for label classifiers.
pub trait LabelClassifier: Send + Sync {
    /// Predict up to `max_hypotheses` labels for `text`, most likely first.
    fn predict_labels(
        &self,
        text: &str,
        max_hypotheses: usize,
    ) -> Result<Vec<Prediction>, ClassifierError>;

    /// Check that the classifier can be invoked at all.
    fn ready(&self) -> Result<(), ClassifierError> {
        Ok(())
    }

    /// Name of this classifier for logging.
    fn name(&self) -> &str {
        "classifier"
    }
}

impl<T: LabelClassifier + ?Sized> LabelClassifier for &T {
    fn predict_labels(
        &self,
        text: &str,
        max_hypotheses: usize,
    ) -> Result<Vec<Prediction>, ClassifierError> {
        (**self).predict_labels(text, max_hypotheses)
    }

    fn ready(&self) -> Result<(), ClassifierError> {
        (**self).ready()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: LabelClassifier + ?Sized> LabelClassifier for Box<T> {
    fn predict_labels(
        &self,
        text: &str,
        max_hypotheses: usize,
    ) -> Result<Vec<Prediction>, ClassifierError> {
        (**self).predict_labels(text, max_hypotheses)
    }

    fn ready(&self) -> Result<(), ClassifierError> {
        (**self).ready()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: LabelClassifier + ?Sized> LabelClassifier for Arc<T> {
    fn predict_labels(
        &self,
        text: &str,
        max_hypotheses: usize,
    ) -> Result<Vec<Prediction>, ClassifierError> {
        (**self).predict_labels(text, max_hypotheses)
    }

    fn ready(&self) -> Result<(), ClassifierError> {
        (**self).ready()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Deterministic classifiers for tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::*;

    /// Returns fixed predictions per exact line text.
    #[derive(Default)]
    pub struct LookupClassifier {
        table: HashMap<String, Vec<Prediction>>,
    }

    impl LookupClassifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, text: &str, predictions: &[(&str, f32)]) -> Self {
            self.table.insert(
                text.to_string(),
                predictions
                    .iter()
                    .map(|(label, confidence)| Prediction::new(*label, *confidence))
                    .collect(),
            );
            self
        }
    }

    impl LabelClassifier for LookupClassifier {
        fn predict_labels(
            &self,
            text: &str,
            max_hypotheses: usize,
        ) -> Result<Vec<Prediction>, ClassifierError> {
            Ok(self
                .table
                .get(text)
                .map(|p| p.iter().take(max_hypotheses).cloned().collect())
                .unwrap_or_default())
        }

        fn name(&self) -> &str {
            "lookup"
        }
    }

    /// Fails every prediction, or reports itself unavailable.
    pub struct BrokenClassifier {
        pub unavailable: bool,
    }

    impl LabelClassifier for BrokenClassifier {
        fn predict_labels(&self, _text: &str, _max: usize) -> Result<Vec<Prediction>, ClassifierError> {
            Err(ClassifierError::Prediction("model crashed".to_string()))
        }

        fn ready(&self) -> Result<(), ClassifierError> {
            if self.unavailable {
                Err(ClassifierError::Unavailable("model not loaded".to_string()))
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_raw() {
        assert_eq!(Label::from_raw("name"), Label::Name);
        assert_eq!(Label::from_raw("job"), Label::Job);
        assert_eq!(Label::from_raw("company"), Label::Company);
        assert_eq!(Label::from_raw("other"), Label::Other);
        assert_eq!(Label::from_raw("Name"), Label::Other);
        assert_eq!(Label::from_raw("address"), Label::Other);
    }

    #[test]
    fn test_hypothesis_from_prediction() {
        let hyp = LabelHypothesis::from(&Prediction::new("company", 0.7));
        assert_eq!(hyp.label, Label::Company);
        assert!((hyp.confidence - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_blanket_impls_delegate() {
        let lookup = testing::LookupClassifier::new().with("Acme", &[("company", 0.9)]);
        let boxed: Box<dyn LabelClassifier> = Box::new(lookup);
        let shared = Arc::new(boxed);

        let predictions = shared.predict_labels("Acme", 3).unwrap();
        assert_eq!(predictions, vec![Prediction::new("company", 0.9)]);
        assert_eq!(shared.name(), "lookup");
    }
}
