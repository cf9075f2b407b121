//! Rule-based label classifier using keyword lexicons.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ClassifierError;
use crate::models::config::ClassifierConfig;

use super::{LabelClassifier, Prediction};

/// Lowercase name particles allowed between capitalized name tokens.
const NAME_PARTICLES: &[&str] = &["da", "de", "del", "der", "di", "la", "le", "van", "von"];

/// Keyword lexicon file format.
#[derive(Debug, Deserialize)]
struct Lexicon {
    job_keywords: Vec<String>,
    company_keywords: Vec<String>,
}

/// Deterministic classifier scoring lines against job and company keyword
/// lexicons, with a capitalization heuristic for person names.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    job_keywords: HashSet<String>,
    company_keywords: HashSet<String>,
    name_min_tokens: usize,
    name_max_tokens: usize,
}

impl KeywordClassifier {
    /// Create a classifier with the default lexicons.
    pub fn new() -> Self {
        let config = ClassifierConfig::default();
        Self::with_keywords(&config, &config.job_keywords, &config.company_keywords)
    }

    /// Create a classifier from configuration.
    ///
    /// When `lexicon_file` is set, its keyword lists replace the configured
    /// ones; an unreadable or malformed lexicon makes the classifier unavailable.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        match &config.lexicon_file {
            Some(path) => {
                let lexicon = load_lexicon(path)?;
                debug!(
                    "Loaded lexicon from {}: {} job, {} company keywords",
                    path.display(),
                    lexicon.job_keywords.len(),
                    lexicon.company_keywords.len()
                );
                Ok(Self::with_keywords(
                    config,
                    &lexicon.job_keywords,
                    &lexicon.company_keywords,
                ))
            }
            None => Ok(Self::with_keywords(
                config,
                &config.job_keywords,
                &config.company_keywords,
            )),
        }
    }

    fn with_keywords(config: &ClassifierConfig, job: &[String], company: &[String]) -> Self {
        Self {
            job_keywords: job.iter().map(|k| k.to_lowercase()).collect(),
            company_keywords: company.iter().map(|k| k.to_lowercase()).collect(),
            name_min_tokens: config.name_min_tokens,
            name_max_tokens: config.name_max_tokens,
        }
    }

    /// Whether `text` has the shape of a person name.
    fn looks_like_name(&self, text: &str) -> bool {
        let tokens: Vec<&str> = text.split_whitespace().collect();

        if tokens.len() < self.name_min_tokens || tokens.len() > self.name_max_tokens {
            return false;
        }

        let last = tokens.len() - 1;
        tokens.iter().enumerate().all(|(i, token)| {
            if i > 0 && i < last && NAME_PARTICLES.contains(token) {
                return true;
            }

            let valid_chars = token
                .chars()
                .all(|c| c.is_alphabetic() || matches!(c, '-' | '\'' | '.'));
            let capitalized = token.chars().next().is_some_and(|c| c.is_uppercase());

            valid_chars && capitalized
        })
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn load_lexicon(path: &Path) -> Result<Lexicon, ClassifierError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ClassifierError::Unavailable(format!("cannot read lexicon {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        ClassifierError::Unavailable(format!("invalid lexicon {}: {}", path.display(), e))
    })
}

/// Lowercased words with surrounding punctuation removed.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || matches!(c, ',' | '/' | '|'))
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Confidence grows with the number of keyword hits.
fn keyword_confidence(hits: usize) -> f32 {
    (0.75 + 0.1 * (hits.saturating_sub(1) as f32)).min(0.95)
}

impl LabelClassifier for KeywordClassifier {
    fn predict_labels(
        &self,
        text: &str,
        max_hypotheses: usize,
    ) -> Result<Vec<Prediction>, ClassifierError> {
        let words = words(text);

        let job_hits = words.iter().filter(|w| self.job_keywords.contains(*w)).count();
        let company_hits = words
            .iter()
            .filter(|w| self.company_keywords.contains(*w))
            .count()
            + usize::from(text.contains('&'));

        let mut predictions = Vec::new();

        if job_hits > 0 {
            predictions.push(Prediction::new("job", keyword_confidence(job_hits)));
        }
        if company_hits > 0 {
            predictions.push(Prediction::new("company", keyword_confidence(company_hits)));
        }
        if job_hits == 0 && company_hits == 0 && self.looks_like_name(text) {
            predictions.push(Prediction::new("name", 0.8));
        }
        if predictions.is_empty() && text.chars().any(char::is_alphabetic) {
            predictions.push(Prediction::new("other", 0.5));
        }

        predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        predictions.truncate(max_hypotheses);

        Ok(predictions)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(classifier: &KeywordClassifier, text: &str) -> Vec<String> {
        classifier
            .predict_labels(text, 3)
            .unwrap()
            .into_iter()
            .map(|p| p.label)
            .collect()
    }

    #[test]
    fn test_job_titles() {
        let classifier = KeywordClassifier::new();
        assert_eq!(labels(&classifier, "Senior Software Engineer"), vec!["job"]);
        assert_eq!(labels(&classifier, "VP, Marketing"), vec!["job"]);

        let predictions = classifier.predict_labels("Senior Software Engineer", 3).unwrap();
        assert!((predictions[0].confidence - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_company_names() {
        let classifier = KeywordClassifier::new();
        assert_eq!(labels(&classifier, "Acme Corp"), vec!["company"]);
        assert_eq!(labels(&classifier, "Acme Corp."), vec!["company"]);
        assert_eq!(labels(&classifier, "Smith & Sons"), vec!["company"]);
    }

    #[test]
    fn test_person_names() {
        let classifier = KeywordClassifier::new();
        assert_eq!(labels(&classifier, "John Smith"), vec!["name"]);
        assert_eq!(labels(&classifier, "Mary Jane Watson"), vec!["name"]);
        assert_eq!(labels(&classifier, "Ludwig van Beethoven"), vec!["name"]);
        assert_eq!(labels(&classifier, "J. R. Hartley"), vec!["name"]);
    }

    #[test]
    fn test_unlabeled_lines() {
        let classifier = KeywordClassifier::new();
        assert_eq!(labels(&classifier, "123 Main Street"), vec!["other"]);
        assert_eq!(labels(&classifier, "prince"), vec!["other"]);
        assert!(labels(&classifier, "12345").is_empty());
    }

    #[test]
    fn test_multiple_hypotheses_ranked() {
        let classifier = KeywordClassifier::new();
        let predictions = classifier
            .predict_labels("Founder & CEO, Acme Labs Inc", 3)
            .unwrap();

        let labels: Vec<&str> = predictions.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["company", "job"]);
        assert!(predictions[0].confidence >= predictions[1].confidence);
    }

    #[test]
    fn test_max_hypotheses_truncates() {
        let classifier = KeywordClassifier::new();
        let predictions = classifier
            .predict_labels("Founder & CEO, Acme Labs Inc", 1)
            .unwrap();
        assert_eq!(predictions.len(), 1);
        assert!(classifier.predict_labels("Acme Corp", 0).unwrap().is_empty());
    }

    #[test]
    fn test_lexicon_file_replaces_keywords() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(
            &path,
            r#"{"job_keywords": ["wizard"], "company_keywords": ["guild"]}"#,
        )
        .unwrap();

        let config = ClassifierConfig {
            lexicon_file: Some(path),
            ..ClassifierConfig::default()
        };
        let classifier = KeywordClassifier::from_config(&config).unwrap();

        assert_eq!(labels(&classifier, "Chief Wizard"), vec!["job"]);
        assert_eq!(labels(&classifier, "Mages Guild"), vec!["company"]);
        assert_eq!(labels(&classifier, "Acme Corp"), vec!["name"]);
    }

    #[test]
    fn test_missing_lexicon_is_unavailable() {
        let config = ClassifierConfig {
            lexicon_file: Some("/nonexistent/lexicon.json".into()),
            ..ClassifierConfig::default()
        };

        let err = KeywordClassifier::from_config(&config).unwrap_err();
        assert!(matches!(err, ClassifierError::Unavailable(_)));
    }
}
