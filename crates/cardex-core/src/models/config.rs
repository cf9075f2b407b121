//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the cardex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Line classification and aggregation configuration.
    pub extraction: ExtractionConfig,

    /// Built-in keyword classifier configuration.
    pub classifier: ClassifierConfig,

    /// OCR model configuration.
    pub models: ModelConfig,
}

/// OCR adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Drop recognized regions below this confidence (0.0 - 1.0).
    pub min_confidence: f32,

    /// Keep `[UNK]` tokens emitted by the recognizer.
    pub keep_unk: bool,

    /// Vertical distance (pixels) within which regions share a reading row.
    pub row_height: f32,

    /// Maximum image dimension (longer side) for processing.
    pub max_image_size: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            keep_unk: false,
            row_height: 20.0,
            max_image_size: 2048,
        }
    }
}

/// How a line with several label hypotheses is routed to categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingPolicy {
    /// Append the line to the category of every accepted hypothesis.
    #[default]
    AllHypotheses,
    /// Append the line only to the category of the most confident hypothesis.
    TopOnly,
}

/// Line classification and aggregation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Require phone exchanges to follow NANP rules.
    pub strict_nanp: bool,

    /// Maximum hypotheses requested from the label classifier per line.
    pub max_hypotheses: usize,

    /// Hypotheses below this confidence are discarded.
    pub min_label_confidence: f32,

    /// Multi-hypothesis routing policy.
    pub routing: RoutingPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strict_nanp: true,
            max_hypotheses: 3,
            min_label_confidence: 0.0,
            routing: RoutingPolicy::AllHypotheses,
        }
    }
}

/// Keyword classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Words that mark a job title (matched case-insensitively per token).
    pub job_keywords: Vec<String>,

    /// Words that mark a company name (matched case-insensitively per token).
    pub company_keywords: Vec<String>,

    /// Minimum token count for a line to look like a person name.
    pub name_min_tokens: usize,

    /// Maximum token count for a line to look like a person name.
    pub name_max_tokens: usize,

    /// Optional JSON lexicon replacing the keyword lists above.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_file: Option<PathBuf>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            job_keywords: to_strings(DEFAULT_JOB_KEYWORDS),
            company_keywords: to_strings(DEFAULT_COMPANY_KEYWORDS),
            name_min_tokens: 2,
            name_max_tokens: 4,
            lexicon_file: None,
        }
    }
}

const DEFAULT_JOB_KEYWORDS: &[&str] = &[
    "accountant", "administrator", "advisor", "agent", "analyst", "architect", "assistant",
    "associate", "attorney", "broker", "ceo", "cfo", "chief", "consultant", "coo", "coordinator",
    "cto", "designer", "developer", "director", "editor", "engineer", "executive", "founder",
    "head", "intern", "junior", "jr", "lawyer", "lead", "manager", "officer", "owner", "partner",
    "president", "principal", "producer", "professor", "recruiter", "representative",
    "scientist", "senior", "specialist", "sr", "strategist", "technician", "vp",
];

const DEFAULT_COMPANY_KEYWORDS: &[&str] = &[
    "ag", "agency", "associates", "bank", "co", "company", "consulting", "corp", "corporation",
    "enterprises", "gmbh", "group", "holdings", "inc", "incorporated", "industries", "institute",
    "labs", "limited", "llc", "llp", "ltd", "partners", "plc", "solutions", "studio", "studios",
    "systems", "technologies", "university", "ventures",
];

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// OCR model file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

impl ModelConfig {
    /// Whether the detection and recognition models exist in `dir`.
    pub fn models_present(&self, dir: &std::path::Path) -> bool {
        dir.join(&self.detection_model).exists() && dir.join(&self.recognition_model).exists()
    }
}

impl CardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CardConfig =
            serde_json::from_str(r#"{"extraction": {"routing": "top_only"}}"#).unwrap();

        assert_eq!(config.extraction.routing, RoutingPolicy::TopOnly);
        assert!(config.extraction.strict_nanp);
        assert_eq!(config.extraction.max_hypotheses, 3);
        assert_eq!(config.classifier.name_max_tokens, 4);
        assert!(config.classifier.job_keywords.iter().any(|k| k == "engineer"));
    }

    #[test]
    fn test_config_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CardConfig::default();
        config.extraction.strict_nanp = false;
        config.ocr.row_height = 12.5;
        config.save(&path).unwrap();

        let loaded = CardConfig::from_file(&path).unwrap();
        assert!(!loaded.extraction.strict_nanp);
        assert_eq!(loaded.ocr.row_height, 12.5);
    }

    #[test]
    fn test_invalid_config_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = CardConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_model_path() {
        let config = CardConfig::default();
        assert_eq!(
            config.model_path(&config.models.detection_model),
            PathBuf::from("models/det.onnx")
        );
    }
}
