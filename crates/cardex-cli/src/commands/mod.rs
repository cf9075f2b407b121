//! CLI subcommands and shared setup.

pub mod batch;
pub mod config;
pub mod lines;
pub mod output;
pub mod process;

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use cardex_core::models::config::CardConfig;
use cardex_core::{KeywordClassifier, LabelClassifier, PureOcrEngine};

/// Load configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CardConfig> {
    if let Some(path) = config_path {
        return CardConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e));
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(CardConfig::from_file(&default_path)?)
    } else {
        Ok(CardConfig::default())
    }
}

/// Build the keyword classifier and check that it can run.
pub fn build_classifier(config: &CardConfig) -> anyhow::Result<KeywordClassifier> {
    let classifier = KeywordClassifier::from_config(&config.classifier)?;
    classifier.ready()?;
    Ok(classifier)
}

/// Model directory: explicit flag, configured directory, then the user data dir.
pub fn resolve_model_dir(explicit: Option<&Path>, config: &CardConfig) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if config.models.models_present(&config.models.model_dir) {
        return config.models.model_dir.clone();
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardex")
        .join("models")
}

/// Load the OCR engine, failing with a readable message if models are missing.
pub fn load_engine(model_dir: &Path, config: &CardConfig) -> anyhow::Result<PureOcrEngine> {
    if !config.models.models_present(model_dir) {
        anyhow::bail!(
            "OCR models not found at {}.\n\n\
             Expected {} and {} (plus {}). Pass --model-dir or set models.model_dir.",
            model_dir.display(),
            config.models.detection_model,
            config.models.recognition_model,
            config.models.dictionary
        );
    }

    debug!("Using models from {}", model_dir.display());
    PureOcrEngine::from_dir(model_dir, &config.models, config.ocr.clone())
        .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))
}

/// Whether `path` has an image extension the OCR engine accepts.
pub fn is_image(path: &Path) -> bool {
    matches!(
        extension(path).as_str(),
        "png" | "jpg" | "jpeg" | "webp" | "tiff" | "tif" | "bmp"
    )
}

/// Lowercased file extension, or empty.
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Spinner-style progress bar for single-file commands.
pub fn progress_bar() -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );
    Ok(pb)
}
