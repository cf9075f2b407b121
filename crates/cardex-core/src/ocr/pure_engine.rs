//! OCR adapter backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::RecognitionError;
use crate::models::config::{ModelConfig, OcrConfig};

use super::{fit_within, into_reading_order, strip_unknown_tokens, RecognizedRegion, TextRecognizer};

/// Text recognizer running PaddleOCR detection and recognition models.
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
}

impl PureOcrEngine {
    /// Load detection, recognition and dictionary files from `model_dir`.
    pub fn from_dir(
        model_dir: &Path,
        models: &ModelConfig,
        config: OcrConfig,
    ) -> Result<Self, RecognitionError> {
        let det_path = model_dir.join(&models.detection_model);
        let rec_path = model_dir.join(&models.recognition_model);
        let dict_path = model_dir.join(&models.dictionary);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| {
                RecognitionError::RecognitionFailed(format!(
                    "failed to load models from {}: {}",
                    model_dir.display(),
                    e
                ))
            })?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self { engine, config })
    }

    /// Recognize regions with their geometry and confidence.
    pub fn recognize_regions(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<RecognizedRegion>, RecognitionError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        let (target_w, target_h) = fit_within(width, height, self.config.max_image_size);

        let resized;
        let input = if (target_w, target_h) != (width, height) {
            debug!("Resizing {}x{} to {}x{}", width, height, target_w, target_h);
            resized = image.resize_exact(target_w, target_h, image::imageops::FilterType::Lanczos3);
            &resized
        } else {
            image
        };

        let results = self
            .engine
            .run_from_image(input)
            .map_err(|e| RecognitionError::RecognitionFailed(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let regions: Vec<RecognizedRegion> = results
            .iter()
            .filter(|r| r.confidence >= self.config.min_confidence)
            .map(|r| {
                let text = if self.config.keep_unk {
                    r.text.clone()
                } else {
                    strip_unknown_tokens(&r.text)
                };
                let points: Vec<(f32, f32)> = r
                    .bounding_box
                    .exterior()
                    .coords()
                    .map(|c| (c.x as f32, c.y as f32))
                    .collect();
                RecognizedRegion::from_points(text, &points, r.confidence)
            })
            .filter(|r| !r.text.trim().is_empty())
            .collect();

        info!(
            "OCR complete: {} regions in {}ms",
            regions.len(),
            start.elapsed().as_millis()
        );

        Ok(regions)
    }
}

impl TextRecognizer for PureOcrEngine {
    fn recognize_text(&self, image: &DynamicImage) -> Result<Vec<String>, RecognitionError> {
        let regions = self.recognize_regions(image)?;
        let lines = into_reading_order(regions, self.config.row_height);

        if lines.is_empty() {
            return Err(RecognitionError::TextNotFound);
        }
        Ok(lines)
    }
}
