//! Text recognition capability.
//!
//! The extraction core only needs an ordered list of recognized lines; any
//! OCR engine can provide them by implementing [`TextRecognizer`]. With the
//! `native` feature, [`PureOcrEngine`] wraps the `pure-onnx-ocr` models.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use std::cmp::Ordering;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;

/// Produces recognized text lines from an image, in engine reading order.
pub trait TextRecognizer {
    /// Recognize text in `image`.
    ///
    /// Returns [`RecognitionError::TextNotFound`] when the engine ran but
    /// nothing was recognized.
    fn recognize_text(&self, image: &DynamicImage) -> Result<Vec<String>, RecognitionError>;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for &T {
    fn recognize_text(&self, image: &DynamicImage) -> Result<Vec<String>, RecognitionError> {
        (**self).recognize_text(image)
    }
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for Box<T> {
    fn recognize_text(&self, image: &DynamicImage) -> Result<Vec<String>, RecognitionError> {
        (**self).recognize_text(image)
    }
}

/// A recognized text region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedRegion {
    /// Recognized text.
    pub text: String,

    /// Axis-aligned bounding rectangle (min_x, min_y, max_x, max_y).
    pub rect: [f32; 4],

    /// Recognition confidence (0.0 - 1.0).
    pub confidence: f32,
}

impl RecognizedRegion {
    /// Region from the corner points of a (possibly rotated) box.
    pub fn from_points(text: impl Into<String>, points: &[(f32, f32)], confidence: f32) -> Self {
        let mut rect = [f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY];
        for &(x, y) in points {
            rect[0] = rect[0].min(x);
            rect[1] = rect[1].min(y);
            rect[2] = rect[2].max(x);
            rect[3] = rect[3].max(y);
        }
        if points.is_empty() {
            rect = [0.0; 4];
        }

        Self {
            text: text.into(),
            rect,
            confidence,
        }
    }
}

/// Order regions top-to-bottom, then left-to-right within a row, and return
/// their non-blank texts.
///
/// Regions whose top edges fall in the same `row_height` band share a row.
pub fn into_reading_order(mut regions: Vec<RecognizedRegion>, row_height: f32) -> Vec<String> {
    let row_height = if row_height > 0.0 { row_height } else { 1.0 };

    regions.sort_by(|a, b| {
        let row_a = (a.rect[1] / row_height).floor() as i64;
        let row_b = (b.rect[1] / row_height).floor() as i64;

        row_a
            .cmp(&row_b)
            .then_with(|| a.rect[0].partial_cmp(&b.rect[0]).unwrap_or(Ordering::Equal))
    });

    regions
        .into_iter()
        .map(|r| r.text.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Replace recognizer `[UNK]` tokens and collapse the resulting whitespace.
pub(crate) fn strip_unknown_tokens(text: &str) -> String {
    text.replace("[UNK]", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Dimensions scaled so the longer side fits within `max_size`.
pub(crate) fn fit_within(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    let max_dim = width.max(height);

    if max_size == 0 || max_dim <= max_size {
        return (width, height);
    }

    let scale = max_size as f32 / max_dim as f32;
    let new_width = (width as f32 * scale) as u32;
    let new_height = (height as f32 * scale) as u32;

    (new_width.max(1), new_height.max(1))
}
