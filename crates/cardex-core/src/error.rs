//! Error types for the cardex-core library.

use thiserror::Error;

/// Main error type for the cardex library.
///
/// Every variant is terminal for the current extraction attempt. Individual
/// lines never fail a batch: pattern non-matches and empty classifier output
/// are routed to the `other` category instead.
#[derive(Error, Debug)]
pub enum CardError {
    /// The OCR stage could not produce any lines.
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// The label classifier could not be constructed or invoked.
    #[error("label classifier unavailable: {0}")]
    ClassificationUnavailable(#[from] ClassifierError),

    /// Saving a finished contact failed.
    #[error("contact sink error: {0}")]
    Sink(#[from] SinkError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors reported by an OCR capability.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// The OCR engine could not run.
    #[error("text recognition failed: {0}")]
    RecognitionFailed(String),

    /// The engine ran but found no recognizable text.
    #[error("no text found in image")]
    TextNotFound,
}

/// Errors reported by a label classifier capability.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The classifier could not be loaded or is not ready.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// A single prediction failed.
    #[error("prediction failed: {0}")]
    Prediction(String),
}

/// Errors reported by a contact sink.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The sink refused the record.
    #[error("contact rejected: {0}")]
    Rejected(String),

    /// Writing the record failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the cardex library.
pub type Result<T> = std::result::Result<T, CardError>;
