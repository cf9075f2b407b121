//! Data models for configuration and contacts.

pub mod config;
pub mod contact;

pub use config::{CardConfig, ClassifierConfig, ExtractionConfig, ModelConfig, OcrConfig, RoutingPolicy};
pub use contact::{split_full_name, ContactDraft, ContactLabel, ContactRecord};
