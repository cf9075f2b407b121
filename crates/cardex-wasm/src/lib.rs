//! WASM bindings for business card contact extraction.
//!
//! Text recognition runs on the JavaScript side; these bindings take the
//! recognized lines and return contact candidates, suggestion cycling and
//! vCard output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use cardex_core::extraction::rules;
use cardex_core::models::config::ExtractionConfig;
use cardex_core::{
    ContactDraft, ContactRecord, ExtractionAggregator, ExtractionResult, Field, KeywordClassifier,
    SelectionTicket, SelectionTracker, SuggestionSession,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn lines_from_array(lines: &js_sys::Array) -> Result<Vec<String>, JsValue> {
    lines
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_string()
                .ok_or_else(|| JsValue::from_str(&format!("line {} is not a string", i)))
        })
        .collect()
}

fn config_from_options(options: JsValue) -> Result<ExtractionConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ExtractionConfig::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(js_error)
}

fn parse_field(field: &str) -> Result<Field, JsValue> {
    field.parse::<Field>().map_err(|e| JsValue::from_str(&e))
}

fn aggregate(lines: &js_sys::Array, options: JsValue) -> Result<ExtractionResult, JsValue> {
    let config = config_from_options(options)?;
    let lines = lines_from_array(lines)?;
    Ok(ExtractionAggregator::from_config(&config).aggregate(&lines, &KeywordClassifier::new()))
}

#[derive(Serialize)]
struct ContactReport {
    contact: ContactRecord,
    candidates: ExtractionResult,
}

/// Extract a contact from recognized lines.
///
/// `options` is an optional extraction config object, e.g.
/// `{ strict_nanp: false, routing: "top_only" }`.
/// Returns `{ contact, candidates }`.
#[wasm_bindgen]
pub fn extract_contact(lines: &js_sys::Array, options: JsValue) -> Result<JsValue, JsValue> {
    let result = aggregate(lines, options)?;
    let report = ContactReport {
        contact: ContactDraft::from_result(&result).into_record(),
        candidates: result,
    };

    serde_wasm_bindgen::to_value(&report).map_err(js_error)
}

/// Match an email address at the end of `text`.
#[wasm_bindgen]
pub fn match_email(text: &str) -> Option<String> {
    rules::match_email(text)
}

/// Match a North American phone number at the end of `text`.
#[wasm_bindgen]
pub fn match_phone(text: &str) -> Option<String> {
    rules::match_phone(text)
}

/// Match a website in `text`.
#[wasm_bindgen]
pub fn match_website(text: &str) -> Option<String> {
    rules::match_website(text)
}

/// Split a full name into `[given, family]`.
#[wasm_bindgen]
pub fn split_name(full_name: &str) -> js_sys::Array {
    let (given, family) = cardex_core::split_full_name(full_name);
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(given));
    parts.push(&JsValue::from_str(family));
    parts
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Render a contact object as a vCard 3.0 string.
#[wasm_bindgen]
pub fn render_vcard(contact: JsValue) -> Result<String, JsValue> {
    let record: ContactRecord = serde_wasm_bindgen::from_value(contact).map_err(js_error)?;
    Ok(cardex_core::render_vcard(&record, now()))
}

/// Suggestion cycling for one extracted card.
#[wasm_bindgen]
pub struct ContactEditor {
    session: SuggestionSession,
}

#[wasm_bindgen]
impl ContactEditor {
    /// Extract candidates from `lines` and start a session.
    #[wasm_bindgen(constructor)]
    pub fn new(lines: &js_sys::Array, options: JsValue) -> Result<ContactEditor, JsValue> {
        Ok(Self {
            session: SuggestionSession::new(aggregate(lines, options)?),
        })
    }

    /// Current suggestion for `field` (`name`, `job`, `company`, `email`, `phone`, `website`).
    #[wasm_bindgen]
    pub fn suggested(&self, field: &str) -> Result<String, JsValue> {
        Ok(self.session.suggested(parse_field(field)?).to_string())
    }

    /// Move to the next candidate for `field` and return it.
    #[wasm_bindgen]
    pub fn advance(&mut self, field: &str) -> Result<String, JsValue> {
        Ok(self.session.advance(parse_field(field)?).to_string())
    }

    /// Whether "try another" should be offered for `field`.
    #[wasm_bindgen]
    pub fn can_cycle(&self, field: &str) -> Result<bool, JsValue> {
        Ok(self.session.can_cycle(parse_field(field)?))
    }

    /// Reset every field to its first candidate.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// All candidates for `field`.
    #[wasm_bindgen]
    pub fn candidates(&self, field: &str) -> Result<js_sys::Array, JsValue> {
        let field = parse_field(field)?;
        Ok(self
            .session
            .result()
            .candidates(field)
            .iter()
            .map(|c| JsValue::from_str(c))
            .collect())
    }

    /// The full extraction result.
    #[wasm_bindgen]
    pub fn result(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.session.result()).map_err(js_error)
    }

    /// The full extraction result as a JSON string.
    #[wasm_bindgen]
    pub fn result_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.result()).map_err(js_error)
    }

    /// A contact draft seeded with the current suggestions.
    #[wasm_bindgen]
    pub fn draft(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.draft()).map_err(js_error)
    }
}

/// Token for one image selection.
#[wasm_bindgen]
pub struct SelectionToken {
    ticket: SelectionTicket,
}

#[wasm_bindgen]
impl SelectionToken {
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> f64 {
        self.ticket.generation() as f64
    }
}

/// Discards OCR results that arrive after the user picked another image.
#[wasm_bindgen]
#[derive(Default)]
pub struct CardSelection {
    tracker: SelectionTracker,
}

#[wasm_bindgen]
impl CardSelection {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection, superseding the previous one.
    #[wasm_bindgen]
    pub fn select(&self) -> SelectionToken {
        SelectionToken {
            ticket: self.tracker.select(),
        }
    }

    /// Whether `token` still names the current selection.
    #[wasm_bindgen]
    pub fn is_current(&self, token: &SelectionToken) -> bool {
        self.tracker.is_current(token.ticket)
    }

    /// Clear the selection, invalidating every token.
    #[wasm_bindgen]
    pub fn clear(&self) {
        self.tracker.clear();
    }
}
