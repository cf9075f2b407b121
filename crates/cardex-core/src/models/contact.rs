//! Contact draft and finished contact record.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::extraction::{ExtractionResult, Field};
use crate::sink::ContactSink;

/// Editable contact values, seeded from an extraction result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub job_title: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

impl ContactDraft {
    /// Seed every field from its first suggestion.
    pub fn from_result(result: &ExtractionResult) -> Self {
        Self {
            name: result.suggest(Field::Name).to_string(),
            job_title: result.suggest(Field::Job).to_string(),
            company: result.suggest(Field::Company).to_string(),
            email: result.suggest(Field::Email).to_string(),
            phone: result.suggest(Field::Phone).to_string(),
            website: result.suggest(Field::Website).to_string(),
        }
    }

    /// Value of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Job => &self.job_title,
            Field::Company => &self.company,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Website => &self.website,
        }
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Job => self.job_title = value,
            Field::Company => self.company = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Website => self.website = value,
        }
    }

    /// Finish editing.
    pub fn into_record(self) -> ContactRecord {
        ContactRecord {
            full_name: self.name.trim().to_string(),
            job_title: self.job_title.trim().to_string(),
            organization: self.company.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            website: self.website.trim().to_string(),
        }
    }

    /// Save the finished record to `sink`.
    ///
    /// Returns whether the sink accepted it; failures are logged.
    pub fn save_to<S: ContactSink + ?Sized>(&self, sink: &mut S) -> bool {
        let record = self.clone().into_record();
        match sink.save(&record) {
            Ok(()) => {
                info!("Saved contact {:?}", record.full_name);
                true
            }
            Err(e) => {
                warn!("Failed to save contact {:?}: {}", record.full_name, e);
                false
            }
        }
    }
}

/// Label applied to a contact's email, phone and URL entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactLabel {
    Home,
    Work,
}

impl ContactLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Work => "work",
        }
    }
}

/// A finished contact, as handed to a [`ContactSink`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub full_name: String,
    pub job_title: String,
    pub organization: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

impl ContactRecord {
    /// Everything before the last name token.
    pub fn given_name(&self) -> &str {
        split_full_name(&self.full_name).0
    }

    /// The last name token, or empty for single-token names.
    pub fn family_name(&self) -> &str {
        split_full_name(&self.full_name).1
    }

    /// `Home` when neither organization nor job title is set.
    pub fn value_label(&self) -> ContactLabel {
        if self.organization.is_empty() && self.job_title.is_empty() {
            ContactLabel::Home
        } else {
            ContactLabel::Work
        }
    }

    /// Whether the record carries any value at all.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty()
            && self.job_title.is_empty()
            && self.organization.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.website.is_empty()
    }
}

/// Split a full name into `(given, family)`.
///
/// The last whitespace-delimited token is the family name; a single token
/// is entirely the given name.
pub fn split_full_name(full_name: &str) -> (&str, &str) {
    let trimmed = full_name.trim();
    match trimmed.rfind(char::is_whitespace) {
        Some(pos) => {
            let given = trimmed[..pos].trim_end();
            let family = trimmed[pos..].trim_start();
            (given, family)
        }
        None => (trimmed, ""),
    }
}
