//! Destinations for finished contacts.

mod vcard;

pub use vcard::{render_vcard, VcardSink};

use crate::error::SinkError;
use crate::models::contact::ContactRecord;

/// Accepts finished contact records.
pub trait ContactSink {
    /// Persist `record`.
    fn save(&mut self, record: &ContactRecord) -> Result<(), SinkError>;
}

impl<T: ContactSink + ?Sized> ContactSink for &mut T {
    fn save(&mut self, record: &ContactRecord) -> Result<(), SinkError> {
        (**self).save(record)
    }
}

impl<T: ContactSink + ?Sized> ContactSink for Box<T> {
    fn save(&mut self, record: &ContactRecord) -> Result<(), SinkError> {
        (**self).save(record)
    }
}

/// Keeps saved records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<ContactRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ContactRecord> {
        self.records
    }
}

impl ContactSink for MemorySink {
    fn save(&mut self, record: &ContactRecord) -> Result<(), SinkError> {
        if record.is_empty() {
            return Err(SinkError::Rejected("contact has no values".to_string()));
        }
        self.records.push(record.clone());
        Ok(())
    }
}
