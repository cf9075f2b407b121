//! Immutable extraction result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the seven candidate categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Email,
    Phone,
    Website,
    Name,
    Job,
    Company,
    Other,
}

/// A user-facing contact field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Job,
    Company,
    Email,
    Phone,
    Website,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Job,
        Field::Company,
        Field::Email,
        Field::Phone,
        Field::Website,
    ];

    /// The category holding this field's candidates.
    pub fn category(&self) -> Category {
        match self {
            Self::Name => Category::Name,
            Self::Job => Category::Job,
            Self::Company => Category::Company,
            Self::Email => Category::Email,
            Self::Phone => Category::Phone,
            Self::Website => Category::Website,
        }
    }

    /// Whether an empty category falls back to the first unclassified line.
    pub fn falls_back_to_other(&self) -> bool {
        matches!(self, Self::Name | Self::Job | Self::Company)
    }

    /// Position in [`Field::ALL`].
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Name => 0,
            Self::Job => 1,
            Self::Company => 2,
            Self::Email => 3,
            Self::Phone => 4,
            Self::Website => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Job => "job",
            Self::Company => "company",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Website => "website",
        }
    }

    /// Human-readable label.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Job => "Job Title",
            Self::Company => "Company",
            Self::Email => "Email",
            Self::Phone => "Phone number",
            Self::Website => "Website",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "job" | "title" | "job_title" => Ok(Self::Job),
            "company" | "organization" => Ok(Self::Company),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "website" | "url" => Ok(Self::Website),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

/// Candidates for every contact field, each in order of first appearance.
///
/// Immutable after construction; cycling through alternatives is done by a
/// [`SuggestionSession`](super::SuggestionSession) that owns the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    emails: Vec<String>,
    phone_numbers: Vec<String>,
    websites: Vec<String>,
    names: Vec<String>,
    jobs: Vec<String>,
    companies: Vec<String>,
    other: Vec<String>,
}

impl ExtractionResult {
    /// Start building a result.
    pub fn builder() -> ExtractionResultBuilder {
        ExtractionResultBuilder::default()
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    pub fn phone_numbers(&self) -> &[String] {
        &self.phone_numbers
    }

    pub fn websites(&self) -> &[String] {
        &self.websites
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn jobs(&self) -> &[String] {
        &self.jobs
    }

    pub fn companies(&self) -> &[String] {
        &self.companies
    }

    /// Lines that could not be classified.
    pub fn other(&self) -> &[String] {
        &self.other
    }

    /// Entries of `category`.
    pub fn category(&self, category: Category) -> &[String] {
        match category {
            Category::Email => &self.emails,
            Category::Phone => &self.phone_numbers,
            Category::Website => &self.websites,
            Category::Name => &self.names,
            Category::Job => &self.jobs,
            Category::Company => &self.companies,
            Category::Other => &self.other,
        }
    }

    /// Candidates for `field`, without fallback.
    pub fn candidates(&self, field: Field) -> &[String] {
        self.category(field.category())
    }

    /// Candidate at `index` (wrapped) for `field`, falling back to the first
    /// unclassified line for name, job and company. Empty when nothing applies.
    pub fn suggestion_at(&self, field: Field, index: usize) -> &str {
        let candidates = self.candidates(field);

        if !candidates.is_empty() {
            return &candidates[index % candidates.len()];
        }

        if field.falls_back_to_other() {
            if let Some(first) = self.other.first() {
                return first;
            }
        }

        ""
    }

    /// Most likely value for `field`.
    pub fn suggest(&self, field: Field) -> &str {
        self.suggestion_at(field, 0)
    }

    /// Whether every category is empty.
    pub fn is_empty(&self) -> bool {
        self.total_entries() == 0
    }

    /// Number of entries across all categories.
    pub fn total_entries(&self) -> usize {
        self.emails.len()
            + self.phone_numbers.len()
            + self.websites.len()
            + self.names.len()
            + self.jobs.len()
            + self.companies.len()
            + self.other.len()
    }
}

/// Accumulates category entries in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResultBuilder {
    result: ExtractionResult,
}

impl ExtractionResultBuilder {
    /// Append `value` to `category`.
    pub fn push(&mut self, category: Category, value: impl Into<String>) -> &mut Self {
        let target = match category {
            Category::Email => &mut self.result.emails,
            Category::Phone => &mut self.result.phone_numbers,
            Category::Website => &mut self.result.websites,
            Category::Name => &mut self.result.names,
            Category::Job => &mut self.result.jobs,
            Category::Company => &mut self.result.companies,
            Category::Other => &mut self.result.other,
        };
        target.push(value.into());
        self
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, category: Category, value: impl Into<String>) -> Self {
        self.push(category, value);
        self
    }

    /// Finish building.
    pub fn build(self) -> ExtractionResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_result_suggests_nothing() {
        let result = ExtractionResult::default();
        assert!(result.is_empty());
        for field in Field::ALL {
            assert_eq!(result.suggest(field), "");
        }
    }

    #[test]
    fn test_suggest_first_candidate() {
        let result = ExtractionResult::builder()
            .with(Category::Email, "a@x.com")
            .with(Category::Email, "b@x.com")
            .with(Category::Name, "Ann Lee")
            .build();

        assert_eq!(result.suggest(Field::Email), "a@x.com");
        assert_eq!(result.suggest(Field::Name), "Ann Lee");
        assert_eq!(result.total_entries(), 3);
    }

    #[test]
    fn test_classified_fields_fall_back_to_other() {
        let result = ExtractionResult::builder()
            .with(Category::Other, "Northwind")
            .with(Category::Other, "Suite 5")
            .with(Category::Company, "Contoso Ltd")
            .build();

        assert_eq!(result.suggest(Field::Name), "Northwind");
        assert_eq!(result.suggest(Field::Job), "Northwind");
        assert_eq!(result.suggest(Field::Company), "Contoso Ltd");
        // structured fields never fall back
        assert_eq!(result.suggest(Field::Email), "");
        assert_eq!(result.suggest(Field::Website), "");
    }

    #[test]
    fn test_suggestion_at_wraps() {
        let result = ExtractionResult::builder()
            .with(Category::Phone, "1")
            .with(Category::Phone, "2")
            .build();

        assert_eq!(result.suggestion_at(Field::Phone, 3), "2");
        assert_eq!(result.suggestion_at(Field::Phone, 4), "1");
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("name".parse::<Field>().unwrap(), Field::Name);
        assert_eq!("Job".parse::<Field>().unwrap(), Field::Job);
        assert_eq!("url".parse::<Field>().unwrap(), Field::Website);
        assert!("fax".parse::<Field>().is_err());
    }

    #[test]
    fn test_serializes_category_names() {
        let result = ExtractionResult::builder()
            .with(Category::Phone, "416-555-0199")
            .build();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["phone_numbers"][0], "416-555-0199");
        assert_eq!(json["other"], serde_json::json!([]));
    }
}
