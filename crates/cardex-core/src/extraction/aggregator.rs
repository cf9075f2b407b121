//! Aggregates classified OCR lines into an [`ExtractionResult`].

use std::time::Instant;

use tracing::{debug, info};

use crate::classifier::{Label, LabelClassifier};
use crate::models::config::{ExtractionConfig, RoutingPolicy};

use super::line::{ClassificationOutcome, LineClassifier};
use super::result::{Category, ExtractionResult, ExtractionResultBuilder};

/// Drives the line classifier over every OCR line and routes outcomes to
/// categories. Total over any input, including an empty one.
#[derive(Debug, Clone, Default)]
pub struct ExtractionAggregator {
    lines: LineClassifier,
    routing: RoutingPolicy,
}

impl ExtractionAggregator {
    /// Create an aggregator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            lines: LineClassifier::from_config(config),
            routing: config.routing,
        }
    }

    /// Replace the line classifier.
    pub fn with_line_classifier(mut self, lines: LineClassifier) -> Self {
        self.lines = lines;
        self
    }

    /// Set the multi-hypothesis routing policy.
    pub fn with_routing(mut self, routing: RoutingPolicy) -> Self {
        self.routing = routing;
        self
    }

    /// Classify `lines` in order and collect the result.
    ///
    /// No deduplication is performed: repeated values appear once per
    /// occurrence.
    pub fn aggregate<I, S, C>(&self, lines: I, classifier: &C) -> ExtractionResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: LabelClassifier + ?Sized,
    {
        let start = Instant::now();
        let mut builder = ExtractionResult::builder();
        let mut count = 0usize;

        for line in lines {
            let line = line.as_ref();
            count += 1;

            match self.lines.classify(line, classifier) {
                ClassificationOutcome::Email(value) => {
                    builder.push(Category::Email, value);
                }
                ClassificationOutcome::Phone(value) => {
                    builder.push(Category::Phone, value);
                }
                ClassificationOutcome::Website(value) => {
                    builder.push(Category::Website, value);
                }
                ClassificationOutcome::Labeled(hypotheses) => {
                    let labels: Vec<Label> = hypotheses.iter().map(|h| h.label).collect();
                    self.route_labeled(&mut builder, line, &labels);
                }
                ClassificationOutcome::Unclassified => {
                    builder.push(Category::Other, line);
                }
            }
        }

        let result = builder.build();

        info!(
            "Aggregated {} lines into {} entries in {}us",
            count,
            result.total_entries(),
            start.elapsed().as_micros()
        );
        debug!(
            "emails={} phones={} websites={} names={} jobs={} companies={} other={}",
            result.emails().len(),
            result.phone_numbers().len(),
            result.websites().len(),
            result.names().len(),
            result.jobs().len(),
            result.companies().len(),
            result.other().len()
        );

        result
    }

    /// Route a labeled line. `labels` are ordered most confident first.
    ///
    /// A line enters each category at most once.
    fn route_labeled(&self, builder: &mut ExtractionResultBuilder, line: &str, labels: &[Label]) {
        let selected: &[Label] = match self.routing {
            RoutingPolicy::AllHypotheses => labels,
            RoutingPolicy::TopOnly => &labels[..labels.len().min(1)],
        };

        let mut routed: Vec<Category> = Vec::with_capacity(selected.len());
        for label in selected {
            let category = match label {
                Label::Name => Category::Name,
                Label::Job => Category::Job,
                Label::Company => Category::Company,
                Label::Other => Category::Other,
            };
            if !routed.contains(&category) {
                routed.push(category);
                builder.push(category, line);
            }
        }
    }
}

/// Aggregate `lines` with default settings.
pub fn aggregate<S, C>(lines: &[S], classifier: &C) -> ExtractionResult
where
    S: AsRef<str>,
    C: LabelClassifier + ?Sized,
{
    ExtractionAggregator::new().aggregate(lines, classifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::testing::{BrokenClassifier, LookupClassifier};
    use crate::classifier::KeywordClassifier;
    use crate::extraction::result::Field;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        let lines: [&str; 0] = [];
        let result = aggregate(&lines, &LookupClassifier::new());

        assert!(result.is_empty());
        for field in Field::ALL {
            assert_eq!(result.suggest(field), "");
        }
    }

    #[test]
    fn test_business_card_fixture() {
        let lines = [
            "John Smith",
            "Acme Corp",
            "john@acme.com",
            "555-123-4567",
            "acme.com",
        ];
        let classifier = LookupClassifier::new()
            .with("John Smith", &[("name", 0.9)])
            .with("Acme Corp", &[("company", 0.9)]);

        // 555-123-xxxx is a fictional exchange, accepted by the lenient phone rules
        let config = ExtractionConfig {
            strict_nanp: false,
            ..ExtractionConfig::default()
        };
        let result = ExtractionAggregator::from_config(&config).aggregate(lines, &classifier);

        assert_eq!(result.emails(), strings(&["john@acme.com"]).as_slice());
        assert_eq!(result.phone_numbers(), strings(&["555-123-4567"]).as_slice());
        assert_eq!(result.websites(), strings(&["acme.com"]).as_slice());
        assert_eq!(result.names(), strings(&["John Smith"]).as_slice());
        assert_eq!(result.companies(), strings(&["Acme Corp"]).as_slice());
        assert!(result.jobs().is_empty());
        assert!(result.other().is_empty());
    }

    #[test]
    fn test_strict_rules_route_fictional_exchange_to_other() {
        let result = aggregate(&["555-123-4567"], &LookupClassifier::new());
        assert!(result.phone_numbers().is_empty());
        assert_eq!(result.other(), strings(&["555-123-4567"]).as_slice());
    }

    #[test]
    fn test_all_hypotheses_routing() {
        let classifier = LookupClassifier::new().with(
            "Jordan Founder",
            &[("name", 0.6), ("job", 0.5), ("other", 0.2), ("name", 0.1)],
        );
        let config = ExtractionConfig {
            max_hypotheses: 4,
            ..ExtractionConfig::default()
        };
        let result = ExtractionAggregator::from_config(&config).aggregate(["Jordan Founder"], &classifier);

        // the repeated name hypothesis does not add the line twice
        assert_eq!(result.names(), strings(&["Jordan Founder"]).as_slice());
        assert_eq!(result.jobs(), strings(&["Jordan Founder"]).as_slice());
        assert_eq!(result.other(), strings(&["Jordan Founder"]).as_slice());
        assert!(result.companies().is_empty());
    }

    #[test]
    fn test_top_only_routing() {
        let classifier = LookupClassifier::new()
            .with("Jordan Founder", &[("name", 0.6), ("job", 0.8)]);
        let result = ExtractionAggregator::new()
            .with_routing(RoutingPolicy::TopOnly)
            .aggregate(["Jordan Founder"], &classifier);

        assert_eq!(result.jobs(), strings(&["Jordan Founder"]).as_slice());
        assert!(result.names().is_empty());
    }

    #[test]
    fn test_order_of_first_appearance_and_no_dedup() {
        let lines = ["b@x.com", "Note", "a@x.com", "b@x.com"];
        let result = aggregate(&lines, &LookupClassifier::new());

        assert_eq!(
            result.emails(),
            strings(&["b@x.com", "a@x.com", "b@x.com"]).as_slice()
        );
        assert_eq!(result.other(), strings(&["Note"]).as_slice());
    }

    #[test]
    fn test_every_line_is_kept() {
        let lines = ["Jane Roe", "CTO", "", "Ünïcödé ☃", "日本語の名刺", "jane@roe.dev"];
        let result = aggregate(&lines, &KeywordClassifier::new());
        assert!(result.total_entries() >= lines.len());
    }

    #[test]
    fn test_failing_classifier_never_aborts() {
        let lines = ["Jane Roe", "jane@roe.dev", "Roe Industries"];
        let result = aggregate(&lines, &BrokenClassifier { unavailable: false });

        assert_eq!(result.emails(), strings(&["jane@roe.dev"]).as_slice());
        assert_eq!(
            result.other(),
            strings(&["Jane Roe", "Roe Industries"]).as_slice()
        );
    }

    #[test]
    fn test_keyword_classifier_end_to_end() {
        let lines = [
            "Mary Jane Watson",
            "Senior Photographer",
            "Daily Bugle Group",
            "mj@bugle.example.com",
            "(212) 555-0142",
            "www.bugle.example.com",
        ];
        let result = aggregate(&lines, &KeywordClassifier::new());

        assert_eq!(result.suggest(Field::Name), "Mary Jane Watson");
        assert_eq!(result.suggest(Field::Job), "Senior Photographer");
        assert_eq!(result.suggest(Field::Company), "Daily Bugle Group");
        assert_eq!(result.suggest(Field::Email), "mj@bugle.example.com");
        assert_eq!(result.suggest(Field::Phone), "(212) 555-0142");
        assert_eq!(result.suggest(Field::Website), "www.bugle.example.com");
    }
}
