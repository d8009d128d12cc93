use tracing::debug;

use crate::config::AddressField;
use crate::error::AnalyticsError;
use crate::ratio::presence_ratio;
use crate::types::{BreweryRecord, Ratio};
use crate::util::present;

/// Scores address completeness over a fixed field set.
#[derive(Debug, Clone)]
pub struct CompletenessScorer {
    fields: Vec<AddressField>,
}

impl Default for CompletenessScorer {
    fn default() -> Self {
        Self::new(AddressField::ALL.to_vec())
    }
}

impl CompletenessScorer {
    /// An empty field list is rejected by `AnalyticsConfig::validate`; it
    /// would score every record as 0 here.
    pub fn new(fields: Vec<AddressField>) -> Self {
        Self { fields }
    }

    /// Filled fields divided by tracked fields, in `[0, 1]`.
    pub fn record_completeness(&self, record: &BreweryRecord) -> f64 {
        if self.fields.is_empty() {
            return 0.0;
        }
        let filled = self
            .fields
            .iter()
            .filter(|f| present(f.value(record)))
            .count();
        filled as f64 / self.fields.len() as f64
    }

    /// Arithmetic mean of per-record scores. Undefined for no records.
    pub fn mean_completeness(&self, records: &[BreweryRecord]) -> Result<f64, AnalyticsError> {
        if records.is_empty() {
            return Err(AnalyticsError::EmptyInput {
                operation: "mean completeness",
            });
        }
        let sum: f64 = records.iter().map(|r| self.record_completeness(r)).sum();
        let mean = sum / records.len() as f64;
        debug!(records = records.len(), mean, "scored address completeness");
        Ok(mean)
    }

    /// Filled fields over every tracked field slot. With a fixed field set
    /// this equals the mean completeness, but keeps the exact counts for
    /// percentage rounding.
    pub fn address_coverage(&self, records: &[BreweryRecord]) -> Ratio {
        let filled: usize = records
            .iter()
            .map(|r| self.fields.iter().filter(|f| present(f.value(r))).count())
            .sum();
        Ratio::from_counts(filled, self.fields.len() * records.len())
    }

    /// Share of records with `field` filled in.
    pub fn field_completeness(&self, records: &[BreweryRecord], field: AddressField) -> Ratio {
        presence_ratio(records, |r| present(field.value(r)))
    }

    /// `field_completeness` for every tracked field, in field-set order.
    pub fn field_breakdown(&self, records: &[BreweryRecord]) -> Vec<(AddressField, Ratio)> {
        self.fields
            .iter()
            .map(|f| (*f, self.field_completeness(records, *f)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> BreweryRecord {
        BreweryRecord {
            address_1: Some("1 Main St".into()),
            city: Some("Bend".into()),
            state_province: Some("Oregon".into()),
            postal_code: Some("97701".into()),
            country: Some("United States".into()),
            ..Default::default()
        }
    }

    #[test]
    fn per_record_score() {
        let scorer = CompletenessScorer::default();
        assert_eq!(scorer.record_completeness(&full()), 1.0);
        let partial = BreweryRecord {
            postal_code: Some("".into()),
            address_1: None,
            ..full()
        };
        assert_eq!(scorer.record_completeness(&partial), 0.6);
        assert_eq!(scorer.record_completeness(&BreweryRecord::default()), 0.0);
    }

    #[test]
    fn mean_over_complete_records_is_exactly_one() {
        let scorer = CompletenessScorer::default();
        let records = vec![full(), full(), full()];
        assert_eq!(scorer.mean_completeness(&records), Ok(1.0));
    }

    #[test]
    fn mean_over_nothing_is_an_error() {
        let scorer = CompletenessScorer::default();
        assert_eq!(
            scorer.mean_completeness(&[]),
            Err(AnalyticsError::EmptyInput {
                operation: "mean completeness"
            })
        );
    }

    #[test]
    fn mean_mixes_scores() {
        let scorer = CompletenessScorer::default();
        let records = vec![full(), BreweryRecord::default()];
        assert_eq!(scorer.mean_completeness(&records), Ok(0.5));
    }

    #[test]
    fn coverage_keeps_exact_counts() {
        let scorer = CompletenessScorer::default();
        // 23 of 80 address slots filled: 28.75% rounds to 28.8%.
        let mut records: Vec<BreweryRecord> = (0..16).map(|_| BreweryRecord::default()).collect();
        for r in records.iter_mut().take(11) {
            r.city = Some("Bend".into());
            r.country = Some("United States".into());
        }
        records[11].city = Some("Bend".into());
        let coverage = scorer.address_coverage(&records);
        assert_eq!(coverage, Ratio::from_counts(23, 80));
        assert_eq!(crate::util::format_pct(coverage), "28.8%");
        assert_eq!(scorer.address_coverage(&[]), Ratio::NotApplicable);
    }

    #[test]
    fn custom_field_set() {
        let scorer = CompletenessScorer::new(vec![AddressField::City, AddressField::PostalCode]);
        let record = BreweryRecord {
            city: Some("Bend".into()),
            ..Default::default()
        };
        assert_eq!(scorer.record_completeness(&record), 0.5);
    }

    #[test]
    fn field_breakdown_uses_ratios() {
        let scorer = CompletenessScorer::default();
        let records = vec![full(), BreweryRecord::default()];
        let breakdown = scorer.field_breakdown(&records);
        assert_eq!(breakdown.len(), 5);
        assert!(breakdown.iter().all(|(_, r)| *r == Ratio::from_counts(1, 2)));
        assert_eq!(
            scorer.field_completeness(&[], AddressField::City),
            Ratio::NotApplicable
        );
    }
}
