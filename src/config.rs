use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::BreweryRecord;

pub const DEFAULT_TOP_COUNTRIES: usize = 5;
pub const DEFAULT_TOP_STATES_REPORT: usize = 10;
pub const DEFAULT_TOP_STATES_CHART: usize = 8;
pub const DEFAULT_TOP_CITIES: usize = 15;
/// How many leading states make up the report's clustering share.
pub const DEFAULT_CLUSTERING_STATES: usize = 5;
/// Same share, as shown in the chart view.
pub const DEFAULT_CHART_CLUSTERING_STATES: usize = 3;
/// Website adoption below this ratio triggers the digital-presence suggestion.
pub const DEFAULT_DIGITAL_ADOPTION_THRESHOLD: f64 = 0.70;
/// More `planning` breweries than this reads as strong growth.
pub const DEFAULT_PLANNING_GROWTH_THRESHOLD: usize = 10;

/// Label substituted for a missing grouping value.
pub const UNKNOWN_LABEL: &str = "Unknown";
/// Category tracked by the growth-indicator insight.
pub const PLANNING_TYPE: &str = "planning";

/// Address fields that can take part in completeness scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressField {
    #[serde(rename = "address_1")]
    Address1,
    #[serde(rename = "city")]
    City,
    #[serde(rename = "state_province")]
    StateProvince,
    #[serde(rename = "postal_code")]
    PostalCode,
    #[serde(rename = "country")]
    Country,
}

impl AddressField {
    pub const ALL: [AddressField; 5] = [
        AddressField::Address1,
        AddressField::City,
        AddressField::StateProvince,
        AddressField::PostalCode,
        AddressField::Country,
    ];

    pub fn value(self, record: &BreweryRecord) -> Option<&str> {
        match self {
            AddressField::Address1 => record.address_1.as_deref(),
            AddressField::City => record.city.as_deref(),
            AddressField::StateProvince => record.state_province.as_deref(),
            AddressField::PostalCode => record.postal_code.as_deref(),
            AddressField::Country => record.country.as_deref(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AddressField::Address1 => "address_1",
            AddressField::City => "city",
            AddressField::StateProvince => "state_province",
            AddressField::PostalCode => "postal_code",
            AddressField::Country => "country",
        }
    }

    /// Header form used in the quality breakdown (`STATE PROVINCE`).
    pub fn label(self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables honored by the engine. Supplied by the caller; every field
/// falls back to its `DEFAULT_*` constant when left out of a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub address_fields: Vec<AddressField>,
    pub top_countries: usize,
    pub top_states_report: usize,
    pub top_states_chart: usize,
    pub top_cities: usize,
    pub clustering_states: usize,
    pub chart_clustering_states: usize,
    pub digital_adoption_threshold: f64,
    pub planning_growth_threshold: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            address_fields: AddressField::ALL.to_vec(),
            top_countries: DEFAULT_TOP_COUNTRIES,
            top_states_report: DEFAULT_TOP_STATES_REPORT,
            top_states_chart: DEFAULT_TOP_STATES_CHART,
            top_cities: DEFAULT_TOP_CITIES,
            clustering_states: DEFAULT_CLUSTERING_STATES,
            chart_clustering_states: DEFAULT_CHART_CLUSTERING_STATES,
            digital_adoption_threshold: DEFAULT_DIGITAL_ADOPTION_THRESHOLD,
            planning_growth_threshold: DEFAULT_PLANNING_GROWTH_THRESHOLD,
        }
    }
}

impl AnalyticsConfig {
    /// Read a JSON config file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: AnalyticsConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address_fields.is_empty() {
            return Err(ConfigError::Invalid(
                "address_fields must name at least one field".to_string(),
            ));
        }
        let t = self.digital_adoption_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(ConfigError::Invalid(format!(
                "digital_adoption_threshold must be within [0, 1], got {}",
                t
            )));
        }
        let cutoffs = [
            ("top_countries", self.top_countries),
            ("top_states_report", self.top_states_report),
            ("top_states_chart", self.top_states_chart),
            ("top_cities", self.top_cities),
            ("clustering_states", self.clustering_states),
            ("chart_clustering_states", self.chart_clustering_states),
        ];
        if let Some((name, _)) = cutoffs.iter().find(|(_, n)| *n == 0) {
            return Err(ConfigError::Invalid(format!("{} must be at least 1", name)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AnalyticsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.address_fields.len(), 5);
        assert_eq!(config.top_states_chart, 8);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AnalyticsConfig =
            serde_json::from_str(r#"{"top_cities": 20, "address_fields": ["city", "country"]}"#)
                .unwrap();
        assert_eq!(config.top_cities, 20);
        assert_eq!(
            config.address_fields,
            vec![AddressField::City, AddressField::Country]
        );
        assert_eq!(config.digital_adoption_threshold, 0.70);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut config = AnalyticsConfig::default();
        config.digital_adoption_threshold = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AnalyticsConfig::default();
        config.address_fields.clear();
        assert!(config.validate().is_err());

        let mut config = AnalyticsConfig::default();
        config.top_cities = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("top_cities"));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"digital_adoption_threshold": 0.5}"#).unwrap();
        let config = AnalyticsConfig::from_path(&path).unwrap();
        assert_eq!(config.digital_adoption_threshold, 0.5);

        std::fs::write(&path, r#"{"top_countries": 0}"#).unwrap();
        assert!(AnalyticsConfig::from_path(&path).is_err());
    }

    #[test]
    fn field_labels() {
        assert_eq!(AddressField::StateProvince.label(), "STATE PROVINCE");
        assert_eq!(AddressField::Address1.to_string(), "address_1");
    }
}
