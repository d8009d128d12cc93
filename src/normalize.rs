use crate::config::UNKNOWN_LABEL;
use crate::types::{BreweryRecord, NormalizedKeys};

/// Grouping key for a single optional field: the trimmed value, or
/// `"Unknown"` when the value is missing or blank.
pub fn group_key(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN_LABEL,
    }
}

pub fn type_key(record: &BreweryRecord) -> &str {
    group_key(record.brewery_type.as_deref())
}

pub fn country_key(record: &BreweryRecord) -> &str {
    group_key(record.country.as_deref())
}

pub fn state_key(record: &BreweryRecord) -> &str {
    group_key(record.state_province.as_deref())
}

pub fn city_key(record: &BreweryRecord) -> &str {
    group_key(record.city.as_deref())
}

pub fn normalize(record: &BreweryRecord) -> NormalizedKeys {
    NormalizedKeys {
        brewery_type: type_key(record).to_string(),
        country: country_key(record).to_string(),
        state: state_key(record).to_string(),
        city: city_key(record).to_string(),
    }
}
