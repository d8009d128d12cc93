use serde::Serialize;
use tracing::debug;

use crate::normalize::{city_key, country_key, state_key, type_key};
use crate::types::{BreweryRecord, CountTable};

/// Grouping dimensions available for one-pass aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    BreweryType,
    Country,
    State,
    City,
}

impl Dimension {
    pub fn key(self, record: &BreweryRecord) -> &str {
        match self {
            Dimension::BreweryType => type_key(record),
            Dimension::Country => country_key(record),
            Dimension::State => state_key(record),
            Dimension::City => city_key(record),
        }
    }
}

/// Count records per key produced by `key_fn`.
pub fn group_by<F>(records: &[BreweryRecord], key_fn: F) -> CountTable
where
    F: for<'a> Fn(&'a BreweryRecord) -> &'a str,
{
    let mut table = CountTable::new();
    for r in records {
        table.increment(key_fn(r));
    }
    table
}

/// Independent count tables for every dimension, built in a single traversal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DimensionTables {
    pub types: CountTable,
    pub countries: CountTable,
    pub states: CountTable,
    pub cities: CountTable,
}

impl DimensionTables {
    pub fn table(&self, dimension: Dimension) -> &CountTable {
        match dimension {
            Dimension::BreweryType => &self.types,
            Dimension::Country => &self.countries,
            Dimension::State => &self.states,
            Dimension::City => &self.cities,
        }
    }
}

pub fn group_all(records: &[BreweryRecord]) -> DimensionTables {
    let mut tables = DimensionTables::default();
    for r in records {
        tables.types.increment(type_key(r));
        tables.countries.increment(country_key(r));
        tables.states.increment(state_key(r));
        tables.cities.increment(city_key(r));
    }
    debug!(
        records = records.len(),
        types = tables.types.len(),
        countries = tables.countries.len(),
        states = tables.states.len(),
        cities = tables.cities.len(),
        "grouped records"
    );
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(t: Option<&str>) -> BreweryRecord {
        BreweryRecord {
            brewery_type: t.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn keeps_first_encountered_order() {
        let records = vec![
            typed(Some("nano")),
            typed(Some("micro")),
            typed(Some("micro")),
            typed(None),
            typed(Some("nano")),
            typed(Some("micro")),
        ];
        let table = group_by(&records, type_key);
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![("nano", 2), ("micro", 3), ("Unknown", 1)]);
        assert_eq!(table.total(), records.len());
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = group_by(&[], type_key);
        assert!(table.is_empty());
        assert_eq!(group_all(&[]), DimensionTables::default());
    }

    #[test]
    fn one_pass_matches_individual_groupings() {
        let records = vec![
            BreweryRecord {
                brewery_type: Some("micro".into()),
                country: Some("United States".into()),
                state_province: Some("Oregon".into()),
                city: Some("Portland".into()),
                ..Default::default()
            },
            BreweryRecord {
                brewery_type: Some("brewpub".into()),
                country: Some("Ireland".into()),
                city: Some("Dublin".into()),
                ..Default::default()
            },
        ];
        let tables = group_all(&records);
        for dimension in [
            Dimension::BreweryType,
            Dimension::Country,
            Dimension::State,
            Dimension::City,
        ] {
            assert_eq!(
                tables.table(dimension),
                &group_by(&records, |r| dimension.key(r))
            );
        }
        assert_eq!(tables.states.get("Unknown"), Some(1));
    }
}
