use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::util::{parse_f64_safe, present};

/// Coordinates show up as JSON numbers in some exports and as quoted
/// strings in others (and always as text in CSV).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    Number(f64),
    Text(String),
}

impl RawCoordinate {
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            RawCoordinate::Number(n) if n.is_finite() => Some(*n),
            RawCoordinate::Number(_) => None,
            RawCoordinate::Text(s) => parse_f64_safe(Some(s.as_str())),
        }
    }
}

/// Row shape as it appears in the source file, before cleaning.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub brewery_type: Option<String>,
    pub address_1: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub website_url: Option<String>,
    pub latitude: Option<RawCoordinate>,
    pub longitude: Option<RawCoordinate>,
}

impl From<RawRow> for BreweryRecord {
    fn from(row: RawRow) -> Self {
        BreweryRecord {
            id: row.id,
            name: row.name,
            brewery_type: row.brewery_type,
            address_1: row.address_1,
            city: row.city,
            state_province: row.state_province,
            postal_code: row.postal_code,
            country: row.country,
            phone: row.phone,
            website_url: row.website_url,
            latitude: row.latitude.as_ref().and_then(RawCoordinate::to_f64),
            longitude: row.longitude.as_ref().and_then(RawCoordinate::to_f64),
        }
    }
}

/// One brewery entry. Every descriptive field is optional; an empty string
/// is treated the same as a missing value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BreweryRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Open-ended category such as `micro` or `brewpub`; new values are expected.
    pub brewery_type: Option<String>,
    pub address_1: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub website_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl BreweryRecord {
    pub fn has_website(&self) -> bool {
        present(self.website_url.as_deref())
    }

    pub fn has_phone(&self) -> bool {
        present(self.phone.as_deref())
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Grouping keys for one record; each one is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedKeys {
    pub brewery_type: String,
    pub country: String,
    pub state: String,
    pub city: String,
}

/// Key -> count, kept in first-encountered key order until ranked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountTable {
    counts: IndexMap<String, usize>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump `key` by one, appending it at the end if it was not seen before.
    pub fn increment(&mut self, key: &str) {
        if let Some(count) = self.counts.get_mut(key) {
            *count += 1;
        } else {
            self.counts.insert(key.to_string(), 1);
        }
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.counts.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Entries in first-encountered order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: usize,
}

impl RankedEntry {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// A proportion `matching / total`, or `NotApplicable` when nothing was
/// counted. The counts are kept so percentages round from the exact value.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(into = "RatioValue")]
pub enum Ratio {
    Counts { matching: usize, total: usize },
    NotApplicable,
}

/// Serialized form: `{"status": "value", "value": 0.75}`.
#[derive(Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "value")]
enum RatioValue {
    Value(f64),
    NotApplicable,
}

impl From<Ratio> for RatioValue {
    fn from(ratio: Ratio) -> Self {
        match ratio.value() {
            Some(v) => RatioValue::Value(v),
            None => RatioValue::NotApplicable,
        }
    }
}

impl Ratio {
    pub fn from_counts(matching: usize, total: usize) -> Self {
        if total == 0 {
            Ratio::NotApplicable
        } else {
            Ratio::Counts { matching, total }
        }
    }

    fn counts(self) -> Option<(usize, usize)> {
        match self {
            Ratio::Counts { matching, total } if total > 0 => Some((matching, total)),
            _ => None,
        }
    }

    pub fn value(self) -> Option<f64> {
        self.counts().map(|(m, t)| m as f64 / t as f64)
    }

    /// The ratio as a percentage in tenths, rounded half away from zero
    /// (`23 / 80` is 28.75%, so 288).
    pub fn pct_tenths(self) -> Option<u64> {
        self.counts().map(|(m, t)| {
            let (m, t) = (m as u64, t as u64);
            (2000 * m + t) / (2 * t)
        })
    }

    /// `total - matching` over the same total.
    pub fn complement(self) -> Ratio {
        match self.counts() {
            Some((m, t)) => Ratio::from_counts(t.saturating_sub(m), t),
            None => Ratio::NotApplicable,
        }
    }

    pub fn is_applicable(self) -> bool {
        self.counts().is_some()
    }
}

/// Equal proportions compare equal (`1 / 2 == 2 / 4`).
impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        match (self.counts(), other.counts()) {
            (Some((m1, t1)), Some((m2, t2))) => {
                m1 as u128 * t2 as u128 == m2 as u128 * t1 as u128
            }
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for Ratio {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupRatio {
    pub total: usize,
    pub matching: usize,
    pub ratio: Ratio,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CompositionRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "Breweries")]
    #[tabled(rename = "Breweries")]
    pub count: usize,
    #[serde(rename = "Share")]
    #[tabled(rename = "Share")]
    pub share: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DigitalByTypeRow {
    #[serde(rename = "BreweryType")]
    #[tabled(rename = "BreweryType")]
    pub brewery_type: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: usize,
    #[serde(rename = "WithWebsite")]
    #[tabled(rename = "WithWebsite")]
    pub with_website: usize,
    #[serde(rename = "WebsitePct")]
    #[tabled(rename = "WebsitePct")]
    pub website_pct: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct FieldCompletenessRow {
    #[serde(rename = "Field")]
    #[tabled(rename = "Field")]
    pub field: String,
    #[serde(rename = "Completeness")]
    #[tabled(rename = "Completeness")]
    pub completeness: String,
}
