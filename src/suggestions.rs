use serde::Serialize;
use tracing::debug;

use crate::aggregate::group_by;
use crate::normalize::{state_key, type_key};
use crate::ranking::top_entry;
use crate::ratio::presence_ratio;
use crate::types::{BreweryRecord, CountTable, Ratio};
use crate::util::{capitalize, format_pct};

/// Record attribute a suggestion proposes to filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    BreweryType,
    State,
    Website,
}

impl FilterKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::BreweryType => "brewery_type",
            FilterKey::State => "state",
            FilterKey::Website => "website",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub filter_key: FilterKey,
    pub filter_value: String,
}

fn dominant_type(types: &CountTable) -> Option<Suggestion> {
    let top = top_entry(types)?;
    let label = capitalize(&top.key);
    Some(Suggestion {
        icon: "🏭".to_string(),
        title: format!("Explore {} Breweries", label),
        description: format!(
            "{} breweries dominate with {} locations. Filter by this type to understand regional patterns.",
            label, top.count
        ),
        filter_key: FilterKey::BreweryType,
        filter_value: top.key,
    })
}

fn leading_state(states: &CountTable) -> Option<Suggestion> {
    let top = top_entry(states)?;
    Some(Suggestion {
        icon: "🗺️".to_string(),
        title: format!("Focus on {}", top.key),
        description: format!(
            "{} leads with {} breweries. Explore this brewery capital's distribution.",
            top.key, top.count
        ),
        filter_key: FilterKey::State,
        filter_value: top.key,
    })
}

/// Fires on the unrounded ratio; the description shows the rounded one.
fn digital_presence(website: Ratio, threshold: f64) -> Option<Suggestion> {
    let ratio = website.value()?;
    if ratio >= threshold {
        return None;
    }
    Some(Suggestion {
        icon: "🌐".to_string(),
        title: "Digital Presence Analysis".to_string(),
        description: format!(
            "Only {} have websites. Filter by \"Has Website\" to see digitally advanced breweries.",
            format_pct(website)
        ),
        filter_key: FilterKey::Website,
        filter_value: "yes".to_string(),
    })
}

/// Suggestions from already-computed aggregates, in rule order:
/// dominant type, leading state, then digital presence.
pub fn suggestions_from(
    types: &CountTable,
    states: &CountTable,
    website: Ratio,
    threshold: f64,
) -> Vec<Suggestion> {
    let suggestions: Vec<Suggestion> = [
        dominant_type(types),
        leading_state(states),
        digital_presence(website, threshold),
    ]
    .into_iter()
    .flatten()
    .collect();
    debug!(count = suggestions.len(), "generated filter suggestions");
    suggestions
}

pub fn generate_suggestions(records: &[BreweryRecord], threshold: f64) -> Vec<Suggestion> {
    let types = group_by(records, type_key);
    let states = group_by(records, state_key);
    let website = presence_ratio(records, BreweryRecord::has_website);
    suggestions_from(&types, &states, website, threshold)
}
