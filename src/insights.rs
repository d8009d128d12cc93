//! Narrative insight rules for the report and chart views.
//!
//! Each rule reads the aggregates the other modules produce and turns them
//! into one headline plus a sentence of detail. Thresholds come from
//! `AnalyticsConfig` so every rule can be tuned and tested on its own.
use serde::Serialize;

use crate::aggregate::{group_all, DimensionTables};
use crate::completeness::CompletenessScorer;
use crate::config::{AnalyticsConfig, PLANNING_TYPE};
use crate::ranking::{ranked_total, top_entry, top_n};
use crate::ratio::presence_ratio;
use crate::types::{BreweryRecord, Ratio};
use crate::util::{capitalize, format_pct};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    DominantModel,
    MarketFragmentation,
    GrowthIndicator,
    GeographicClustering,
    DigitalAdoption,
    DataQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub headline: String,
    pub detail: String,
}

/// Aggregates the insight rules read from.
#[derive(Debug, Clone, Copy)]
pub struct InsightInputs<'a> {
    pub total: usize,
    pub tables: &'a DimensionTables,
    pub website: Ratio,
    /// Filled address fields over all tracked slots.
    pub address_coverage: Ratio,
    pub clustering_states: usize,
}

pub fn dominant_model(inputs: &InsightInputs) -> Option<Insight> {
    let top = top_entry(&inputs.tables.types)?;
    let share = Ratio::from_counts(top.count, inputs.total);
    let preference = if top.key == "micro" {
        "small-scale, artisanal production"
    } else {
        "this business approach"
    };
    Some(Insight {
        kind: InsightKind::DominantModel,
        headline: "Dominant Model".to_string(),
        detail: format!(
            "{} breweries represent {} of the market, indicating a preference for {}.",
            capitalize(&top.key),
            format_pct(share),
            preference
        ),
    })
}

pub fn market_fragmentation(inputs: &InsightInputs) -> Option<Insight> {
    let models = inputs.tables.types.len();
    if models == 0 {
        return None;
    }
    Some(Insight {
        kind: InsightKind::MarketFragmentation,
        headline: "Market Fragmentation".to_string(),
        detail: format!(
            "The presence of {} different business models shows a diverse ecosystem catering to various market segments.",
            models
        ),
    })
}

pub fn growth_indicator(inputs: &InsightInputs, planning_threshold: usize) -> Option<Insight> {
    if inputs.total == 0 {
        return None;
    }
    let planning = inputs.tables.types.get(PLANNING_TYPE).unwrap_or(0);
    let outlook = if planning > planning_threshold {
        "strong continued growth"
    } else {
        "steady market expansion"
    };
    Some(Insight {
        kind: InsightKind::GrowthIndicator,
        headline: "Growth Indicators".to_string(),
        detail: format!(
            "{} breweries in planning phase suggest {} in the industry.",
            planning, outlook
        ),
    })
}

pub fn geographic_clustering(inputs: &InsightInputs) -> Option<Insight> {
    let top = top_n(&inputs.tables.states, Some(inputs.clustering_states));
    if top.is_empty() {
        return None;
    }
    let share = Ratio::from_counts(ranked_total(&top), inputs.total);
    Some(Insight {
        kind: InsightKind::GeographicClustering,
        headline: "Clustering Effect".to_string(),
        detail: format!(
            "Top {} regions control {} of all breweries, indicating significant geographic clustering.",
            top.len(),
            format_pct(share)
        ),
    })
}

/// Mirrors the digital-presence suggestion: strong at or above the threshold.
pub fn digital_adoption(inputs: &InsightInputs, threshold: f64) -> Option<Insight> {
    let ratio = inputs.website.value()?;
    let level = if ratio >= threshold { "strong" } else { "evolving" };
    Some(Insight {
        kind: InsightKind::DigitalAdoption,
        headline: "Digital Presence".to_string(),
        detail: format!(
            "{} website adoption indicates the industry's {} embrace of digital marketing and customer engagement.",
            format_pct(inputs.website),
            level
        ),
    })
}

pub fn data_quality(inputs: &InsightInputs) -> Option<Insight> {
    let missing = inputs.address_coverage.complement();
    if !missing.is_applicable() {
        return None;
    }
    Some(Insight {
        kind: InsightKind::DataQuality,
        headline: "Data Quality".to_string(),
        detail: format!(
            "Improve data collection for {} missing address information.",
            format_pct(missing)
        ),
    })
}

/// Run every rule in fixed order, skipping those that have nothing to say.
pub fn insights_from(inputs: &InsightInputs, config: &AnalyticsConfig) -> Vec<Insight> {
    [
        dominant_model(inputs),
        market_fragmentation(inputs),
        growth_indicator(inputs, config.planning_growth_threshold),
        geographic_clustering(inputs),
        digital_adoption(inputs, config.digital_adoption_threshold),
        data_quality(inputs),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn generate_insights(records: &[BreweryRecord], config: &AnalyticsConfig) -> Vec<Insight> {
    let tables = group_all(records);
    let website = presence_ratio(records, BreweryRecord::has_website);
    let scorer = CompletenessScorer::new(config.address_fields.clone());
    let inputs = InsightInputs {
        total: records.len(),
        tables: &tables,
        website,
        address_coverage: scorer.address_coverage(records),
        clustering_states: config.clustering_states,
    };
    insights_from(&inputs, config)
}
