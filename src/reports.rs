use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::aggregate::group_all;
use crate::completeness::CompletenessScorer;
use crate::config::AnalyticsConfig;
use crate::error::AnalyticsError;
use crate::insights::{insights_from, Insight, InsightInputs};
use crate::normalize::type_key;
use crate::ranking::{ranked_total, top_n};
use crate::ratio::{presence_ratio, presence_ratio_by_group};
use crate::suggestions::{suggestions_from, Suggestion};
use crate::types::{
    BreweryRecord, CompositionRow, CountTable, DigitalByTypeRow, FieldCompletenessRow, GroupRatio,
    RankedEntry, Ratio,
};
use crate::util::{capitalize, format_pct, ratio_to_pct};
use crate::view_mode::DisplayState;

/// A ranked key together with its share of all records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareEntry {
    pub key: String,
    pub count: usize,
    pub share: Ratio,
    /// `share` as a one-decimal percentage.
    pub share_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDigitalPresence {
    pub brewery_type: String,
    #[serde(flatten)]
    pub presence: GroupRatio,
    pub website_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldCompleteness {
    pub field: String,
    pub ratio: Ratio,
    pub pct: Option<f64>,
}

/// Everything the analysis report shows.
#[derive(Debug, Clone, Serialize)]
pub struct BreweryAnalysis {
    pub generated_at: DateTime<Utc>,
    pub total_breweries: usize,
    pub total_countries: usize,
    pub total_states: usize,
    pub website_ratio: Ratio,
    pub website_pct: Option<f64>,
    pub phone_ratio: Ratio,
    pub phone_pct: Option<f64>,
    pub coordinates_ratio: Ratio,
    pub coordinates_pct: Option<f64>,
    pub business_models: Vec<ShareEntry>,
    pub top_countries: Vec<ShareEntry>,
    pub top_states: Vec<ShareEntry>,
    pub top_cities: Vec<ShareEntry>,
    /// Share held by the leading `clustering_states` states.
    pub clustering_share: Ratio,
    pub digital_by_type: Vec<TypeDigitalPresence>,
    pub mean_address_completeness: f64,
    /// Filled address fields over all tracked slots; the exact form of the mean.
    pub address_coverage: Ratio,
    pub mean_address_completeness_pct: Option<f64>,
    pub field_completeness: Vec<FieldCompleteness>,
    pub suggestions: Vec<Suggestion>,
    pub insights: Vec<Insight>,
}

fn share_entries(ranked: Vec<RankedEntry>, total: usize) -> Vec<ShareEntry> {
    ranked
        .into_iter()
        .map(|e| {
            let share = Ratio::from_counts(e.count, total);
            ShareEntry {
                key: e.key,
                count: e.count,
                share,
                share_pct: ratio_to_pct(share),
            }
        })
        .collect()
}

fn concentration(table: &CountTable, n: usize, total: usize) -> Ratio {
    Ratio::from_counts(ranked_total(&top_n(table, Some(n))), total)
}

/// Website presence per business type, in the order of `ranked_types`.
fn digital_by_type(
    records: &[BreweryRecord],
    ranked_types: &[RankedEntry],
) -> Vec<TypeDigitalPresence> {
    let by_type = presence_ratio_by_group(records, BreweryRecord::has_website, type_key);
    ranked_types
        .iter()
        .filter_map(|e| {
            let presence = *by_type.get(e.key.as_str())?;
            Some(TypeDigitalPresence {
                brewery_type: e.key.clone(),
                website_pct: ratio_to_pct(presence.ratio),
                presence,
            })
        })
        .collect()
}

/// Build the full analysis report.
///
/// Fails with `EmptyInput` when there are no records: the report has no
/// meaningful "zero" state, so callers should show a no-data view instead.
pub fn analyze(
    records: &[BreweryRecord],
    config: &AnalyticsConfig,
) -> Result<BreweryAnalysis, AnalyticsError> {
    let scorer = CompletenessScorer::new(config.address_fields.clone());
    let mean = scorer.mean_completeness(records)?;
    let address_coverage = scorer.address_coverage(records);
    let total = records.len();
    let tables = group_all(records);

    let website_ratio = presence_ratio(records, BreweryRecord::has_website);
    let phone_ratio = presence_ratio(records, BreweryRecord::has_phone);
    let coordinates_ratio = presence_ratio(records, BreweryRecord::has_coordinates);

    let ranked_types = top_n(&tables.types, None);
    let digital = digital_by_type(records, &ranked_types);

    let field_completeness = scorer
        .field_breakdown(records)
        .into_iter()
        .map(|(field, ratio)| FieldCompleteness {
            field: field.label(),
            ratio,
            pct: ratio_to_pct(ratio),
        })
        .collect();

    let suggestions = suggestions_from(
        &tables.types,
        &tables.states,
        website_ratio,
        config.digital_adoption_threshold,
    );
    let insights = insights_from(
        &InsightInputs {
            total,
            tables: &tables,
            website: website_ratio,
            address_coverage,
            clustering_states: config.clustering_states,
        },
        config,
    );

    info!(
        breweries = total,
        types = tables.types.len(),
        suggestions = suggestions.len(),
        "built analysis report"
    );

    Ok(BreweryAnalysis {
        generated_at: Utc::now(),
        total_breweries: total,
        total_countries: tables.countries.len(),
        total_states: tables.states.len(),
        website_ratio,
        website_pct: ratio_to_pct(website_ratio),
        phone_ratio,
        phone_pct: ratio_to_pct(phone_ratio),
        coordinates_ratio,
        coordinates_pct: ratio_to_pct(coordinates_ratio),
        business_models: share_entries(ranked_types, total),
        top_countries: share_entries(top_n(&tables.countries, Some(config.top_countries)), total),
        top_states: share_entries(top_n(&tables.states, Some(config.top_states_report)), total),
        top_cities: share_entries(top_n(&tables.cities, Some(config.top_cities)), total),
        clustering_share: concentration(&tables.states, config.clustering_states, total),
        digital_by_type: digital,
        mean_address_completeness: mean,
        address_coverage,
        mean_address_completeness_pct: ratio_to_pct(address_coverage),
        field_completeness,
        suggestions,
        insights,
    })
}

/// Chart data for the visualization view. Sections hidden by the display
/// state are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub total_breweries: usize,
    pub display: DisplayState,
    pub type_distribution: Option<Vec<RankedEntry>>,
    pub top_states: Option<Vec<RankedEntry>>,
    /// Sorted by group size, largest first.
    pub website_by_type: Option<Vec<TypeDigitalPresence>>,
    /// Countries in first-encountered order.
    pub country_distribution: Option<Vec<RankedEntry>>,
    /// Share held by the leading `chart_clustering_states` states.
    pub clustering_share: Ratio,
    pub website_ratio: Ratio,
    pub suggestions: Option<Vec<Suggestion>>,
    pub insights: Option<Vec<Insight>>,
}

fn website_by_type(records: &[BreweryRecord]) -> Vec<TypeDigitalPresence> {
    let mut rows: Vec<TypeDigitalPresence> =
        presence_ratio_by_group(records, BreweryRecord::has_website, type_key)
            .into_iter()
            .map(|(brewery_type, presence)| TypeDigitalPresence {
                brewery_type,
                website_pct: ratio_to_pct(presence.ratio),
                presence,
            })
            .collect();
    rows.sort_by(|a, b| b.presence.total.cmp(&a.presence.total));
    rows
}

pub fn chart_view(
    records: &[BreweryRecord],
    config: &AnalyticsConfig,
    display: &DisplayState,
) -> ChartView {
    let total = records.len();
    let tables = group_all(records);
    let website_ratio = presence_ratio(records, BreweryRecord::has_website);
    let v = display.visibility;

    let suggestions = display.show_suggestions.then(|| {
        suggestions_from(
            &tables.types,
            &tables.states,
            website_ratio,
            config.digital_adoption_threshold,
        )
    });
    let insights = display.show_insights.then(|| {
        let scorer = CompletenessScorer::new(config.address_fields.clone());
        insights_from(
            &InsightInputs {
                total,
                tables: &tables,
                website: website_ratio,
                address_coverage: scorer.address_coverage(records),
                clustering_states: config.chart_clustering_states,
            },
            config,
        )
    });

    ChartView {
        total_breweries: total,
        display: *display,
        type_distribution: v.business_model.then(|| top_n(&tables.types, None)),
        top_states: v
            .geographic
            .then(|| top_n(&tables.states, Some(config.top_states_chart))),
        website_by_type: v
            .digital_presence
            .then(|| website_by_type(records)),
        country_distribution: v.global_reach.then(|| {
            tables
                .countries
                .iter()
                .map(|(k, c)| RankedEntry::new(k, c))
                .collect()
        }),
        clustering_share: concentration(&tables.states, config.chart_clustering_states, total),
        website_ratio,
        suggestions,
        insights,
    }
}

pub fn composition_rows(entries: &[ShareEntry], capitalize_names: bool) -> Vec<CompositionRow> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, e)| CompositionRow {
            rank: idx + 1,
            name: if capitalize_names {
                capitalize(&e.key)
            } else {
                e.key.clone()
            },
            count: e.count,
            share: format_pct(e.share),
        })
        .collect()
}

pub fn digital_rows(entries: &[TypeDigitalPresence]) -> Vec<DigitalByTypeRow> {
    entries
        .iter()
        .map(|e| DigitalByTypeRow {
            brewery_type: capitalize(&e.brewery_type),
            total: e.presence.total,
            with_website: e.presence.matching,
            website_pct: format_pct(e.presence.ratio),
        })
        .collect()
}

pub fn completeness_rows(entries: &[FieldCompleteness]) -> Vec<FieldCompletenessRow> {
    entries
        .iter()
        .map(|e| FieldCompletenessRow {
            field: e.field.clone(),
            completeness: format_pct(e.ratio),
        })
        .collect()
}
