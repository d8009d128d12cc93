use brewery_insights::ranking::top_entry;
use brewery_insights::suggestions::FilterKey;
use brewery_insights::util::ratio_to_pct;
use brewery_insights::{
    analyze, generate_suggestions, group_all, AnalyticsConfig, AnalyticsError, BreweryRecord,
    CompletenessScorer, RankedEntry, Ratio,
};

fn brewery(t: &str, country: &str, website: bool) -> BreweryRecord {
    BreweryRecord {
        brewery_type: Some(t.to_string()),
        country: Some(country.to_string()),
        state_province: Some(format!("{} state", country)),
        website_url: website.then(|| "https://brewery.example".to_string()),
        ..Default::default()
    }
}

fn four_breweries() -> Vec<BreweryRecord> {
    vec![
        brewery("micro", "US", true),
        brewery("micro", "US", true),
        brewery("nano", "US", false),
        brewery("planning", "Canada", true),
    ]
}

#[test]
fn four_record_scenario() {
    let records = four_breweries();
    let tables = group_all(&records);

    let types: Vec<_> = tables.types.iter().collect();
    assert_eq!(types, vec![("micro", 2), ("nano", 1), ("planning", 1)]);
    assert_eq!(top_entry(&tables.types), Some(RankedEntry::new("micro", 2)));

    let website = brewery_insights::presence_ratio(&records, BreweryRecord::has_website);
    assert_eq!(website, Ratio::from_counts(3, 4));
    assert_eq!(ratio_to_pct(website), Some(75.0));

    let threshold = AnalyticsConfig::default().digital_adoption_threshold;
    let suggestions = generate_suggestions(&records, threshold);
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].filter_key, FilterKey::BreweryType);
    assert_eq!(suggestions[0].filter_value, "micro");
    assert_eq!(suggestions[1].filter_key, FilterKey::State);
    assert_eq!(suggestions[1].filter_value, "US state");
    assert!(suggestions.iter().all(|s| s.filter_key != FilterKey::Website));

    let countries = brewery_insights::top_n(&tables.countries, Some(1));
    assert_eq!(countries, vec![RankedEntry::new("US", 3)]);
}

#[test]
fn missing_state_scenario() {
    let records = vec![
        BreweryRecord {
            brewery_type: Some("micro".into()),
            ..Default::default()
        },
        BreweryRecord {
            brewery_type: Some("brewpub".into()),
            state_province: Some(String::new()),
            ..Default::default()
        },
    ];
    let tables = group_all(&records);
    let states: Vec<_> = tables.states.iter().collect();
    assert_eq!(states, vec![("Unknown", 2)]);

    let suggestions = generate_suggestions(&records, 0.7);
    let state = suggestions
        .iter()
        .find(|s| s.filter_key == FilterKey::State)
        .expect("state suggestion");
    assert_eq!(state.filter_value, "Unknown");
    assert!(state.description.starts_with("Unknown leads with 2 breweries"));
}

#[test]
fn empty_input_is_no_data_not_zero() {
    let scorer = CompletenessScorer::default();
    assert!(matches!(
        scorer.mean_completeness(&[]),
        Err(AnalyticsError::EmptyInput { .. })
    ));
    assert!(analyze(&[], &AnalyticsConfig::default()).is_err());
    assert!(group_all(&[]).types.is_empty());
    assert_eq!(
        brewery_insights::presence_ratio(&[], BreweryRecord::has_website),
        Ratio::NotApplicable
    );
}

#[test]
fn report_uses_one_rounding_policy() {
    let mut records = four_breweries();
    records.push(brewery("micro", "US", false));
    records.push(brewery("brewpub", "Ireland", false));
    // 3 of 6 have websites; 1 of 3 micro breweries do not.
    let analysis = analyze(&records, &AnalyticsConfig::default()).unwrap();
    assert_eq!(analysis.website_pct, Some(50.0));
    let micro = &analysis.digital_by_type[0];
    assert_eq!(micro.brewery_type, "micro");
    assert_eq!(micro.website_pct, Some(66.7));
    assert_eq!(analysis.business_models[0].share_pct, Some(50.0));
    assert_eq!(analysis.top_countries[0].share_pct, Some(66.7));

    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["website_ratio"]["status"], "value");
    assert_eq!(json["digital_by_type"][0]["website_pct"], 66.7);
}

#[test]
fn exact_half_shares_round_away_from_zero() {
    // 23 micro and 57 nano out of 80; 41 have websites.
    let records: Vec<_> = (0..80)
        .map(|i| brewery(if i < 23 { "micro" } else { "nano" }, "US", i < 41))
        .collect();
    let analysis = analyze(&records, &AnalyticsConfig::default()).unwrap();

    assert_eq!(analysis.business_models[0].key, "nano");
    assert_eq!(analysis.business_models[0].share_pct, Some(71.3));
    assert_eq!(analysis.business_models[1].key, "micro");
    assert_eq!(analysis.business_models[1].share_pct, Some(28.8));
    assert_eq!(analysis.website_pct, Some(51.3));

    let rows = brewery_insights::reports::composition_rows(&analysis.business_models, true);
    assert_eq!(rows[1].share, "28.8%");

    let suggestions = generate_suggestions(&records, 0.7);
    let digital = suggestions
        .iter()
        .find(|s| s.filter_key == FilterKey::Website)
        .expect("website suggestion below threshold");
    assert!(digital.description.starts_with("Only 51.3% have websites"));
}
