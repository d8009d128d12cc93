use indexmap::IndexMap;
use tracing::debug;

use crate::types::{BreweryRecord, GroupRatio, Ratio};

/// Share of records matching `predicate`. `NotApplicable` for an empty slice.
pub fn presence_ratio<P>(records: &[BreweryRecord], predicate: P) -> Ratio
where
    P: Fn(&BreweryRecord) -> bool,
{
    let matching = records.iter().filter(|&r| predicate(r)).count();
    Ratio::from_counts(matching, records.len())
}

/// Presence ratio for every group found in `records`, in first-encountered
/// key order.
pub fn presence_ratio_by_group<P, F>(
    records: &[BreweryRecord],
    predicate: P,
    key_fn: F,
) -> IndexMap<String, GroupRatio>
where
    P: Fn(&BreweryRecord) -> bool,
    F: for<'a> Fn(&'a BreweryRecord) -> &'a str,
{
    let mut counts: IndexMap<String, (usize, usize)> = IndexMap::new();
    for r in records {
        let key = key_fn(r);
        if !counts.contains_key(key) {
            counts.insert(key.to_string(), (0, 0));
        }
        if let Some(e) = counts.get_mut(key) {
            e.0 += 1;
            if predicate(r) {
                e.1 += 1;
            }
        }
    }
    debug!(records = records.len(), groups = counts.len(), "computed group ratios");
    counts
        .into_iter()
        .map(|(k, (total, matching))| {
            (
                k,
                GroupRatio {
                    total,
                    matching,
                    ratio: Ratio::from_counts(matching, total),
                },
            )
        })
        .collect()
}

/// Presence ratio for a caller-chosen list of keys, typically the groups of
/// a full record set evaluated against a filtered subset. Keys with no
/// records in `records` come back with `total == 0` and a `NotApplicable` ratio.
pub fn presence_ratio_for_keys<'k, P, F, I>(
    records: &[BreweryRecord],
    predicate: P,
    key_fn: F,
    keys: I,
) -> IndexMap<String, GroupRatio>
where
    P: Fn(&BreweryRecord) -> bool,
    F: for<'a> Fn(&'a BreweryRecord) -> &'a str,
    I: IntoIterator<Item = &'k str>,
{
    let by_group = presence_ratio_by_group(records, predicate, key_fn);
    keys.into_iter()
        .map(|k| {
            let ratio = by_group.get(k).copied().unwrap_or(GroupRatio {
                total: 0,
                matching: 0,
                ratio: Ratio::NotApplicable,
            });
            (k.to_string(), ratio)
        })
        .collect()
}
