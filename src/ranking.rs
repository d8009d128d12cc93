use crate::types::{CountTable, RankedEntry};

/// Rank a table by descending count and keep the first `n` entries
/// (`None` keeps all of them).
///
/// Equal counts keep their first-encountered order; `n` past the end of
/// the table simply returns every entry.
pub fn top_n(table: &CountTable, n: Option<usize>) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = table
        .iter()
        .map(|(key, count)| RankedEntry::new(key, count))
        .collect();
    // `sort_by` is stable, which is what preserves the tie order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(n) = n {
        ranked.truncate(n);
    }
    ranked
}

/// The single highest-ranked entry, if the table has any.
pub fn top_entry(table: &CountTable) -> Option<RankedEntry> {
    top_n(table, Some(1)).into_iter().next()
}

/// Sum of counts over a ranking, for concentration shares.
pub fn ranked_total(entries: &[RankedEntry]) -> usize {
    entries.iter().map(|e| e.count).sum()
}
