// Utility helpers for parsing, rounding and number formatting.
//
// Every percentage the engine surfaces goes through `ratio_to_pct` so the
// report and chart views always agree on the displayed value.
use num_format::{Locale, ToFormattedString};

use crate::types::Ratio;

/// A string field counts as present when it holds anything but whitespace.
pub fn present(s: Option<&str>) -> bool {
    s.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in exports (spaces, stray text).
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Returns `None` for anything that cannot be safely parsed or is not finite.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Percentage for a ratio with one decimal, halves away from zero.
pub fn ratio_to_pct(ratio: Ratio) -> Option<f64> {
    ratio.pct_tenths().map(|t| t as f64 / 10.0)
}

/// Display form of a ratio: `"75.0%"`, or `"n/a"` when it is not applicable.
pub fn format_pct(ratio: Ratio) -> String {
    match ratio.pct_tenths() {
        Some(t) => format!("{}.{}%", t / 10, t % 10),
        None => "n/a".to_string(),
    }
}

/// Upper-case the first character for display labels (`micro` -> `Micro`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts in console messages (e.g., `8,245 breweries loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_formatting_uses_one_decimal() {
        assert_eq!(format_pct(Ratio::from_counts(3, 4)), "75.0%");
        assert_eq!(format_pct(Ratio::from_counts(699, 1000)), "69.9%");
        assert_eq!(format_pct(Ratio::from_counts(2, 3)), "66.7%");
        assert_eq!(format_pct(Ratio::from_counts(0, 9)), "0.0%");
        assert_eq!(format_pct(Ratio::from_counts(9, 9)), "100.0%");
        assert_eq!(format_pct(Ratio::NotApplicable), "n/a");
    }

    #[test]
    fn exact_half_percentages_round_up() {
        assert_eq!(format_pct(Ratio::from_counts(23, 80)), "28.8%");
        assert_eq!(format_pct(Ratio::from_counts(41, 80)), "51.3%");
        assert_eq!(format_pct(Ratio::from_counts(51, 80)), "63.8%");
        assert_eq!(format_pct(Ratio::from_counts(1, 2000)), "0.1%");
        assert_eq!(ratio_to_pct(Ratio::from_counts(23, 80)), Some(28.8));
        assert_eq!(ratio_to_pct(Ratio::from_counts(1, 3)), Some(33.3));
    }

    #[test]
    fn pct_matches_integer_rounding_for_every_count() {
        for total in 1..=400usize {
            for matching in 0..=total {
                // Tenths of a percent, scaled so the half boundary is exact.
                let scaled = 20_000 * matching;
                let expected = (scaled / total + 10) / 20;
                let got = Ratio::from_counts(matching, total).pct_tenths().unwrap();
                assert_eq!(got as usize, expected, "{}/{}", matching, total);
            }
        }
    }

    #[test]
    fn ratio_equality_and_complement() {
        assert_eq!(Ratio::from_counts(1, 2), Ratio::from_counts(2, 4));
        assert_ne!(Ratio::from_counts(1, 2), Ratio::NotApplicable);
        assert_eq!(Ratio::from_counts(3, 5).complement(), Ratio::from_counts(2, 5));
        assert_eq!(Ratio::NotApplicable.complement(), Ratio::NotApplicable);
        assert_eq!(Ratio::from_counts(0, 0), Ratio::NotApplicable);
    }

    #[test]
    fn present_ignores_whitespace() {
        assert!(present(Some("x")));
        assert!(!present(Some("   ")));
        assert!(!present(Some("")));
        assert!(!present(None));
    }

    #[test]
    fn parse_rejects_text_and_blanks() {
        assert_eq!(parse_f64_safe(Some(" 45.5 ")), Some(45.5));
        assert_eq!(parse_f64_safe(Some("-122.4")), Some(-122.4));
        assert_eq!(parse_f64_safe(Some("abc")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn labels_and_numbers() {
        assert_eq!(capitalize("micro"), "Micro");
        assert_eq!(capitalize(""), "");
        assert_eq!(format_int(8245usize), "8,245");
    }
}
