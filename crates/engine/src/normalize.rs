//! Field normalizers
//!
//! The dataset encodes numeric constraints as free text ("Upto 5L",
//! "60-75"). Both conversions here are total: unparseable input never
//! fails, it falls back to the unrestrictive sentinel so that a malformed
//! cell can only widen results, never exclude a scholarship on its own.

/// Convert a raw income string to a numeric ceiling in rupees.
///
/// - blank/missing -> unbounded (`f64::INFINITY`)
/// - contains the `"Upto"` marker -> strip `"Upto"` and the lakh unit
///   marker `'L'`, parse the remaining numeral, multiply by 100 000
/// - any other non-empty form (e.g. "N/A") -> unbounded
///
/// The marker check is case-sensitive, matching the source data exactly.
pub fn income_ceiling(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() || !raw.contains("Upto") {
        return f64::INFINITY;
    }

    let numeral = raw.replace("Upto", "").replace('L', "");
    match numeral.trim().parse::<f64>() {
        Ok(lakhs) => lakhs * 100_000.0,
        Err(_) => f64::INFINITY,
    }
}

/// Convert a raw annual-percentage range to the minimum required value.
///
/// "60-75" -> 60.0. Missing, blank, or separator-less input means no
/// minimum (0.0), as does an unparseable lower bound.
pub fn minimum_percentage(raw: &str) -> f64 {
    match raw.split_once('-') {
        Some((lower, _)) => lower.trim().parse::<f64>().unwrap_or(0.0),
        None => 0.0,
    }
}
