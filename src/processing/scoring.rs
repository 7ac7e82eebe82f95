//! Matching percentage

use std::collections::HashSet;

/// `100 * unique matches / total keywords`, clamped to [0, 100]; 0.0 when no keywords were requested
pub fn matching_percentage<S: AsRef<str>>(matches: &[S], total_keywords: usize) -> f64 {
    if total_keywords == 0 {
        return 0.0;
    }
    let unique: HashSet<&str> = matches.iter().map(AsRef::as_ref).collect();
    (unique.len() as f64 / total_keywords as f64 * 100.0).clamp(0.0, 100.0)
}

/// Round to two decimals for display
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
