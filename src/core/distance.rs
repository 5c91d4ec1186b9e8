use crate::models::{ClinicalQuery, ClinicalRecord, Distance};

/// Penalty added per demographic mismatch when none is configured
pub const DEFAULT_PENALTY: u32 = 100;

/// Absolute gap between a row's reference score and the user's score
#[inline]
pub fn score_diff(reference_score: u32, user_score: u32) -> u32 {
    reference_score.abs_diff(user_score)
}

/// Case-insensitive equality ignoring surrounding whitespace
#[inline]
pub fn same_category(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// `penalty` when the query supplies a value that the row does not share
#[inline]
pub fn mismatch_penalty(row_value: &str, wanted: Option<&str>, penalty: u32) -> u32 {
    match wanted {
        Some(wanted) if !same_category(row_value, wanted) => penalty,
        _ => 0,
    }
}

/// Full distance of a row from a query
///
/// A penalty of 0 reduces this to the plain score difference.
#[inline]
pub fn distance(record: &ClinicalRecord, query: &ClinicalQuery, penalty: u32) -> Distance {
    let score_diff = score_diff(record.reference_score, query.user_score);
    let gender_penalty = mismatch_penalty(&record.gender, query.gender.as_deref(), penalty);
    let age_penalty = mismatch_penalty(&record.age, query.age.as_deref(), penalty);

    Distance {
        score_diff,
        gender_penalty,
        age_penalty,
        total: score_diff
            .saturating_add(gender_penalty)
            .saturating_add(age_penalty),
    }
}
