use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One row of a clinical reference dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    #[serde(rename = "referenceScore")]
    pub reference_score: u32,
    pub gender: String,
    pub age: String,
    /// Every other column of the row, keyed by header
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// One row of the tourism dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(rename = "placeName")]
    pub place_name: String,
    pub category: String,
    pub city: String,
    pub price: f64,
    #[serde(rename = "timeMinutes")]
    pub time_minutes: f64,
    pub rating: f64,
}

/// Ordered, read-only sequence of dataset rows
///
/// Built once at startup and shared by reference. There is no API to
/// mutate a table after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Table<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }
}

impl<R> FromIterator<R> for Table<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// A user's questionnaire result plus optional demographic attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClinicalQuery {
    pub user_score: u32,
    pub gender: Option<String>,
    pub age: Option<String>,
}

impl ClinicalQuery {
    /// Build a query, treating blank demographic strings as "not supplied"
    pub fn new(user_score: u32, gender: Option<&str>, age: Option<&str>) -> Self {
        Self {
            user_score,
            gender: normalize(gender),
            age: normalize(age),
        }
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Tourism filter criteria
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceQuery {
    pub category: String,
    pub city: String,
    /// `None` means no price ceiling
    pub max_price: Option<f64>,
}

/// Per-row distance breakdown computed for a single query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distance {
    #[serde(rename = "scoreDiff")]
    pub score_diff: u32,
    #[serde(rename = "genderPenalty")]
    pub gender_penalty: u32,
    #[serde(rename = "agePenalty")]
    pub age_penalty: u32,
    pub total: u32,
}

/// The row selected as the best fit for a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match<'a> {
    /// Position of the row in table order
    pub index: usize,
    pub record: &'a ClinicalRecord,
    pub distance: Distance,
}

/// Tourism top-K result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSet<'a> {
    pub places: Vec<&'a Place>,
    /// Number of rows that passed the hard filters before truncation
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
}

impl RecommendationSet<'_> {
    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// How the matcher treats demographic fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Drop rows whose demographics differ, then pick the nearest score
    HardFilter,
    /// Keep every row and add a fixed penalty per demographic mismatch
    #[default]
    SoftPenalty,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::HardFilter => write!(f, "hard_filter"),
            MatchMode::SoftPenalty => write!(f, "soft_penalty"),
        }
    }
}

/// What to do with a missing or unparseable questionnaire answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerPolicy {
    /// Substitute 0 and report how many items were substituted
    #[default]
    DefaultToZero,
    /// Fail the assessment on the first bad item
    Reject,
}

/// Named score range with advice for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Severity {
    pub level: &'static str,
    pub advice: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_blank_demographics_are_absent() {
        let query = ClinicalQuery::new(7, Some("  "), Some(""));
        assert_eq!(query.gender, None);
        assert_eq!(query.age, None);

        let query = ClinicalQuery::new(7, Some(" F "), None);
        assert_eq!(query.gender.as_deref(), Some("F"));
    }

    #[test]
    fn test_table_preserves_order() {
        let table: Table<u32> = vec![3, 1, 2].into_iter().collect();
        assert_eq!(table.rows(), &[3, 1, 2]);
        assert_eq!(table.get(1), Some(&1));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_match_mode_serde_names() {
        let mode: MatchMode = serde_json::from_str("\"hard_filter\"").unwrap();
        assert_eq!(mode, MatchMode::HardFilter);
        assert_eq!(MatchMode::default(), MatchMode::SoftPenalty);
        assert_eq!(MatchMode::SoftPenalty.to_string(), "soft_penalty");
    }
}
