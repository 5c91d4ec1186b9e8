//! Pakar Algo - questionnaire scoring and matching service for the Pakar expert system
//!
//! Scores depression, anxiety and stress questionnaires, finds the closest
//! row of a labelled reference dataset, and ranks tourist destinations.
//! Datasets are loaded once at startup and every query is a pure scan.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Instrument, MatchError, Matcher, Recommender, ScoringError};
pub use crate::models::{ClinicalQuery, ClinicalRecord, Match, MatchMode, Place, PlaceQuery, RecommendationSet, Table};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let table = Table::new(vec![ClinicalRecord {
            reference_score: 3,
            gender: "F".to_string(),
            age: "18-24".to_string(),
            attributes: Default::default(),
        }]);
        let query = ClinicalQuery::new(3, None, None);

        let result = Matcher::default().find_best_match(&table, &query, MatchMode::default());
        assert!(result.is_ok());
    }
}
