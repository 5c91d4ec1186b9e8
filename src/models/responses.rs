use serde::{Deserialize, Serialize};
use crate::models::domain::{ClinicalRecord, Distance, MatchMode, Place, Severity};

/// Response for the assessment endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    #[serde(rename = "assessmentId")]
    pub assessment_id: String,
    pub instrument: String,
    pub score: u32,
    #[serde(rename = "maxScore")]
    pub max_score: u32,
    /// Answers substituted with 0 because they were missing or invalid
    #[serde(rename = "defaultedItems")]
    pub defaulted_items: usize,
    pub severity: Severity,
    pub mode: MatchMode,
    #[serde(rename = "match")]
    pub best_match: MatchPayload,
}

/// Owned copy of a match for serialization
#[derive(Debug, Clone, Serialize)]
pub struct MatchPayload {
    pub index: usize,
    pub record: ClinicalRecord,
    pub distance: Distance,
}

/// Response for the recommendation endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Place>,
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
}

/// Instrument listing entry
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentInfo {
    pub name: &'static str,
    pub title: &'static str,
    #[serde(rename = "itemCount")]
    pub item_count: usize,
    #[serde(rename = "maxItemValue")]
    pub max_item_value: u8,
    #[serde(rename = "maxScore")]
    pub max_score: u32,
    #[serde(rename = "datasetRows")]
    pub dataset_rows: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "placeRows")]
    pub place_rows: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
