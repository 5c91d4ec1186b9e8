// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AnswerPolicy, ClinicalQuery, ClinicalRecord, Distance, Match, MatchMode, Place, PlaceQuery,
    RecommendationSet, Severity, Table,
};
pub use requests::{AssessmentRequest, FieldValue, RecommendRequest};
pub use responses::{
    AssessmentResponse, ErrorResponse, HealthResponse, InstrumentInfo, MatchPayload,
    RecommendResponse,
};
