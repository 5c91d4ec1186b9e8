// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod recommender;
pub mod scoring;

pub use distance::{distance, mismatch_penalty, score_diff, DEFAULT_PENALTY};
pub use filters::{contains_ignore_case, matches_demographics, matches_place_query};
pub use matcher::{MatchError, Matcher};
pub use recommender::{Recommender, DEFAULT_LIMIT, MAX_LIMIT};
pub use scoring::{Instrument, ParsedAnswers, ScoringError};
