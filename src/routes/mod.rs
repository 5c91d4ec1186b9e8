// Route exports
pub mod assessments;
pub mod recommendations;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use crate::config::{MatchingSettings, PerInstrument, Settings};
use crate::core::{Instrument, MatchError, Matcher, Recommender, MAX_LIMIT};
use crate::models::{ClinicalRecord, ErrorResponse, Place, Table};
use crate::services::{load_clinical, load_places, DatasetError};
use std::sync::Arc;
use thiserror::Error;

/// Errors that abort startup
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load {name} dataset: {source}")]
    Dataset {
        name: String,
        #[source]
        source: DatasetError,
    },

    #[error(transparent)]
    Matching(#[from] MatchError),

    #[error("recommendation limit {limit} must be between 1 and {max}")]
    InvalidLimit { limit: usize, max: usize },
}

/// Application state shared across all handlers
///
/// Tables are loaded once and never written to afterwards, so workers share
/// them through `Arc` without locking.
#[derive(Clone, Debug)]
pub struct AppState {
    pub datasets: Arc<PerInstrument<Table<ClinicalRecord>>>,
    pub places: Arc<Table<Place>>,
    pub matcher: Matcher,
    pub recommender: Recommender,
    pub matching: MatchingSettings,
}

impl AppState {
    /// Load every dataset named in the settings, validating the penalty and
    /// the recommendation limit first
    ///
    /// Reference scores above the instrument's maximum fail the load, since
    /// the penalty only dominates score gaps within that range.
    pub fn load(settings: &Settings) -> Result<Self, StartupError> {
        let matcher = Matcher::new(settings.matching.penalty);
        for instrument in Instrument::ALL {
            matcher.validate_for(instrument)?;
        }

        let limit = settings.recommendation.limit;
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(StartupError::InvalidLimit { limit, max: MAX_LIMIT });
        }

        let load = |instrument: Instrument| {
            let dataset = settings.datasets.for_instrument(instrument);
            let columns = dataset.columns().with_max_score(instrument.max_score());
            load_clinical(&dataset.path, &columns).map_err(|source| StartupError::Dataset {
                name: instrument.to_string(),
                source,
            })
        };

        let datasets = PerInstrument {
            depression: load(Instrument::Depression)?,
            anxiety: load(Instrument::Anxiety)?,
            stress: load(Instrument::Stress)?,
        };

        let places = load_places(&settings.datasets.tourism).map_err(|source| StartupError::Dataset {
            name: "tourism".to_string(),
            source,
        })?;

        Ok(Self::new(
            datasets,
            places,
            matcher,
            Recommender::new(limit),
            settings.matching.clone(),
        ))
    }

    pub fn new(
        datasets: PerInstrument<Table<ClinicalRecord>>,
        places: Table<Place>,
        matcher: Matcher,
        recommender: Recommender,
        matching: MatchingSettings,
    ) -> Self {
        Self {
            datasets: Arc::new(datasets),
            places: Arc::new(places),
            matcher,
            recommender,
            matching,
        }
    }
}

/// JSON error response for payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ErrorResponse {
                error: self.error.clone(),
                message: self.message.clone(),
                status_code: self.status_code,
            })
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Build a JSON error body with the given status
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(assessments::configure)
            .configure(recommendations::configure),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    const TOURISM_CSV: &str = "\
Place_Name,Category,City,Price,Time_Minutes,Rating
Dunia Fantasi,Taman Hiburan,Jakarta,150000,360,4.6
";

    /// Write one CSV per dataset into a scratch directory and point the settings at it
    fn create_settings(dir_name: &str, depression_csv: &str) -> Settings {
        let dir = std::env::temp_dir().join(format!("pakar-algo-{}-{}", dir_name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let write = |file: &str, contents: &str| -> PathBuf {
            let path = dir.join(file);
            fs::write(&path, contents).unwrap();
            path
        };

        let mut settings = Settings::default();
        settings.datasets.depression.path = write("depression.csv", depression_csv);
        settings.datasets.anxiety.path = write("anxiety.csv", "Gender,Age,Anxiety Value\nF,18-24,7\n");
        settings.datasets.stress.path = write("stress.csv", "Gender,Age,Stress Value\nM,25-34,12\n");
        settings.datasets.tourism = write("tourism.csv", TOURISM_CSV);
        settings
    }

    #[test]
    fn test_load_valid_datasets() {
        let settings = create_settings("valid", "Gender,Age,Depression Value\nF,18-24,27\n");
        let state = AppState::load(&settings).unwrap();

        assert_eq!(state.datasets.depression.len(), 1);
        assert_eq!(state.places.len(), 1);
        assert_eq!(state.recommender.limit(), 5);
    }

    #[test]
    fn test_load_rejects_score_above_instrument_max() {
        let settings = create_settings(
            "above-max",
            "Gender,Age,Depression Value\nF,18-24,250\nM,18-24,0\n",
        );
        let err = AppState::load(&settings).unwrap_err();

        assert!(matches!(
            err,
            StartupError::Dataset { ref name, source: DatasetError::InvalidValue { line: 2, .. } }
                if name == "depression"
        ));
    }

    #[test]
    fn test_load_rejects_limit_out_of_range() {
        for limit in [0, 10] {
            let mut settings = Settings::default();
            settings.recommendation.limit = limit;

            let err = AppState::load(&settings).unwrap_err();
            assert!(matches!(err, StartupError::InvalidLimit { max: 5, .. }));
        }
    }

    #[test]
    fn test_load_rejects_small_penalty() {
        let mut settings = Settings::default();
        settings.matching.penalty = 30;

        let err = AppState::load(&settings).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Matching(MatchError::PenaltyTooSmall { instrument: Instrument::Stress, .. })
        ));
    }
}
