use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Instrument, MatchError, ScoringError};
use crate::models::{
    AssessmentRequest, AssessmentResponse, ClinicalQuery, HealthResponse, InstrumentInfo,
    MatchPayload,
};
use crate::routes::{error_response, AppState};

/// Configure health, instrument and assessment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/instruments", web::get().to(list_instruments))
        .route("/assessments/{instrument}", web::post().to(assess));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        place_rows: state.places.len(),
    })
}

/// List supported instruments
///
/// GET /api/v1/instruments
async fn list_instruments(state: web::Data<AppState>) -> impl Responder {
    let instruments: Vec<InstrumentInfo> = Instrument::ALL
        .iter()
        .map(|&instrument| InstrumentInfo {
            name: instrument.name(),
            title: instrument.title(),
            item_count: instrument.item_count(),
            max_item_value: instrument.max_item_value(),
            max_score: instrument.max_score(),
            dataset_rows: state.datasets.by_ref(instrument).len(),
        })
        .collect();

    HttpResponse::Ok().json(instruments)
}

/// Score a questionnaire and find the closest dataset row
///
/// POST /api/v1/assessments/{instrument}
///
/// Request body:
/// ```json
/// {
///   "answers": { "q1": 2, "q2": "1", "q3": null },
///   "gender": "F",
///   "age": "18-24"
/// }
/// ```
async fn assess(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<AssessmentRequest>,
) -> impl Responder {
    let instrument = match path.parse::<Instrument>() {
        Ok(instrument) => instrument,
        Err(e) => return error_response(StatusCode::NOT_FOUND, "Unknown instrument", e),
    };

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for {} assessment: {:?}", instrument, errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let policy = state.matching.answer_policies.get(instrument);
    let parsed = match instrument.parse_answers(&req.answers, policy) {
        Ok(parsed) => parsed,
        Err(e) => return scoring_error(e),
    };

    let score = match instrument.score(&parsed.values) {
        Ok(score) => score,
        Err(e) => return scoring_error(e),
    };

    let query = ClinicalQuery::new(score, req.gender.as_deref(), req.age.as_deref());
    let mode = state.matching.modes.get(instrument);
    let table = state.datasets.by_ref(instrument);

    let best = match state.matcher.find_best_match(table, &query, mode) {
        Ok(best) => best,
        Err(e @ MatchError::NoMatchFound) => {
            tracing::info!("No {} match for score {} ({})", instrument, score, mode);
            return error_response(StatusCode::NOT_FOUND, "No match found", e);
        }
        Err(e) => {
            tracing::error!("Matcher failed for {}: {}", instrument, e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Matching failed", e);
        }
    };

    tracing::info!(
        "Scored {} at {} (defaulted {}), matched row {} with distance {}",
        instrument,
        score,
        parsed.defaulted_items,
        best.index,
        best.distance.total
    );

    HttpResponse::Ok().json(AssessmentResponse {
        assessment_id: uuid::Uuid::new_v4().to_string(),
        instrument: instrument.to_string(),
        score,
        max_score: instrument.max_score(),
        defaulted_items: parsed.defaulted_items,
        severity: instrument.severity(score),
        mode,
        best_match: MatchPayload {
            index: best.index,
            record: best.record.clone(),
            distance: best.distance,
        },
    })
}

fn scoring_error(e: ScoringError) -> HttpResponse {
    tracing::info!("Rejected assessment: {}", e);
    error_response(StatusCode::BAD_REQUEST, "Invalid answers", e)
}
