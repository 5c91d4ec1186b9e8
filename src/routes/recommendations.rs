use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{PlaceQuery, RecommendRequest, RecommendResponse};
use crate::routes::{error_response, AppState};

/// Configure tourism recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::post().to(recommend));
}

/// Recommend tourist destinations
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "category": "Taman Hiburan",
///   "city": "Jakarta",
///   "maxPrice": 100000
/// }
/// ```
///
/// An unparseable or missing `maxPrice` means no price ceiling.
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let query = PlaceQuery {
        category: req.category.trim().to_string(),
        city: req.city.trim().to_string(),
        max_price: req.price_ceiling(),
    };

    let result = state.recommender.recommend(&state.places, &query);

    tracing::info!(
        "Returning {} recommendations (from {} matching places)",
        result.len(),
        result.total_matches
    );

    HttpResponse::Ok().json(RecommendResponse {
        recommendations: result.places.into_iter().cloned().collect(),
        total_matches: result.total_matches,
    })
}
