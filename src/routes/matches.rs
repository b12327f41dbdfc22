use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::models::{FindMatchesRequest, FindMatchesResponse, HealthResponse};
use crate::routes::{ApiError, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "requesterId": "string",
///   "subjectPreferences": ["string"],
///   "learningStyle": "visual|auditory|kinesthetic|reading",
///   "limit": 10
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: field_errors={:?}", errors);
        return Err(errors.into());
    }

    let limit = req
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit) as usize;

    let requester = state.catalog.find_profile(&req.requester_id);
    let candidates = state.catalog.tutors();
    let criteria = req.criteria();

    tracing::info!(
        "Finding tutors for requester: {}, preferences: {:?}, limit: {}",
        criteria.requester_id,
        criteria.subject_preferences,
        limit
    );

    let mut rng = state.rng();
    let outcome = state
        .matcher
        .find_matches(requester, &candidates, &criteria, limit, &mut rng);

    let response = FindMatchesResponse {
        matches: outcome.matches,
        total_candidates: outcome.total_candidates,
        requester_found: requester.is_some(),
    };

    tracing::info!(
        "Returning {} matches for requester {} (from {} candidates)",
        response.matches.len(),
        criteria.requester_id,
        response.total_candidates
    );

    Ok(HttpResponse::Ok().json(response))
}
