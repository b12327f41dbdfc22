use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;

use crate::core::{
    aggregate_tutor_ratings, rating_distribution, Advisor, ContentSuggestor, FilterCriteria, RecommendationSelector,
    Record, ScheduleOptimizer,
};
use crate::models::{AdvisoryContext, ListResponse, RatingsResponse};
use crate::routes::{ApiError, AppState};

/// Configure forum, feedback, progress, ranking and recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/forum/posts/search", web::post().to(search_posts))
        .route("/feedback/search", web::post().to(search_feedback))
        .route("/progress/search", web::post().to(search_progress))
        .route("/tutors/rankings", web::post().to(tutor_rankings))
        .route("/tutors/ratings", web::get().to(tutor_ratings))
        .route("/recommendations/{kind}", web::post().to(recommendations));
}

fn filtered<T: Record + Clone + Serialize>(items: &[T], criteria: &FilterCriteria) -> HttpResponse {
    let result = criteria.apply(items, Utc::now());
    HttpResponse::Ok().json(ListResponse {
        total: items.len(),
        items: result,
    })
}

async fn search_posts(state: web::Data<AppState>, criteria: web::Json<FilterCriteria>) -> HttpResponse {
    filtered(&state.catalog.forum_posts, &criteria)
}

async fn search_feedback(state: web::Data<AppState>, criteria: web::Json<FilterCriteria>) -> HttpResponse {
    filtered(&state.catalog.feedback, &criteria)
}

async fn search_progress(state: web::Data<AppState>, criteria: web::Json<FilterCriteria>) -> HttpResponse {
    filtered(&state.catalog.progress_reports, &criteria)
}

/// POST /api/v1/tutors/rankings
///
/// Tutor profiles only; the body's `role` filter still applies on top.
async fn tutor_rankings(state: web::Data<AppState>, criteria: web::Json<FilterCriteria>) -> HttpResponse {
    filtered(&state.catalog.tutors(), &criteria)
}

async fn tutor_ratings(state: web::Data<AppState>) -> HttpResponse {
    let feedback = &state.catalog.feedback;
    HttpResponse::Ok().json(RatingsResponse {
        tutors: aggregate_tutor_ratings(feedback),
        distribution: rating_distribution(feedback),
    })
}

/// POST /api/v1/recommendations/{kind}
///
/// `kind` is one of `learning`, `schedule`, `content`.
async fn recommendations(
    path: web::Path<String>,
    context: web::Json<AdvisoryContext>,
) -> Result<HttpResponse, ApiError> {
    let advisor: &dyn Advisor = match path.as_str() {
        "learning" => &RecommendationSelector,
        "schedule" => &ScheduleOptimizer,
        "content" => &ContentSuggestor,
        other => return Err(ApiError::NotFound(format!("recommendation kind '{}'", other))),
    };

    Ok(HttpResponse::Ok().json(advisor.generate(&context)))
}
