use actix_web::{web, HttpResponse, Responder};
use crate::models::{ErrorResponse, HealthResponse, PageParams, RecommendationRequest};
use crate::services::{ListingCatalog, RecommendError, Recommender};
use std::sync::Arc;
use tracing::Instrument;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub catalog: Arc<dyn ListingCatalog>,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog_healthy = state.catalog.health_check().await.unwrap_or(false);

    let status = if catalog_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations?page=1&limit=20
///
/// Request body:
/// ```json
/// {
///   "mustHave": { "location": "Kathmandu", "minPrice": "1,000,000" },
///   "preferences": { "budget": 5000000, "areaSqft": 1200 },
///   "page": 1,
///   "limit": 20
/// }
/// ```
/// `page` and `limit` in the query string take precedence over the body.
async fn recommend(
    state: web::Data<AppState>,
    body: web::Json<RecommendationRequest>,
    query: web::Query<PageParams>,
) -> impl Responder {
    let mut request = body.into_inner();
    let PageParams { page, limit } = query.into_inner();
    request.page = page.or(request.page);
    request.limit = limit.or(request.limit);

    let span = tracing::info_span!("recommend", request_id = %uuid::Uuid::new_v4());

    match state.recommender.recommend(request).instrument(span).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(RecommendError::Validation(errors)) => {
            tracing::info!("Validation failed for recommendation request: {}", errors);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Validation failed".to_string(),
                message: errors.to_string(),
                status_code: 400,
            })
        }
        Err(e @ RecommendError::Catalog(_)) => {
            tracing::error!("Failed to load candidates: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query catalog".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
