//! API handlers for the review REST endpoints

pub mod health;
pub mod notifications;
pub mod openapi;
pub mod providers;
pub mod refresh;
pub mod reports;
pub mod titles;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Match review
        .route("/providers/:id/summary", get(providers::get_summary))
        .route("/providers/:id/titles", get(titles::list_titles))
        .route("/providers/:id/titles/load", post(titles::load_titles))
        .route("/providers/:id/titles/more", post(titles::load_more_titles))
        .route(
            "/providers/:id/titles/:title_id/actions",
            get(titles::list_actions).post(titles::apply_action),
        )
        .route("/providers/:id/update-matches", post(refresh::update_matches))
        // Reports
        .route("/agreements/:id/use-over-time", get(reports::use_over_time))
        .route("/agreements/:id/reqs-by-pub-year", get(reports::reqs_by_pub_year))
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
