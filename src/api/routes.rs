//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Search
        .route("/search", post(handlers::search_documents))
        // Statistics
        .route("/stats", get(handlers::get_stats))
        .with_state(state)
}
