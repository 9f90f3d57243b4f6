/// API request handlers
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::api::types::SearchRequest;
use crate::api::types::SearchResponse;
use crate::api::types::StatsResponse;
use crate::database::Database;
use crate::errors::DocMatchError;
use crate::search::HybridSearchEngine;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub database: Option<Arc<Database>>,
    pub engine: Arc<HybridSearchEngine>,
}

pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

fn api_error(err: &DocMatchError) -> ApiError {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ApiResponse::error(err.to_string())))
}

/// Health check handler
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Hybrid document search (POST /api/search)
pub async fn search_documents(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let pairs = req.into_pairs();
    info!("POST /api/search: {} pairs", pairs.len());

    match state.engine.search(&pairs).await {
        Ok(outcome) => {
            info!(
                "Search complete via {}: {} results",
                outcome.method,
                outcome.candidates.len()
            );
            Ok(Json(ApiResponse::success(SearchResponse::from(outcome))))
        }
        Err(e) if e.is_client_error() => {
            warn!("Rejected search request: {}", e);
            Err(api_error(&e))
        }
        Err(e) => {
            error!("Search failed: {}", e);
            Err(api_error(&e))
        }
    }
}

/// Corpus statistics (GET /api/stats)
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StatsResponse>>, ApiError> {
    info!("GET /api/stats");

    let database = state.database.as_ref().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error("Statistics require a database connection")),
        )
    })?;

    match database.corpus_stats().await {
        Ok(stats) => Ok(Json(ApiResponse::success(stats))),
        Err(e) => {
            error!("Error fetching statistics: {}", e);
            Err(api_error(&e))
        }
    }
}
