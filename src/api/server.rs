//! HTTP server implementation

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::database::Database;
use crate::embeddings::EmbeddingClient;
use crate::search::HybridSearchEngine;
use crate::Result;

/// Mount the API under `/api` with tracing, compression and optional CORS
pub fn build_router(state: AppState, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting docmatch API server...");

    // Initialize services
    let database = Arc::new(Database::from_config(config).await?);
    let embedder = Arc::new(EmbeddingClient::new(&config.embeddings)?);
    let engine = HybridSearchEngine::new(database.clone(), embedder, config.search_settings())
        .with_embed_timeout(Duration::from_secs(config.embeddings.timeout_secs));

    let state = AppState {
        database: Some(database),
        engine: Arc::new(engine),
    };

    let app = build_router(state, enable_cors);

    // Start server
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/health  - Health check");
    info!("  POST /api/search  - Hybrid document search");
    info!("  GET  /api/stats   - Corpus statistics");

    axum::serve(listener, app).await?;

    Ok(())
}
