//! CLI command handlers

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::api::serve_api;
use crate::api::types::SearchRequest;
use crate::api::types::SearchResponse;
use crate::cli::output::*;
use crate::database::Database;
use crate::embeddings::EmbeddingClient;
use crate::search::HybridSearchEngine;
use crate::AppConfig;
use crate::Result;

pub async fn handle_init(config: &AppConfig) -> Result<()> {
    let database = Database::from_config(config).await?;
    if database.is_schema_initialized().await? {
        println!("✅ Schema already present, ensuring indexes");
    }
    database.init_schema(config.embedding_dimension()).await?;
    println!("✅ Schema initialized");
    Ok(())
}

/// Read Q&A records from a JSON file in any accepted request shape
pub fn load_search_request(path: &Path) -> Result<SearchRequest> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub async fn handle_search(config: &AppConfig, file: &Path, json: bool) -> Result<()> {
    let pairs = load_search_request(file)?.into_pairs();

    let database = Arc::new(Database::from_config(config).await?);
    let embedder = Arc::new(EmbeddingClient::new(&config.embeddings)?);
    let engine = HybridSearchEngine::new(database, embedder, config.search_settings())
        .with_embed_timeout(Duration::from_secs(config.embeddings.timeout_secs));

    let response = SearchResponse::from(engine.search(&pairs).await?);
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_search_response(&response);
    }
    Ok(())
}

pub async fn handle_serve(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    cors: bool,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let cors = cors || config.server.enable_cors;

    println!("🚀 Starting docmatch API Server");
    println!("📍 Host: {host}");
    println!("🔌 Port: {port}");
    println!("🌐 CORS: {}", if cors { "Enabled" } else { "Disabled" });

    serve_api(config, host, port, cors).await
}

pub async fn handle_stats(config: &AppConfig) -> Result<()> {
    let database = Database::from_config(config).await?;
    print_stats(&database.corpus_stats().await?);
    Ok(())
}

pub fn handle_config(config: &AppConfig) {
    print_config(config);
}
