//! Hybrid keyword/vector search with answer verification
//!
//! A request runs a free full-text search first and only pays for an
//! embedding when too few keyword hits survive verification:
//!
//! 1. [`compose_query`] joins the submitted pairs into one search string
//! 2. [`DocumentStore::text_search`] ranks documents by keyword relevance
//! 3. [`verify_candidate`] compares each hit's stored answers with the submitted ones
//! 4. below the fallback threshold, [`DocumentStore::vector_search`] adds new documents
//! 5. [`merge_and_rank`] de-duplicates, ranks and truncates
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use docmatch::config::AppConfig;
//! use docmatch::database::Database;
//! use docmatch::embeddings::EmbeddingClient;
//! use docmatch::models::QueryAnswerPair;
//! use docmatch::search::HybridSearchEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let engine = HybridSearchEngine::new(
//!         Arc::new(Database::from_config(&config).await?),
//!         Arc::new(EmbeddingClient::new(&config.embeddings)?),
//!         config.search_settings(),
//!     );
//!
//!     let pairs = vec![QueryAnswerPair::new("Is the researcher a cofounder?", "Yes")];
//!     let outcome = engine.search(&pairs).await?;
//!     println!("{}: {} documents", outcome.method, outcome.candidates.len());
//!
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod query;
pub mod ranker;
pub mod verifier;

use async_trait::async_trait;

pub use engine::HybridSearchEngine;
pub use query::compose_query;
pub use ranker::merge_and_rank;
pub use verifier::normalize;
pub use verifier::verify_candidate;

use crate::database::Database;
use crate::embeddings::EmbeddingClient;
use crate::errors::Result;
use crate::models::DocumentId;
use crate::models::RawCandidate;
use crate::models::StoredAnswer;

/// Read access to ingested documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents ranked by best chunk text relevance, descending
    async fn text_search(&self, query_text: &str, limit: usize) -> Result<Vec<RawCandidate>>;

    /// Documents with a chunk above `similarity_threshold`, never one in `exclude_ids`
    async fn vector_search(
        &self,
        embedding: &[f32],
        query_text: &str,
        exclude_ids: &[DocumentId],
        similarity_threshold: f32,
        limit: usize,
    ) -> Result<Vec<RawCandidate>>;

    async fn stored_answers(&self, document_id: DocumentId) -> Result<Vec<StoredAnswer>>;
}

/// Text to embedding vector
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

#[async_trait]
impl DocumentStore for Database {
    async fn text_search(&self, query_text: &str, limit: usize) -> Result<Vec<RawCandidate>> {
        let hits = Database::text_search(self, query_text, limit as i64).await?;
        Ok(hits.into_iter().map(RawCandidate::from).collect())
    }

    async fn vector_search(
        &self,
        embedding: &[f32],
        query_text: &str,
        exclude_ids: &[DocumentId],
        similarity_threshold: f32,
        limit: usize,
    ) -> Result<Vec<RawCandidate>> {
        let hits = Database::vector_search(
            self,
            embedding,
            query_text,
            exclude_ids,
            similarity_threshold,
            limit as i64,
        )
        .await?;
        Ok(hits.into_iter().map(RawCandidate::from).collect())
    }

    async fn stored_answers(&self, document_id: DocumentId) -> Result<Vec<StoredAnswer>> {
        Database::stored_answers(self, document_id).await
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.generate(text).await
    }
}
