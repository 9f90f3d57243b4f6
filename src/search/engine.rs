//! Orchestration of keyword search, conditional vector fallback and ranking

use std::sync::Arc;
use std::time::Duration;

use futures::stream;
use futures::StreamExt;
use futures::TryStreamExt;
use tracing::debug;
use tracing::info;

use super::compose_query;
use super::merge_and_rank;
use super::verify_candidate;
use super::DocumentStore;
use super::Embedder;
use crate::config::SearchSettings;
use crate::config::MAX_RESULT_LIMIT;
use crate::errors::DocMatchError;
use crate::errors::Result;
use crate::models::Candidate;
use crate::models::DocumentId;
use crate::models::QueryAnswerPair;
use crate::models::RawCandidate;
use crate::models::SearchMethod;
use crate::models::SearchOutcome;

const DEFAULT_EMBED_TIMEOUT: Duration = Duration::from_secs(30);

/// Hybrid search engine over injected store and embedding collaborators
#[derive(Clone)]
pub struct HybridSearchEngine {
    store: Arc<dyn DocumentStore>,
    embedder: Arc<dyn Embedder>,
    settings: SearchSettings,
    embed_timeout: Duration,
}

impl HybridSearchEngine {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        embedder: Arc<dyn Embedder>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            store,
            embedder,
            settings,
            embed_timeout: DEFAULT_EMBED_TIMEOUT,
        }
    }

    /// Upper bound on the single embedding round trip of a fallback
    #[must_use]
    pub const fn with_embed_timeout(mut self, timeout: Duration) -> Self {
        self.embed_timeout = timeout;
        self
    }

    pub const fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    fn result_limit(&self) -> usize {
        self.settings.result_limit.min(MAX_RESULT_LIMIT)
    }

    /// Find the stored documents whose answers agree with `pairs`
    ///
    /// An empty candidate list is a valid outcome, not an error.
    ///
    /// # Errors
    /// - [`DocMatchError::EmptyQuery`] when the pairs carry no text; nothing is searched
    /// - [`DocMatchError::StoreUnavailable`] on any store failure
    /// - [`DocMatchError::EmbeddingServiceFailure`] only when the vector fallback runs
    pub async fn search(&self, pairs: &[QueryAnswerPair]) -> Result<SearchOutcome> {
        let query_text = compose_query(pairs)?;
        info!(
            "Search request: {} pairs, query length {}",
            pairs.len(),
            query_text.len()
        );

        let lexical_raw = self
            .store
            .text_search(&query_text, self.settings.candidate_limit)
            .await?;
        let lexical_found = lexical_raw.len();
        let lexical = self.verify_all(lexical_raw, pairs).await?;
        info!(
            "Keyword search: {} raw candidates, {} verified",
            lexical_found,
            lexical.len()
        );

        if lexical.len() >= self.settings.fallback_threshold {
            info!("Keyword search sufficient, skipping vector search");
            return Ok(SearchOutcome {
                method: SearchMethod::Lexical,
                candidates: merge_and_rank(lexical, Vec::new(), self.result_limit()),
            });
        }

        info!(
            "Only {} verified keyword candidates (< {}), falling back to vector search",
            lexical.len(),
            self.settings.fallback_threshold
        );
        let exclude_ids: Vec<DocumentId> = lexical.iter().map(|c| c.document_id).collect();
        let embedding = self.embed(&query_text).await?;

        let vector_raw: Vec<RawCandidate> = self
            .store
            .vector_search(
                &embedding,
                &query_text,
                &exclude_ids,
                self.settings.similarity_threshold,
                self.settings.candidate_limit,
            )
            .await?
            .into_iter()
            .filter(|raw| !exclude_ids.contains(&raw.document_id))
            .collect();
        let vector_found = vector_raw.len();
        let vector = self.verify_all(vector_raw, pairs).await?;
        info!(
            "Vector search: {} new raw candidates, {} verified",
            vector_found,
            vector.len()
        );

        Ok(SearchOutcome {
            method: SearchMethod::Hybrid,
            candidates: merge_and_rank(lexical, vector, self.result_limit()),
        })
    }

    async fn embed(&self, query_text: &str) -> Result<Vec<f32>> {
        tokio::time::timeout(self.embed_timeout, self.embedder.embed(query_text))
            .await
            .map_err(|_| {
                DocMatchError::EmbeddingServiceFailure(format!(
                    "embedding request timed out after {}s",
                    self.embed_timeout.as_secs_f32()
                ))
            })?
    }

    /// Verify candidates concurrently, keeping search order and dropping zero-match ones
    async fn verify_all(
        &self,
        raw_candidates: Vec<RawCandidate>,
        pairs: &[QueryAnswerPair],
    ) -> Result<Vec<Candidate>> {
        if raw_candidates.is_empty() {
            return Ok(Vec::new());
        }

        let concurrency = self
            .settings
            .verify_concurrency
            .min(raw_candidates.len())
            .max(1);

        let verified: Vec<Candidate> = stream::iter(raw_candidates)
            .map(|raw| async move {
                let stored = self.store.stored_answers(raw.document_id).await?;
                let candidate = verify_candidate(raw, &stored, pairs);
                debug!(
                    "Verified document {} ({}): {}/{} matches",
                    candidate.document_id,
                    candidate.document_name,
                    candidate.verified_match_count(),
                    pairs.len()
                );
                Ok::<_, DocMatchError>(candidate)
            })
            .buffered(concurrency)
            .try_collect()
            .await?;

        Ok(verified
            .into_iter()
            .filter(|candidate| candidate.verified_match_count() > 0)
            .collect())
    }
}
