use pgvector::Vector;

use super::Database;
use crate::models::DocumentId;
use crate::models::RawCandidate;
use crate::models::RelevanceDetails;
use crate::Result;

/// Per-document keyword relevance row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LexicalHit {
    pub document_id: DocumentId,
    pub document_name: String,
    pub max_rank: f64,
}

/// Per-document embedding similarity row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VectorHit {
    pub document_id: DocumentId,
    pub document_name: String,
    pub max_similarity: f64,
    pub max_rank: f64,
}

impl From<LexicalHit> for RawCandidate {
    fn from(hit: LexicalHit) -> Self {
        Self {
            document_id: hit.document_id,
            document_name: hit.document_name,
            relevance: RelevanceDetails {
                lexical_rank: hit.max_rank as f32,
                vector_similarity: 0.0,
            },
        }
    }
}

impl From<VectorHit> for RawCandidate {
    fn from(hit: VectorHit) -> Self {
        Self {
            document_id: hit.document_id,
            document_name: hit.document_name,
            relevance: RelevanceDetails {
                lexical_rank: hit.max_rank as f32,
                vector_similarity: hit.max_similarity as f32,
            },
        }
    }
}

impl Database {
    /// Full-text search over chunks, best chunk rank per document
    pub async fn text_search(&self, query_text: &str, limit: i64) -> Result<Vec<LexicalHit>> {
        let hits = sqlx::query_as::<_, LexicalHit>(
            r"
            SELECT
                d.document_id,
                d.file_name AS document_name,
                MAX(ts_rank(c.search_vector, plainto_tsquery('english', $1)))::float8 AS max_rank
            FROM document_chunks c
            INNER JOIN documents d ON c.document_id = d.document_id
            WHERE c.search_vector @@ plainto_tsquery('english', $1)
            GROUP BY d.document_id, d.file_name
            ORDER BY max_rank DESC, d.document_id ASC
            LIMIT $2
            ",
        )
        .bind(query_text)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("Text search returned {} documents", hits.len());
        Ok(hits)
    }

    /// Cosine-similarity search over chunk embeddings, best chunk per document
    ///
    /// Documents in `exclude_ids` are filtered before the limit applies, so
    /// up to `limit` new documents come back.
    pub async fn vector_search(
        &self,
        query_embedding: &[f32],
        query_text: &str,
        exclude_ids: &[DocumentId],
        similarity_threshold: f32,
        limit: i64,
    ) -> Result<Vec<VectorHit>> {
        let embedding = Vector::from(query_embedding.to_vec());

        let hits = sqlx::query_as::<_, VectorHit>(
            r"
            WITH matches AS (
                SELECT
                    d.document_id,
                    d.file_name,
                    1 - (c.chunk_embedding <=> $1) AS vector_sim,
                    ts_rank(c.search_vector, plainto_tsquery('english', $2)) AS text_rank
                FROM document_chunks c
                INNER JOIN documents d ON c.document_id = d.document_id
                WHERE c.chunk_embedding IS NOT NULL
                    AND 1 - (c.chunk_embedding <=> $1) > $3
                    AND NOT (c.document_id = ANY($4))
            )
            SELECT
                document_id,
                file_name AS document_name,
                MAX(vector_sim)::float8 AS max_similarity,
                COALESCE(MAX(text_rank), 0)::float8 AS max_rank
            FROM matches
            GROUP BY document_id, file_name
            ORDER BY max_similarity DESC, max_rank DESC, document_id ASC
            LIMIT $5
            ",
        )
        .bind(embedding)
        .bind(query_text)
        .bind(f64::from(similarity_threshold))
        .bind(exclude_ids)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            "Vector search returned {} documents ({} excluded)",
            hits.len(),
            exclude_ids.len()
        );
        Ok(hits)
    }
}
