use super::Database;
use crate::models::CorpusStats;
use crate::Result;

const REQUIRED_TABLES: [&str; 3] = ["documents", "document_chunks", "document_answers"];

impl Database {
    /// Create the document tables and their search indexes
    ///
    /// Safe to run repeatedly. `dimension` must match the embedding model
    /// used at ingestion time.
    pub async fn init_schema(&self, dimension: usize) -> Result<()> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS documents (
                document_id BIGSERIAL PRIMARY KEY,
                file_name TEXT NOT NULL,
                file_path TEXT,
                created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // DDL cannot take bind parameters, the dimension is a plain integer
        sqlx::query(&format!(
            r"
            CREATE TABLE IF NOT EXISTS document_chunks (
                chunk_id BIGSERIAL PRIMARY KEY,
                document_id BIGINT NOT NULL REFERENCES documents(document_id) ON DELETE CASCADE,
                chunk_text TEXT NOT NULL,
                chunk_embedding VECTOR({dimension}),
                search_vector TSVECTOR
            )
            "
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS document_answers (
                answer_id BIGSERIAL PRIMARY KEY,
                document_id BIGINT NOT NULL REFERENCES documents(document_id) ON DELETE CASCADE,
                question_id INTEGER,
                question_text TEXT NOT NULL,
                answer_text TEXT NOT NULL,
                created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_document_chunks_search_vector ON document_chunks USING GIN (search_vector)",
            "CREATE INDEX IF NOT EXISTS idx_document_chunks_document_id ON document_chunks (document_id)",
            "CREATE INDEX IF NOT EXISTS idx_document_answers_document_id ON document_answers (document_id)",
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        tracing::info!("Schema initialized (embedding dimension {dimension})");
        Ok(())
    }

    /// Returns true if all document tables exist
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        for table_name in REQUIRED_TABLES {
            let exists = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = current_schema()
                    AND table_name = $1
                )
                ",
            )
            .bind(table_name)
            .fetch_one(&self.pool)
            .await?;

            if !exists {
                tracing::debug!("Missing required table: {}", table_name);
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Row counts over the ingested corpus
    pub async fn corpus_stats(&self) -> Result<CorpusStats> {
        let (documents, last_ingested_at) = sqlx::query_as::<_, (i64, Option<chrono::DateTime<chrono::Utc>>)>(
            "SELECT COUNT(*), MAX(created_at) FROM documents",
        )
        .fetch_one(&self.pool)
        .await?;

        let chunks = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM document_chunks")
            .fetch_one(&self.pool)
            .await?;

        let answers = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM document_answers")
            .fetch_one(&self.pool)
            .await?;

        Ok(CorpusStats {
            documents,
            chunks,
            answers,
            last_ingested_at,
        })
    }
}
