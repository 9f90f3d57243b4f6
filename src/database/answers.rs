use super::Database;
use crate::models::DocumentId;
use crate::models::StoredAnswer;
use crate::Result;

#[derive(sqlx::FromRow)]
struct StoredAnswerRow {
    document_id: i64,
    question_id: Option<i32>,
    question_text: String,
    answer_text: String,
}

impl Database {
    /// All stored answers of one document, in ingestion order
    pub async fn stored_answers(&self, document_id: DocumentId) -> Result<Vec<StoredAnswer>> {
        let rows = sqlx::query_as::<_, StoredAnswerRow>(
            r"
            SELECT document_id, question_id, question_text, answer_text
            FROM document_answers
            WHERE document_id = $1
            ORDER BY answer_id
            ",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| StoredAnswer {
                document_id: row.document_id,
                question_id: row.question_id.map(i64::from),
                question_text: row.question_text,
                answer_text: row.answer_text,
            })
            .collect())
    }
}
