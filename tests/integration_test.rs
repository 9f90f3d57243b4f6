//! Postgres-backed tests; need a pgvector database from config.toml

use docmatch::database::Database;
use docmatch::models::QueryAnswerPair;
use docmatch::search::DocumentStore;
use docmatch::AppConfig;
use docmatch::Result;
use sqlx::PgPool;

const DIMENSION: usize = 3;

async fn setup_test_db() -> Result<Database> {
    let config = AppConfig::load()?;
    let pool = PgPool::connect(config.database_url()).await?;
    let db = Database::new(pool);
    db.init_schema(DIMENSION).await?;
    Ok(db)
}

async fn insert_document(
    db: &Database,
    name: &str,
    chunk: &str,
    embedding: [f32; DIMENSION],
    answers: &[(i32, &str, &str)],
) -> Result<i64> {
    let document_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO documents (file_name, file_path) VALUES ($1, 'text-input') RETURNING document_id",
    )
    .bind(name)
    .fetch_one(db.pool())
    .await?;

    sqlx::query(
        r"
        INSERT INTO document_chunks (document_id, chunk_text, chunk_embedding, search_vector)
        VALUES ($1, $2, $3, to_tsvector('english', $2))
        ",
    )
    .bind(document_id)
    .bind(chunk)
    .bind(pgvector::Vector::from(embedding.to_vec()))
    .execute(db.pool())
    .await?;

    for (question_id, question, answer) in answers {
        sqlx::query(
            "INSERT INTO document_answers (document_id, question_id, question_text, answer_text) VALUES ($1, $2, $3, $4)",
        )
        .bind(document_id)
        .bind(*question_id)
        .bind(*question)
        .bind(*answer)
        .execute(db.pool())
        .await?;
    }

    Ok(document_id)
}

async fn cleanup(db: &Database, ids: &[i64]) -> Result<()> {
    sqlx::query("DELETE FROM documents WHERE document_id = ANY($1)")
        .bind(ids)
        .execute(db.pool())
        .await?;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires PostgreSQL with pgvector"]
async fn test_text_and_vector_search_roundtrip() -> Result<()> {
    let db = setup_test_db().await?;

    let keyword_doc = insert_document(
        &db,
        "zebrafish-cofounder.pdf",
        "Question: Is the researcher a cofounder? Answer: zebrafish holdings yes",
        [1.0, 0.0, 0.0],
        &[(1, "Is the researcher a cofounder?", "Yes")],
    )
    .await?;
    let vector_doc = insert_document(
        &db,
        "unrelated-wording.pdf",
        "Question: Role? Answer: advisor",
        [0.9, 0.1, 0.0],
        &[(2, "Role?", "Advisor")],
    )
    .await?;

    let lexical = DocumentStore::text_search(&db, "zebrafish cofounder", 10).await?;
    assert!(lexical.iter().any(|c| c.document_id == keyword_doc));
    assert!(lexical.iter().all(|c| c.document_id != vector_doc));

    let vector = DocumentStore::vector_search(
        &db,
        &[1.0, 0.0, 0.0],
        "zebrafish cofounder",
        &[keyword_doc],
        0.5,
        10,
    )
    .await?;
    assert!(vector.iter().any(|c| c.document_id == vector_doc));
    assert!(vector.iter().all(|c| c.document_id != keyword_doc));

    let answers = DocumentStore::stored_answers(&db, keyword_doc).await?;
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].question_id, Some(1));

    let pairs = [QueryAnswerPair::new("Is the researcher a cofounder?", "yes")];
    let raw = lexical
        .into_iter()
        .find(|c| c.document_id == keyword_doc)
        .expect("keyword document in text results");
    let candidate = docmatch::search::verify_candidate(raw, &answers, &pairs);
    assert_eq!(candidate.verified_match_count(), 1);

    cleanup(&db, &[keyword_doc, vector_doc]).await
}

#[tokio::test]
#[ignore = "Requires PostgreSQL with pgvector"]
async fn test_corpus_stats() -> Result<()> {
    let db = setup_test_db().await?;
    assert!(db.is_schema_initialized().await?);

    let before = db.corpus_stats().await?;
    let id = insert_document(&db, "stats.pdf", "stats chunk", [0.0, 1.0, 0.0], &[(1, "Q", "A")]).await?;
    let after = db.corpus_stats().await?;

    assert_eq!(after.documents, before.documents + 1);
    assert_eq!(after.answers, before.answers + 1);
    assert!(after.last_ingested_at.is_some());

    cleanup(&db, &[id]).await
}
