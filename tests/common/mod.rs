//! Shared in-memory collaborators for engine and API tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use docmatch::models::DocumentId;
use docmatch::models::RawCandidate;
use docmatch::models::RelevanceDetails;
use docmatch::models::StoredAnswer;
use docmatch::search::DocumentStore;
use docmatch::search::Embedder;
use docmatch::DocMatchError;
use docmatch::Result;

/// Corpus where keyword and vector hits are chosen per document up front
#[derive(Default)]
pub struct FakeCorpus {
    documents: Vec<(RawCandidate, bool, f32)>,
    answers: HashMap<DocumentId, Vec<StoredAnswer>>,
    pub text_queries: Mutex<Vec<String>>,
    pub vector_queries: Mutex<Vec<(String, Vec<DocumentId>)>>,
}

impl FakeCorpus {
    /// Add a document; `keyword_hit` puts it in full-text results, a
    /// `similarity` above the threshold puts it in vector results
    pub fn add(
        &mut self,
        id: DocumentId,
        keyword_hit: bool,
        similarity: f32,
        answers: &[(Option<i64>, &str, &str)],
    ) {
        self.answers.insert(
            id,
            answers
                .iter()
                .map(|(question_id, question, answer)| StoredAnswer {
                    document_id: id,
                    question_id: *question_id,
                    question_text: (*question).to_string(),
                    answer_text: (*answer).to_string(),
                })
                .collect(),
        );
        self.documents.push((
            RawCandidate {
                document_id: id,
                document_name: format!("management-plan-{id}.pdf"),
                relevance: RelevanceDetails {
                    lexical_rank: if keyword_hit { 1.0 / id as f32 } else { 0.0 },
                    vector_similarity: similarity,
                },
            },
            keyword_hit,
            similarity,
        ));
    }

    pub fn vector_calls(&self) -> usize {
        self.vector_queries.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentStore for FakeCorpus {
    async fn text_search(&self, query_text: &str, limit: usize) -> Result<Vec<RawCandidate>> {
        self.text_queries.lock().unwrap().push(query_text.to_string());
        Ok(self
            .documents
            .iter()
            .filter(|(_, keyword_hit, _)| *keyword_hit)
            .take(limit)
            .map(|(raw, _, _)| raw.clone())
            .collect())
    }

    async fn vector_search(
        &self,
        _embedding: &[f32],
        query_text: &str,
        exclude_ids: &[DocumentId],
        similarity_threshold: f32,
        limit: usize,
    ) -> Result<Vec<RawCandidate>> {
        self.vector_queries
            .lock()
            .unwrap()
            .push((query_text.to_string(), exclude_ids.to_vec()));

        let mut hits: Vec<&(RawCandidate, bool, f32)> = self
            .documents
            .iter()
            .filter(|(raw, _, similarity)| {
                *similarity > similarity_threshold && !exclude_ids.contains(&raw.document_id)
            })
            .collect();
        hits.sort_by(|a, b| b.2.total_cmp(&a.2));
        Ok(hits.into_iter().take(limit).map(|(raw, _, _)| raw.clone()).collect())
    }

    async fn stored_answers(&self, document_id: DocumentId) -> Result<Vec<StoredAnswer>> {
        Ok(self.answers.get(&document_id).cloned().unwrap_or_default())
    }
}

pub struct CountingEmbedder {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl CountingEmbedder {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for CountingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DocMatchError::EmbeddingServiceFailure(
                "embedding deployment not found".to_string(),
            ));
        }
        Ok(vec![0.0; 8])
    }
}
