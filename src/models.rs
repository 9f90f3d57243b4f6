use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Primary key of an ingested document
pub type DocumentId = i64;

/// One question/answer pair submitted by a caller, after input normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnswerPair {
    pub question_text: String,
    pub question_id: Option<String>,
    pub answer_text: String,
}

impl QueryAnswerPair {
    pub fn new(question_text: impl Into<String>, answer_text: impl Into<String>) -> Self {
        Self {
            question_text: question_text.into(),
            question_id: None,
            answer_text: answer_text.into(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, question_id: impl Into<String>) -> Self {
        self.question_id = Some(question_id.into());
        self
    }
}

/// Answer persisted for a document at ingestion time (read-only here)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAnswer {
    pub document_id: DocumentId,
    pub question_id: Option<i64>,
    pub question_text: String,
    pub answer_text: String,
}

/// Relevance scores reported by the store for a candidate document
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RelevanceDetails {
    #[serde(rename = "keyword_rank")]
    pub lexical_rank: f32,
    #[serde(rename = "vector")]
    pub vector_similarity: f32,
}

/// Document hit from either search path, before verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub document_id: DocumentId,
    pub document_name: String,
    pub relevance: RelevanceDetails,
}

/// Classification of one submitted pair against a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Match,
    Mismatch,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub question_text: String,
    /// `None` when the document holds no usable answer
    pub stored_answer: Option<String>,
    pub submitted_answer: String,
    pub outcome: MatchOutcome,
}

/// A raw candidate after field-by-field verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub document_id: DocumentId,
    pub document_name: String,
    pub raw_match_ratio: f64,
    pub relevance: RelevanceDetails,
    pub matched: Vec<MatchRecord>,
    pub unmatched: Vec<MatchRecord>,
}

impl Candidate {
    pub fn verified_match_count(&self) -> usize {
        self.matched.len()
    }

    /// Match ratio rendered as a one-decimal percentage, e.g. `66.7%`
    pub fn match_score(&self) -> String {
        format!("{:.1}%", self.raw_match_ratio * 100.0)
    }
}

/// Which search paths contributed to a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMethod {
    Lexical,
    Hybrid,
}

impl SearchMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lexical => "Lexical",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl std::fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranked, verified result of one search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub method: SearchMethod,
    pub candidates: Vec<Candidate>,
}

/// Counts over the ingested corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub documents: i64,
    pub chunks: i64,
    pub answers: i64,
    pub last_ingested_at: Option<DateTime<Utc>>,
}
