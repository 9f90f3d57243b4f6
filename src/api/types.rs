//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::models::Candidate;
use crate::models::CorpusStats;
use crate::models::MatchOutcome;
use crate::models::MatchRecord;
use crate::models::QueryAnswerPair;
use crate::models::RelevanceDetails;
use crate::models::SearchOutcome;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Question identifiers arrive as integers or strings
///
/// Any other JSON value is kept as its JSON text. It still takes part in
/// the id lookup, where it usually resolves to nothing and the question
/// text decides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// One inbound Q&A record under any of the accepted field names
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QaRecordInput {
    #[serde(default)]
    pub question_id: Option<QuestionId>,
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub answer_text: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

fn first_non_empty(candidates: [Option<String>; 3]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

impl QaRecordInput {
    /// Map onto the canonical pair the engine works with
    pub fn into_pair(self) -> QueryAnswerPair {
        QueryAnswerPair {
            question_text: first_non_empty([self.question_text, self.question, self.text]),
            question_id: self.question_id.map(|id| id.to_string()),
            answer_text: first_non_empty([self.answer_text, self.answer, None]),
        }
    }
}

/// Search request: `{"questions_answers": [...]}` or a bare array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SearchRequest {
    Wrapped { questions_answers: Vec<QaRecordInput> },
    Bare(Vec<QaRecordInput>),
}

impl SearchRequest {
    pub fn into_pairs(self) -> Vec<QueryAnswerPair> {
        let records = match self {
            Self::Wrapped { questions_answers } => questions_answers,
            Self::Bare(records) => records,
        };
        records.into_iter().map(QaRecordInput::into_pair).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchedQa {
    pub question: String,
    pub stored_answer: Option<String>,
    pub submitted_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnmatchedQa {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_answer: Option<String>,
    pub submitted_answer: String,
    pub status: MatchOutcome,
}

impl From<MatchRecord> for MatchedQa {
    fn from(record: MatchRecord) -> Self {
        Self {
            question: record.question_text,
            stored_answer: record.stored_answer,
            submitted_answer: record.submitted_answer,
        }
    }
}

impl From<MatchRecord> for UnmatchedQa {
    fn from(record: MatchRecord) -> Self {
        Self {
            question: record.question_text,
            stored_answer: record.stored_answer,
            submitted_answer: record.submitted_answer,
            status: record.outcome,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub document_id: i64,
    pub document_name: String,
    pub match_score: String,
    pub search_method: String,
    pub relevance_details: RelevanceDetails,
    pub matched_qa: Vec<MatchedQa>,
    pub unmatched_qa: Vec<UnmatchedQa>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub search_method_used: String,
    pub results: Vec<SearchResultItem>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        let method = outcome.method.to_string();
        let results = outcome
            .candidates
            .into_iter()
            .map(|candidate: Candidate| SearchResultItem {
                document_id: candidate.document_id,
                match_score: candidate.match_score(),
                document_name: candidate.document_name,
                search_method: method.clone(),
                relevance_details: candidate.relevance,
                matched_qa: candidate.matched.into_iter().map(MatchedQa::from).collect(),
                unmatched_qa: candidate
                    .unmatched
                    .into_iter()
                    .map(UnmatchedQa::from)
                    .collect(),
            })
            .collect();

        Self {
            search_method_used: method,
            results,
        }
    }
}

/// Corpus statistics response
pub type StatsResponse = CorpusStats;
