//! Field-by-field verification of a candidate document against submitted answers

use std::collections::HashMap;

use crate::models::Candidate;
use crate::models::MatchOutcome;
use crate::models::MatchRecord;
use crate::models::QueryAnswerPair;
use crate::models::RawCandidate;
use crate::models::StoredAnswer;

/// Stored placeholder for "no data for this question"
///
/// Compared after trimming and ignoring ASCII case, so `" n/a "` is also
/// the sentinel. A blank stored answer is treated the same way: both
/// classify as [`MatchOutcome::NotFound`], never as a match or mismatch.
pub const NOT_AVAILABLE: &str = "N/A";

const UNKNOWN_QUESTION: &str = "Unknown Question";

/// Lower-case and trim; idempotent
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Lookup of a document's stored answers by question id and by question text
pub struct AnswerIndex<'a> {
    by_id: HashMap<String, &'a StoredAnswer>,
    by_question: HashMap<String, &'a StoredAnswer>,
}

impl<'a> AnswerIndex<'a> {
    /// Later rows win when a question appears twice
    pub fn build(answers: &'a [StoredAnswer]) -> Self {
        let mut by_id = HashMap::with_capacity(answers.len());
        let mut by_question = HashMap::with_capacity(answers.len());

        for answer in answers {
            if let Some(question_id) = answer.question_id {
                by_id.insert(question_id.to_string(), answer);
            }
            by_question.insert(normalize(&answer.question_text), answer);
        }

        Self { by_id, by_question }
    }

    /// Resolve by question id first, then by normalized question text
    pub fn resolve(&self, pair: &QueryAnswerPair) -> Option<&'a StoredAnswer> {
        let by_id = pair
            .question_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .and_then(|id| self.by_id.get(id));

        by_id
            .or_else(|| {
                let question = normalize(&pair.question_text);
                if question.is_empty() {
                    None
                } else {
                    self.by_question.get(&question)
                }
            })
            .copied()
    }
}

/// False for the sentinel in any case or padding and for blank answers
fn is_usable(stored_answer: &str) -> bool {
    let trimmed = stored_answer.trim();
    !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case(NOT_AVAILABLE)
}

/// Classify one submitted pair against the answer resolved for it
pub fn classify(pair: &QueryAnswerPair, stored: Option<&StoredAnswer>) -> MatchRecord {
    let question_text = if pair.question_text.trim().is_empty() {
        UNKNOWN_QUESTION.to_string()
    } else {
        pair.question_text.clone()
    };

    match stored.filter(|answer| is_usable(&answer.answer_text)) {
        Some(answer) => {
            let outcome = if normalize(&answer.answer_text) == normalize(&pair.answer_text) {
                MatchOutcome::Match
            } else {
                MatchOutcome::Mismatch
            };
            MatchRecord {
                question_text,
                stored_answer: Some(answer.answer_text.clone()),
                submitted_answer: pair.answer_text.clone(),
                outcome,
            }
        }
        None => MatchRecord {
            question_text,
            stored_answer: None,
            submitted_answer: pair.answer_text.clone(),
            outcome: MatchOutcome::NotFound,
        },
    }
}

/// Compare every submitted pair with the document's stored answers
///
/// A document without stored answers simply verifies zero matches.
pub fn verify_candidate(
    raw: RawCandidate,
    stored: &[StoredAnswer],
    pairs: &[QueryAnswerPair],
) -> Candidate {
    let index = AnswerIndex::build(stored);
    let (matched, unmatched): (Vec<_>, Vec<_>) = pairs
        .iter()
        .map(|pair| classify(pair, index.resolve(pair)))
        .partition(|record| record.outcome == MatchOutcome::Match);

    let raw_match_ratio = if pairs.is_empty() {
        0.0
    } else {
        matched.len() as f64 / pairs.len() as f64
    };

    Candidate {
        document_id: raw.document_id,
        document_name: raw.document_name,
        raw_match_ratio,
        relevance: raw.relevance,
        matched,
        unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelevanceDetails;

    fn stored(document_id: i64, question_id: Option<i64>, question: &str, answer: &str) -> StoredAnswer {
        StoredAnswer {
            document_id,
            question_id,
            question_text: question.to_string(),
            answer_text: answer.to_string(),
        }
    }

    fn raw(document_id: i64) -> RawCandidate {
        RawCandidate {
            document_id,
            document_name: format!("doc-{document_id}.pdf"),
            relevance: RelevanceDetails {
                lexical_rank: 0.3,
                vector_similarity: 0.0,
            },
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for text in ["  Yes ", "10%", "PRIVATELY Held\n", ""] {
            let once = normalize(text);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_partial_agreement() {
        let answers = vec![
            stored(1, Some(1), "Is cofounder?", "Yes"),
            stored(1, Some(4), "Equity?", "5%"),
        ];
        let pairs = vec![
            QueryAnswerPair::new("Is cofounder?", "Yes"),
            QueryAnswerPair::new("Equity?", "10%"),
        ];

        let candidate = verify_candidate(raw(1), &answers, &pairs);

        assert_eq!(candidate.verified_match_count(), 1);
        assert!((candidate.raw_match_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(candidate.matched[0].question_text, "Is cofounder?");
        assert_eq!(candidate.unmatched.len(), 1);
        assert_eq!(candidate.unmatched[0].outcome, MatchOutcome::Mismatch);
        assert_eq!(candidate.unmatched[0].stored_answer.as_deref(), Some("5%"));
        assert_eq!(candidate.match_score(), "50.0%");
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let answers = vec![stored(1, None, "  Company Type?", "Privately Held ")];
        let pairs = vec![QueryAnswerPair::new("company type?  ", "  privately held")];

        let candidate = verify_candidate(raw(1), &answers, &pairs);
        assert_eq!(candidate.verified_match_count(), 1);
    }

    #[test]
    fn test_id_lookup_precedes_text_lookup() {
        let answers = vec![
            stored(1, Some(2), "Role?", "CTO"),
            stored(1, Some(9), "Title in company?", "CEO"),
        ];
        // The text points at question 9 but the id at question 2
        let pairs = vec![QueryAnswerPair::new("Title in company?", "CTO").with_id("2")];

        let candidate = verify_candidate(raw(1), &answers, &pairs);
        assert_eq!(candidate.verified_match_count(), 1);
        assert_eq!(candidate.matched[0].stored_answer.as_deref(), Some("CTO"));
    }

    #[test]
    fn test_unknown_id_falls_back_to_text() {
        let answers = vec![stored(1, Some(3), "Publicly traded?", "No")];
        let pairs = vec![QueryAnswerPair::new("publicly traded?", "no").with_id("99")];

        let candidate = verify_candidate(raw(1), &answers, &pairs);
        assert_eq!(candidate.verified_match_count(), 1);
    }

    #[test]
    fn test_sentinel_is_never_matched() {
        let answers = vec![
            stored(1, Some(1), "Grants?", "N/A"),
            stored(1, Some(2), "Sponsor?", " n/a "),
        ];
        // Even a caller submitting the sentinel itself does not match it
        let pairs = vec![
            QueryAnswerPair::new("Grants?", "N/A"),
            QueryAnswerPair::new("Sponsor?", "Yes"),
        ];

        let candidate = verify_candidate(raw(1), &answers, &pairs);
        assert_eq!(candidate.verified_match_count(), 0);
        assert!(candidate
            .unmatched
            .iter()
            .all(|r| r.outcome == MatchOutcome::NotFound && r.stored_answer.is_none()));
    }

    #[test]
    fn test_blank_stored_answer_is_not_found() {
        let answers = vec![stored(1, Some(1), "Grants?", "   ")];
        let pairs = vec![QueryAnswerPair::new("Grants?", "")];

        let candidate = verify_candidate(raw(1), &answers, &pairs);
        assert_eq!(candidate.verified_match_count(), 0);
        assert_eq!(candidate.unmatched[0].outcome, MatchOutcome::NotFound);
        assert_eq!(candidate.unmatched[0].stored_answer, None);
    }

    #[test]
    fn test_missing_question_is_not_found() {
        let answers = vec![stored(1, Some(1), "Is cofounder?", "Yes")];
        let pairs = vec![QueryAnswerPair::new("Clinical research?", "Basic")];

        let candidate = verify_candidate(raw(1), &answers, &pairs);
        assert_eq!(candidate.unmatched[0].outcome, MatchOutcome::NotFound);
        assert_eq!(candidate.unmatched[0].submitted_answer, "Basic");
    }

    #[test]
    fn test_document_without_answers_verifies_zero() {
        let pairs = vec![QueryAnswerPair::new("Is cofounder?", "Yes")];
        let candidate = verify_candidate(raw(5), &[], &pairs);

        assert_eq!(candidate.verified_match_count(), 0);
        assert!(candidate.raw_match_ratio.abs() < f64::EPSILON);
        assert_eq!(candidate.unmatched.len(), 1);
    }

    #[test]
    fn test_blank_question_gets_placeholder() {
        let answers = vec![stored(1, Some(6), "Effort?", "20%")];
        let pairs = vec![QueryAnswerPair::new("", "20%").with_id("6")];

        let candidate = verify_candidate(raw(1), &answers, &pairs);
        assert_eq!(candidate.matched[0].question_text, "Unknown Question");
    }

    #[test]
    fn test_ratio_zero_without_pairs() {
        let candidate = verify_candidate(raw(1), &[stored(1, None, "Q", "A")], &[]);
        assert!(candidate.raw_match_ratio.abs() < f64::EPSILON);
        assert_eq!(candidate.verified_match_count(), 0);
    }
}
