//! Merging and ranking of verified candidates from both search paths

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::Candidate;

/// Verification strength first, match ratio as tie-break; both descending
pub fn rank_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.verified_match_count()
        .cmp(&a.verified_match_count())
        .then_with(|| b.raw_match_ratio.total_cmp(&a.raw_match_ratio))
}

/// De-duplicate by document, rank, and keep the best `limit`
///
/// Earlier entries win duplicates, so keyword candidates shadow vector ones.
/// The sort is stable: equal candidates keep their search order.
pub fn merge_and_rank(
    lexical: Vec<Candidate>,
    vector: Vec<Candidate>,
    limit: usize,
) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut combined: Vec<Candidate> = lexical
        .into_iter()
        .chain(vector)
        .filter(|candidate| candidate.verified_match_count() > 0)
        .filter(|candidate| seen.insert(candidate.document_id))
        .collect();

    combined.sort_by(rank_order);
    combined.truncate(limit);
    combined
}
