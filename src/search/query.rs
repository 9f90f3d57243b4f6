//! Composition of the single search string shared by both search paths

use crate::errors::DocMatchError;
use crate::errors::Result;
use crate::models::QueryAnswerPair;

/// Join every question and answer, in submission order, with single spaces
///
/// Fails with [`DocMatchError::EmptyQuery`] when nothing but whitespace
/// remains, in which case no search must be attempted.
pub fn compose_query(pairs: &[QueryAnswerPair]) -> Result<String> {
    let query_text = pairs
        .iter()
        .flat_map(|pair| [pair.question_text.trim(), pair.answer_text.trim()])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if query_text.is_empty() {
        return Err(DocMatchError::EmptyQuery);
    }
    Ok(query_text)
}
