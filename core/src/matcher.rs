use crate::document::{DocumentId, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::Query;

/// Plus words of `query` that occur in document `id`, in lexicographic order,
/// together with the document's status. Any minus word occurring in the
/// document empties the list.
pub fn match_document(
    index: &InvertedIndex,
    query: &Query,
    id: DocumentId,
) -> Result<(Vec<String>, DocumentStatus)> {
    let data = index.document(id).ok_or(SearchError::UnknownDocumentId { id })?;

    // Each word is checked against this document only; a word missing from
    // the whole corpus simply does not match.
    let excluded = query
        .minus_words
        .iter()
        .any(|word| index.term_freq(word, id).is_some());
    if excluded {
        return Ok((Vec::new(), data.status));
    }

    let matched_words = query
        .plus_words
        .iter()
        .filter(|word| index.term_freq(word, id).is_some())
        .cloned()
        .collect();
    Ok((matched_words, data.status))
}
