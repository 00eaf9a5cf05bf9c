use crate::config::SearchConfig;
use crate::document::{Document, DocumentId, DocumentStatus, Rating};
use crate::index::InvertedIndex;
use crate::query::Query;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Which documents a search may return.
pub enum DocumentFilter<'a> {
    Status(DocumentStatus),
    Predicate(Box<dyn Fn(DocumentId, DocumentStatus, Rating) -> bool + 'a>),
}

impl<'a> DocumentFilter<'a> {
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(DocumentId, DocumentStatus, Rating) -> bool + 'a,
    {
        DocumentFilter::Predicate(Box::new(predicate))
    }

    pub fn matches(&self, id: DocumentId, status: DocumentStatus, rating: Rating) -> bool {
        match self {
            DocumentFilter::Status(wanted) => status == *wanted,
            DocumentFilter::Predicate(predicate) => predicate(id, status, rating),
        }
    }
}

impl Default for DocumentFilter<'_> {
    fn default() -> Self { DocumentFilter::Status(DocumentStatus::Actual) }
}

impl From<DocumentStatus> for DocumentFilter<'_> {
    fn from(status: DocumentStatus) -> Self { DocumentFilter::Status(status) }
}

/// Score every document carrying a plus word, drop those carrying a minus
/// word or failing `filter`. Output is in ascending id order.
pub fn find_all_documents(
    index: &InvertedIndex,
    query: &Query,
    filter: &DocumentFilter<'_>,
) -> Vec<Document> {
    let mut document_to_relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
    for word in &query.plus_words {
        // words absent from the index contribute nothing
        let (Some(postings), Some(idf)) = (index.postings(word), index.inverse_document_freq(word))
        else {
            continue;
        };
        for (&id, &tf) in postings {
            *document_to_relevance.entry(id).or_insert(0.0) += tf * idf;
        }
    }

    for word in &query.minus_words {
        if let Some(postings) = index.postings(word) {
            for id in postings.keys() {
                document_to_relevance.remove(id);
            }
        }
    }

    let candidates = document_to_relevance.len();
    let matched: Vec<Document> = document_to_relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            let data = index.document(id)?;
            filter
                .matches(id, data.status, data.rating)
                .then(|| Document::new(id, relevance, data.rating))
        })
        .collect();
    tracing::trace!(candidates, matched = matched.len(), "ranked documents");
    matched
}

/// Order by relevance descending; documents whose relevance differs by less
/// than the configured epsilon are ordered by rating descending. Keeps at most
/// `max_result_document_count` documents.
///
/// Each output slot takes, among the remaining documents within epsilon of
/// the best remaining relevance, the one with the highest rating.
pub fn sort_and_truncate(mut documents: Vec<Document>, config: &SearchConfig) -> Vec<Document> {
    documents.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));

    let limit = config.max_result_document_count.min(documents.len());
    let mut ordered = Vec::with_capacity(limit);
    while ordered.len() < limit {
        let top = documents[0].relevance;
        let tied = documents[1..]
            .iter()
            .position(|doc| top - doc.relevance >= config.relevance_epsilon)
            .map_or(documents.len(), |offset| offset + 1);
        // first of the highest-rated, so equal ratings keep relevance order
        let pick = documents[..tied]
            .iter()
            .enumerate()
            .min_by_key(|(_, doc)| Reverse(doc.rating))
            .map_or(0, |(idx, _)| idx);
        ordered.push(documents.remove(pick));
    }
    ordered
}
