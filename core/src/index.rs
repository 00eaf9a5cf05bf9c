use crate::document::{compute_average_rating, DocumentId, DocumentStatus, Rating};
use crate::error::{Result, SearchError};
use std::collections::BTreeMap;

/// Normalized term frequency: occurrences of a word / indexed words in the document.
pub type TermFreq = f64;

/// Per-document metadata. `word_freqs` is the document's own slice of the
/// postings, kept so the document can be retracted later.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentData {
    pub rating: Rating,
    pub status: DocumentStatus,
    pub word_freqs: BTreeMap<String, TermFreq>,
}

/// Inverted index: word -> {document id -> term frequency}, plus metadata.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    word_to_document_freqs: BTreeMap<String, BTreeMap<DocumentId, TermFreq>>,
    documents: BTreeMap<DocumentId, DocumentData>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index `words` (already stop-word filtered) under `id`.
    ///
    /// Rejects negative and already present ids and empty word lists before
    /// touching any state.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        words: &[String],
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::InvalidDocumentId { id });
        }
        if self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateDocumentId { id });
        }
        if words.is_empty() {
            return Err(SearchError::InvalidDocument { id });
        }

        let inv_word_count = 1.0 / words.len() as f64;
        let mut word_freqs: BTreeMap<String, TermFreq> = BTreeMap::new();
        for word in words {
            *word_freqs.entry(word.clone()).or_insert(0.0) += inv_word_count;
        }
        for (word, tf) in &word_freqs {
            self.word_to_document_freqs
                .entry(word.clone())
                .or_default()
                .insert(id, *tf);
        }
        self.documents.insert(
            id,
            DocumentData { rating: compute_average_rating(ratings), status, word_freqs },
        );
        Ok(())
    }

    /// Retract every posting of `id` and drop its metadata.
    pub fn remove_document(&mut self, id: DocumentId) -> Result<DocumentData> {
        let data = self
            .documents
            .remove(&id)
            .ok_or(SearchError::UnknownDocumentId { id })?;
        for word in data.word_freqs.keys() {
            if let Some(postings) = self.word_to_document_freqs.get_mut(word) {
                postings.remove(&id);
                if postings.is_empty() {
                    self.word_to_document_freqs.remove(word);
                }
            }
        }
        Ok(data)
    }

    /// Number of indexed documents; the corpus size used for IDF.
    pub fn document_count(&self) -> usize { self.documents.len() }

    pub fn document(&self, id: DocumentId) -> Option<&DocumentData> { self.documents.get(&id) }

    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocumentId, TermFreq>> {
        self.word_to_document_freqs.get(word)
    }

    /// Term frequency of `word` in document `id`, if the word occurs there.
    pub fn term_freq(&self, word: &str, id: DocumentId) -> Option<TermFreq> {
        self.postings(word).and_then(|postings| postings.get(&id).copied())
    }

    /// `ln(N / df)`; `None` when the word is not indexed anywhere.
    pub fn inverse_document_freq(&self, word: &str) -> Option<f64> {
        let postings = self.postings(word)?;
        Some((self.document_count() as f64 / postings.len() as f64).ln())
    }
}
