use crate::config::SearchConfig;
use crate::document::{Document, DocumentId, DocumentStatus, Rating};
use crate::error::Result;
use crate::index::{InvertedIndex, TermFreq};
use crate::matcher;
use crate::query::parse_query;
use crate::ranker::{find_all_documents, sort_and_truncate, DocumentFilter};
use crate::tokenizer::StopWords;
use std::collections::BTreeMap;

/// In-memory TF-IDF search server over short documents.
#[derive(Debug, Clone, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    config: SearchConfig,
}

impl SearchServer {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, ..Self::default() })
    }

    pub fn with_stop_words(text: &str) -> Self {
        let mut server = Self::new();
        server.set_stop_words(text);
        server
    }

    /// Add the space-separated words of `text` to the stop-word set.
    /// Documents already indexed are not re-indexed.
    pub fn set_stop_words(&mut self, text: &str) {
        self.stop_words.configure(text);
    }

    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> Result<()> {
        let words = self.stop_words.split_into_words_no_stop(text);
        match self.index.add_document(id, &words, status, ratings) {
            Ok(()) => {
                tracing::debug!(id, words = words.len(), %status, "document added");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "document rejected");
                Err(err)
            }
        }
    }

    pub fn remove_document(&mut self, id: DocumentId) -> Result<()> {
        let data = self.index.remove_document(id)?;
        tracing::debug!(id, words = data.word_freqs.len(), "document removed");
        Ok(())
    }

    /// Top documents with status `ACTUAL`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_filtered(raw_query, DocumentFilter::default())
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_filtered(raw_query, status.into())
    }

    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, Rating) -> bool,
    {
        self.find_top_documents_filtered(raw_query, DocumentFilter::predicate(predicate))
    }

    pub fn find_top_documents_filtered(
        &self,
        raw_query: &str,
        filter: DocumentFilter<'_>,
    ) -> Result<Vec<Document>> {
        let query = parse_query(raw_query, &self.stop_words)?;
        tracing::trace!(?query, "parsed query");
        let matched = find_all_documents(&self.index, &query, &filter);
        Ok(sort_and_truncate(matched, &self.config))
    }

    /// Every document matching `raw_query` and `filter`, unordered and untruncated.
    pub fn find_all_documents(
        &self,
        raw_query: &str,
        filter: DocumentFilter<'_>,
    ) -> Result<Vec<Document>> {
        let query = parse_query(raw_query, &self.stop_words)?;
        Ok(find_all_documents(&self.index, &query, &filter))
    }

    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = parse_query(raw_query, &self.stop_words)?;
        matcher::match_document(&self.index, &query, id)
    }

    pub fn document_count(&self) -> usize { self.index.document_count() }

    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ { self.index.document_ids() }

    /// Word -> term frequency for document `id`; empty for unknown ids.
    pub fn word_frequencies(&self, id: DocumentId) -> BTreeMap<String, TermFreq> {
        self.index
            .document(id)
            .map(|data| data.word_freqs.clone())
            .unwrap_or_default()
    }
}
