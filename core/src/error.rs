use crate::document::DocumentId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors returned by the search server. All of them are local validation
/// failures; the index is left untouched when one is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A query token was a lone `-` with no word after it.
    #[error("invalid query token {token:?}: minus sign without a word")]
    InvalidQuery { token: String },

    /// Document text has no words left after stop-word removal.
    #[error("document {id} has no indexable words")]
    InvalidDocument { id: DocumentId },

    #[error("document {id} not found")]
    UnknownDocumentId { id: DocumentId },

    #[error("document {id} already exists")]
    DuplicateDocumentId { id: DocumentId },

    /// Negative ids are never indexed.
    #[error("document id {id} is negative")]
    InvalidDocumentId { id: DocumentId },

    #[error("invalid search config: {0}")]
    InvalidConfig(&'static str),
}
