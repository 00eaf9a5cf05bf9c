//! In-process full-text search over short documents with TF-IDF ranking.
//!
//! Documents are split on spaces, stop words are dropped, and the remaining
//! words go into an inverted index of normalized term frequencies. Queries
//! carry plus words (scored) and `-minus` words (excluding).

pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod matcher;
pub mod query;
pub mod ranker;
pub mod server;
pub mod tokenizer;

pub use config::SearchConfig;
pub use document::{Document, DocumentId, DocumentStatus, Rating};
pub use error::{Result, SearchError};
pub use index::InvertedIndex;
pub use query::Query;
pub use ranker::DocumentFilter;
pub use server::SearchServer;
