use crate::error::{Result, SearchError};
use crate::tokenizer::{split_into_words, StopWords};
use std::collections::BTreeSet;

/// Parsed query: required (plus) and excluded (minus) words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWord {
    pub data: String,
    pub is_minus: bool,
    pub is_stop: bool,
}

/// Classify one raw token. A single leading `-` marks a minus word.
pub fn parse_query_word(token: &str, stop_words: &StopWords) -> Result<QueryWord> {
    let (data, is_minus) = match token.strip_prefix('-') {
        Some("") => return Err(SearchError::InvalidQuery { token: token.to_owned() }),
        Some(rest) => (rest, true),
        None => (token, false),
    };
    Ok(QueryWord { data: data.to_owned(), is_minus, is_stop: stop_words.contains(data) })
}

/// Parse raw query text. Stop words are dropped whether marked or not; a word
/// given both ways keeps the kind of its last occurrence.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();
    for token in split_into_words(text) {
        let word = parse_query_word(&token, stop_words)?;
        if word.is_stop {
            continue;
        }
        if word.is_minus {
            query.plus_words.remove(&word.data);
            query.minus_words.insert(word.data);
        } else {
            query.minus_words.remove(&word.data);
            query.plus_words.insert(word.data);
        }
    }
    Ok(query)
}
