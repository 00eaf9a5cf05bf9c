use std::collections::BTreeSet;

/// Split text into words on the ASCII space character.
///
/// Only `' '` separates words; tabs and newlines stay inside a word. Runs of
/// spaces and leading/trailing spaces produce empty-string words, which are
/// legal words for both the stop-word set and the index.
pub fn split_into_words(text: &str) -> Vec<String> {
    text.split(' ').map(str::to_owned).collect()
}

/// Case-sensitive set of words excluded from indexing and querying.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    pub fn new() -> Self { Self::default() }

    /// Tokenize `text` and add every word to the set. Existing entries stay.
    pub fn configure(&mut self, text: &str) {
        self.words.extend(split_into_words(text));
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    /// Tokenize `text` and keep the words that are not stop words, in order.
    pub fn split_into_words_no_stop(&self, text: &str) -> Vec<String> {
        split_into_words(text)
            .into_iter()
            .filter(|word| !self.contains(word))
            .collect()
    }
}
