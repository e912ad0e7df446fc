//! Word lists fed to bulk insertion
//!
//! Bulk insertion shares trie descent between neighbouring words and skips
//! a word equal to its predecessor. Both rely on the input being sorted
//! and deduplicated, so the only way to hand words to the trie is through
//! [`WordList`], which establishes that on construction.

use strata_fts_core::truncate_word;

/// Sorted, deduplicated set of non-empty words belonging to one document
///
/// Words are ordered by byte value (the order of `str`'s `Ord`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Build a word list from already-normalized words
    ///
    /// Each word is truncated to `max_bytes` on a char boundary, empty
    /// words are dropped, and the result is sorted and deduplicated.
    pub fn new<I, S>(words: I, max_bytes: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| truncate_word(w.as_ref(), max_bytes).to_string())
            .filter(|w| !w.is_empty())
            .collect();
        words.sort_unstable();
        words.dedup();
        WordList { words }
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the list holds no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length in bytes of the longest word, 0 when empty
    pub fn max_len(&self) -> usize {
        self.words.iter().map(String::len).max().unwrap_or(0)
    }

    /// Words in ascending byte order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub(crate) fn as_slice(&self) -> &[String] {
        &self.words
    }
}
