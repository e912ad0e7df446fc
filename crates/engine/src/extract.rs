//! Word extraction from document text
//!
//! Pipeline: UAX#29 word boundaries → normalize (NFC, lowercase, byte cap)
//!           → drop words shorter than `min_word_length` chars → sort, dedup

use strata_fts_core::{normalize_word, FulltextConfig};
use strata_fts_index::WordList;
use unicode_segmentation::UnicodeSegmentation;

/// Extract the indexable word set of `text`
///
/// The length filter counts chars of the normalized word before it is
/// truncated, so a long word is never dropped for being cut short.
///
/// # Example
///
/// ```
/// use strata_fts_engine::{extract_words, FulltextConfig};
///
/// let words = extract_words("The Quick brown fox, the FOX!", &FulltextConfig::default());
/// assert_eq!(words.iter().collect::<Vec<_>>(), vec!["brown", "fox", "quick", "the"]);
/// ```
pub fn extract_words(text: &str, config: &FulltextConfig) -> WordList {
    let words = text
        .unicode_words()
        .map(|w| normalize_word(w, usize::MAX))
        .filter(|w| w.chars().count() >= config.min_word_length);
    WordList::new(words, config.max_word_length)
}
