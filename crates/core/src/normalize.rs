//! Word normalization shared by indexing and querying
//!
//! Pipeline: NFC → lowercase → truncate to the byte cap on a char boundary.
//! Indexed words and query words must go through the same pipeline or
//! complete matches silently miss.

use unicode_normalization::UnicodeNormalization;

/// Normalize a raw word to its indexed form
///
/// The result may be empty; callers decide whether that is an error.
///
/// # Example
///
/// ```
/// use strata_fts_core::normalize::normalize_word;
///
/// assert_eq!(normalize_word("Quick", 40), "quick");
/// assert_eq!(normalize_word("Flötenkröten", 5), "flöt");
/// ```
pub fn normalize_word(raw: &str, max_bytes: usize) -> String {
    let mut word: String = raw.nfc().collect::<String>().to_lowercase();
    let cut = truncate_word(&word, max_bytes).len();
    word.truncate(cut);
    word
}

/// Longest prefix of `word` that fits in `max_bytes` without splitting a char
pub fn truncate_word(word: &str, max_bytes: usize) -> &str {
    if word.len() <= max_bytes {
        return word;
    }
    let mut cut = max_bytes;
    while !word.is_char_boundary(cut) {
        cut -= 1;
    }
    &word[..cut]
}
