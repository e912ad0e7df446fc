//! Fulltext index configuration
//!
//! All values are fixed when the index is constructed. They can be loaded
//! from a TOML document so the embedding store can keep them next to its
//! own settings.
//!
//! # Example
//!
//! ```toml
//! max_word_length = 40
//! min_word_length = 2
//! max_query_terms = 32
//! compaction_ratio = 0.25
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum indexed word length in bytes
pub const DEFAULT_MAX_WORD_LENGTH: usize = 40;
/// Upper bound accepted for `max_word_length`
///
/// Trie insertion, collection and pruning recurse once per word byte, so
/// this also bounds their stack depth.
pub const MAX_WORD_LENGTH_LIMIT: usize = 512;
/// Minimum extracted word length in characters
pub const DEFAULT_MIN_WORD_LENGTH: usize = 2;
/// Maximum number of terms honored per query
pub const DEFAULT_MAX_QUERY_TERMS: usize = 32;
/// Handle slots reserved by a fresh handle table
pub const DEFAULT_INITIAL_HANDLE_CAPACITY: usize = 2048;
/// Child slots added each time a node's child table is full
pub const DEFAULT_CHILD_GROWTH_CHUNK: usize = 4;
/// Deleted/total handle ratio above which compaction runs
pub const DEFAULT_COMPACTION_RATIO: f64 = 0.25;
/// Child count at which edge lookup switches from linear to binary search
pub const DEFAULT_CHILD_BINARY_SEARCH_THRESHOLD: usize = 8;
/// Posting list length at which a sorted list is binary searched
pub const DEFAULT_POSTING_BINARY_SEARCH_THRESHOLD: usize = 10;
/// Posting list capacity below which removal never reallocates
pub const DEFAULT_POSTING_SHRINK_THRESHOLD: usize = 8;

/// Fulltext index configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FulltextConfig {
    /// Words are truncated to this many bytes (on a char boundary)
    #[serde(default = "default_max_word_length")]
    pub max_word_length: usize,
    /// Extracted words shorter than this many characters are dropped
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,
    /// Terms beyond this count are silently ignored
    #[serde(default = "default_max_query_terms")]
    pub max_query_terms: usize,
    /// Initial handle table capacity
    #[serde(default = "default_initial_handle_capacity")]
    pub initial_handle_capacity: usize,
    /// Growth step of a node's child table
    #[serde(default = "default_child_growth_chunk")]
    pub child_growth_chunk: usize,
    /// Compaction trigger, in `(0, 1]`
    #[serde(default = "default_compaction_ratio")]
    pub compaction_ratio: f64,
    /// Child count at which edge lookup uses binary search
    #[serde(default = "default_child_binary_search_threshold")]
    pub child_binary_search_threshold: usize,
    /// Posting list length at which sorted lists are binary searched
    #[serde(default = "default_posting_binary_search_threshold")]
    pub posting_binary_search_threshold: usize,
    /// Minimum posting list capacity before shrink-on-removal applies
    #[serde(default = "default_posting_shrink_threshold")]
    pub posting_shrink_threshold: usize,
}

fn default_max_word_length() -> usize {
    DEFAULT_MAX_WORD_LENGTH
}

fn default_min_word_length() -> usize {
    DEFAULT_MIN_WORD_LENGTH
}

fn default_max_query_terms() -> usize {
    DEFAULT_MAX_QUERY_TERMS
}

fn default_initial_handle_capacity() -> usize {
    DEFAULT_INITIAL_HANDLE_CAPACITY
}

fn default_child_growth_chunk() -> usize {
    DEFAULT_CHILD_GROWTH_CHUNK
}

fn default_compaction_ratio() -> f64 {
    DEFAULT_COMPACTION_RATIO
}

fn default_child_binary_search_threshold() -> usize {
    DEFAULT_CHILD_BINARY_SEARCH_THRESHOLD
}

fn default_posting_binary_search_threshold() -> usize {
    DEFAULT_POSTING_BINARY_SEARCH_THRESHOLD
}

fn default_posting_shrink_threshold() -> usize {
    DEFAULT_POSTING_SHRINK_THRESHOLD
}

impl Default for FulltextConfig {
    fn default() -> Self {
        Self {
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            max_query_terms: DEFAULT_MAX_QUERY_TERMS,
            initial_handle_capacity: DEFAULT_INITIAL_HANDLE_CAPACITY,
            child_growth_chunk: DEFAULT_CHILD_GROWTH_CHUNK,
            compaction_ratio: DEFAULT_COMPACTION_RATIO,
            child_binary_search_threshold: DEFAULT_CHILD_BINARY_SEARCH_THRESHOLD,
            posting_binary_search_threshold: DEFAULT_POSTING_BINARY_SEARCH_THRESHOLD,
            posting_shrink_threshold: DEFAULT_POSTING_SHRINK_THRESHOLD,
        }
    }
}

impl FulltextConfig {
    /// Small values for tests that exercise growth and search strategy switches
    pub fn with_small_limits() -> Self {
        Self {
            max_word_length: 8,
            min_word_length: 1,
            max_query_terms: 4,
            initial_handle_capacity: 2,
            child_growth_chunk: 1,
            compaction_ratio: 0.5,
            child_binary_search_threshold: 2,
            posting_binary_search_threshold: 2,
            posting_shrink_threshold: 2,
        }
    }

    /// Check every value is usable
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_word_length", self.max_word_length),
            ("min_word_length", self.min_word_length),
            ("max_query_terms", self.max_query_terms),
            ("initial_handle_capacity", self.initial_handle_capacity),
            ("child_growth_chunk", self.child_growth_chunk),
            ("child_binary_search_threshold", self.child_binary_search_threshold),
            ("posting_binary_search_threshold", self.posting_binary_search_threshold),
            ("posting_shrink_threshold", self.posting_shrink_threshold),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be > 0", name)));
            }
        }
        if self.max_word_length > MAX_WORD_LENGTH_LIMIT {
            return Err(Error::InvalidConfig(format!(
                "max_word_length ({}) exceeds the limit of {} bytes",
                self.max_word_length, MAX_WORD_LENGTH_LIMIT
            )));
        }
        if self.min_word_length > self.max_word_length {
            return Err(Error::InvalidConfig(format!(
                "min_word_length ({}) exceeds max_word_length ({})",
                self.min_word_length, self.max_word_length
            )));
        }
        if !(self.compaction_ratio > 0.0 && self.compaction_ratio <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "compaction_ratio must be in (0, 1], got {}",
                self.compaction_ratio
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    ///
    /// Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigParse` on malformed TOML and
    /// `Error::InvalidConfig` when a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FulltextConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
