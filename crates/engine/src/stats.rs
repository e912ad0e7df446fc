//! Index introspection types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Point-in-time statistics of a fulltext index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Documents with a live handle
    pub documents: usize,
    /// Deleted handles awaiting compaction
    pub deleted_handles: usize,
    /// Trie nodes including the root
    pub nodes: usize,
    /// Handles stored across all posting lists, stale ones included
    pub posting_entries: usize,
    /// Approximate heap usage of trie, postings and handle table in bytes
    pub memory_bytes: usize,
}

/// Describes an index the way the document store lists its indexes
///
/// Serializes as `{"type":"fulltext","minLength":2,"maxWordLength":40}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDescription {
    /// Always `"fulltext"`
    #[serde(rename = "type")]
    pub index_type: String,
    /// Minimum extracted word length in chars
    pub min_length: usize,
    /// Maximum indexed word length in bytes
    pub max_word_length: usize,
}

impl IndexDescription {
    /// Type tag of fulltext indexes
    pub const TYPE: &'static str = "fulltext";
}

impl fmt::Display for IndexDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
