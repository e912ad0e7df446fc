//! Thread-safe fulltext index facade
//!
//! # Locking
//!
//! One `parking_lot::RwLock` guards the whole [`TrieIndex`]:
//!
//! | Operation                                | Lock                     |
//! |------------------------------------------|--------------------------|
//! | insert_words, index_text, delete_document | write                   |
//! | search, stats, contains_document         | read                     |
//! | maybe_compact                            | write, never waited for  |
//!
//! Searches run concurrently with each other. Compaction is maintenance
//! and gives way to any other holder of the lock: it tries the write lock
//! once and reports [`CompactionOutcome::Busy`] instead of blocking.

use crate::extract::extract_words;
use crate::stats::{IndexDescription, IndexStats};
use parking_lot::RwLock;
use strata_fts_core::{DocumentId, FulltextConfig, Result};
use strata_fts_index::{CompactionOutcome, Compactor, TrieIndex, WordList};
use strata_fts_query::QueryEngine;

/// Fulltext index over documents identified by [`DocumentId`]
///
/// `FulltextIndex` is `Send + Sync`; share it with `Arc`.
#[derive(Debug)]
pub struct FulltextIndex {
    inner: RwLock<TrieIndex>,
    /// Copy of the construction config, readable without the lock
    config: FulltextConfig,
}

impl FulltextIndex {
    /// Create an empty index
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` if `config` fails validation,
    /// `Error::AllocationFailure` if the handle table cannot be reserved.
    pub fn new(config: FulltextConfig) -> Result<Self> {
        let trie = TrieIndex::new(config.clone())?;
        Ok(FulltextIndex {
            inner: RwLock::new(trie),
            config,
        })
    }

    /// Construction-time configuration
    pub fn config(&self) -> &FulltextConfig {
        &self.config
    }

    // ========================================================================
    // Updates (write lock)
    // ========================================================================

    /// Index a prepared word set for `doc`
    ///
    /// Re-indexing a document adds to its existing words.
    pub fn insert_words(&self, doc: DocumentId, words: &WordList) -> Result<()> {
        self.inner.write().insert_words(doc, words)
    }

    /// Extract the words of `text` and index them for `doc`
    ///
    /// Returns the number of distinct words indexed. Extraction runs before
    /// the write lock is taken.
    pub fn index_text(&self, doc: DocumentId, text: &str) -> Result<usize> {
        let words = extract_words(text, &self.config);
        self.insert_words(doc, &words)?;
        Ok(words.len())
    }

    /// Remove `doc` from all future search results
    ///
    /// Returns whether the document was indexed.
    pub fn delete_document(&self, doc: DocumentId) -> bool {
        self.inner.write().delete_document(doc)
    }

    // ========================================================================
    // Reads (read lock)
    // ========================================================================

    /// Evaluate `query` and return matching documents
    ///
    /// At most `max_results` ids are returned; `0` means unlimited. Order
    /// follows internal handle order, not relevance.
    ///
    /// # Errors
    ///
    /// `Error::Query` for a malformed query, `Error::AllocationFailure` if
    /// evaluation runs out of memory. Neither changes the index.
    pub fn search(&self, query: &str, max_results: usize) -> Result<Vec<DocumentId>> {
        let trie = self.inner.read();
        QueryEngine::new(&trie).search(query, max_results)
    }

    /// Whether `doc` is indexed and not deleted
    pub fn contains_document(&self, doc: DocumentId) -> bool {
        self.inner.read().handles().handle_for(doc).is_some()
    }

    /// Current statistics; walks the whole trie
    pub fn stats(&self) -> IndexStats {
        let trie = self.inner.read();
        let handles = trie.handles();
        let structure = trie.stats();
        IndexStats {
            documents: handles.live_count(),
            deleted_handles: handles.deleted_count(),
            nodes: structure.nodes,
            posting_entries: structure.posting_entries,
            memory_bytes: structure.memory_bytes + handles.memory_usage(),
        }
    }

    /// Description of this index
    pub fn describe(&self) -> IndexDescription {
        IndexDescription {
            index_type: IndexDescription::TYPE.to_string(),
            min_length: self.config.min_word_length,
            max_word_length: self.config.max_word_length,
        }
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Compact the index if enough documents were deleted
    ///
    /// Never blocks: if any reader or writer holds the lock the attempt is
    /// abandoned with [`CompactionOutcome::Busy`]. Safe to call at any
    /// frequency; skipping it never changes search results.
    ///
    /// # Errors
    ///
    /// `Error::AllocationFailure` while building the compacted handle table.
    /// The index is left as it was.
    pub fn maybe_compact(&self) -> Result<CompactionOutcome> {
        let Some(mut trie) = self.inner.try_write() else {
            tracing::debug!(target: "strata::fulltext", "Compaction deferred, index busy");
            return Ok(CompactionOutcome::Busy);
        };
        Compactor::compact(&mut trie)
    }
}

// ============================================================================
// Tests
// ============================================================================
