//! Embedded fulltext index for Strata
//!
//! This crate ties the lower layers together:
//! - FulltextIndex: thread-safe facade owning the reader/writer lock
//! - extract_words: text → normalized word set
//! - IndexStats / IndexDescription: introspection
//!
//! The facade is the only component that knows about locking. Everything
//! below it (trie, handle table, query evaluation) is a passive data
//! structure.
//!
//! # Usage
//!
//! ```
//! use strata_fts_engine::{FulltextConfig, FulltextIndex};
//!
//! let index = FulltextIndex::new(FulltextConfig::default()).unwrap();
//! index.index_text(1, "The quick brown fox").unwrap();
//! index.index_text(2, "The quick lazy dog").unwrap();
//!
//! assert_eq!(index.search("quick -lazy", 0).unwrap(), vec![1]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod extract;
pub mod fulltext;
pub mod stats;

// Re-export commonly used types
pub use extract::extract_words;
pub use fulltext::FulltextIndex;
pub use stats::{IndexDescription, IndexStats};

pub use strata_fts_core::{
    DocumentId, Error, FulltextConfig, Handle, QueryError, Result, MAX_WORD_LENGTH_LIMIT,
};
pub use strata_fts_index::{CompactionOutcome, CompactionStats, WordList};
pub use strata_fts_query::{MatchMode, Operator, Query, Term};
