//! strata-fts - Embedded prefix-trie fulltext index
//!
//! Indexes documents identified by a `u64` id and answers word and prefix
//! queries combined with and / or / exclude operators.
//!
//! # Quick Start
//!
//! ```
//! use strata_fts::{FulltextConfig, FulltextIndex};
//!
//! let index = FulltextIndex::new(FulltextConfig::default())?;
//! index.index_text(1, "The quick brown fox")?;
//! index.index_text(2, "The quick lazy dog")?;
//!
//! assert_eq!(index.search("quick -lazy", 0)?, vec![1]);
//!
//! index.delete_document(2);
//! index.maybe_compact()?;
//! # Ok::<(), strata_fts::Error>(())
//! ```
//!
//! # Architecture
//!
//! All operations go through [`FulltextIndex`], which owns the lock around
//! the trie. The trie, handle table and query evaluator live in internal
//! crates and are not exposed beyond the types re-exported here.

// Re-export the public API from strata-fts-engine
pub use strata_fts_engine::*;
