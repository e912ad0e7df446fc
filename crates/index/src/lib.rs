//! In-memory inverted index for the Strata fulltext index
//!
//! This crate provides:
//! - HandleTable: document id ↔ compact handle mapping with lazy deletion
//! - PostingList: handle lists with a sorted bit and set algebra
//! - WordList: the sorted word set fed to bulk insertion
//! - TrieIndex: byte-keyed prefix trie carrying per-node posting lists
//! - Compactor: handle renumbering and empty-subtree pruning
//!
//! # Usage
//!
//! ```
//! use strata_fts_core::FulltextConfig;
//! use strata_fts_index::{TrieIndex, WordList};
//!
//! let mut index = TrieIndex::new(FulltextConfig::default()).unwrap();
//! index.insert_words(1, &WordList::new(["quick", "fox"], 40)).unwrap();
//!
//! let node = index.find_node(b"qu").unwrap();
//! let docs = node.collect_prefix().unwrap().to_document_ids(index.handles(), 0).unwrap();
//! assert_eq!(docs, vec![1]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compactor;
pub mod handles;
pub mod posting;
pub mod trie;
pub mod wordlist;

// Re-export commonly used types
pub use compactor::{CompactionOutcome, CompactionStats, Compactor};
pub use handles::{HandleTable, RewriteMap};
pub use posting::PostingList;
pub use trie::{TrieIndex, TrieNode, TrieStats};
pub use wordlist::WordList;
