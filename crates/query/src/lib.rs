//! Query language for the Strata fulltext index
//!
//! This crate provides:
//! - parse: query string → [`Query`] of operator/match-mode terms
//! - QueryEngine: evaluation of a [`Query`] against a [`TrieIndex`]
//!
//! # Query Language
//!
//! Terms are separated by space, tab, CR, LF or `,`. Each term may start
//! with an operator (`+` and, the default; `-` exclude; `|` or) and a
//! command (`complete:`, the default, or `prefix:`). Commands are
//! case-insensitive.
//!
//! ```text
//! quick -lazy          documents with "quick" but not "lazy"
//! prefix:qu,|dog       documents with a word starting "qu", or with "dog"
//! ```
//!
//! [`TrieIndex`]: strata_fts_index::TrieIndex

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod evaluator;
pub mod parser;

// Re-export commonly used types
pub use evaluator::QueryEngine;
pub use parser::{parse, MatchMode, Operator, Query, Term};
