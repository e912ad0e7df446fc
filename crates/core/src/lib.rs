//! Core types for the Strata fulltext index
//!
//! This crate defines the foundational types shared by the index crates:
//! - Handle / DocumentId: compact document surrogate and external identifier
//! - Error / QueryError: error taxonomy
//! - FulltextConfig: construction-time configuration
//! - normalize_word: word normalization shared by indexing and querying

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

// Re-export commonly used types
pub use config::{FulltextConfig, MAX_WORD_LENGTH_LIMIT};
pub use error::{Error, QueryError, Result};
pub use normalize::{normalize_word, truncate_word};
pub use types::{DocumentId, Handle};
