//! Error types for the fulltext index
//!
//! This module defines all error types used throughout the index.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! "Not found" is deliberately absent: lookups return `Option` and callers
//! treat a miss as the empty set.

use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Result type alias for fulltext operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the fulltext index
#[derive(Debug, Error)]
pub enum Error {
    /// Memory or handle space could not be obtained
    ///
    /// Aborts the mutating operation in progress. The index stays consistent.
    #[error("Allocation failure: {0}")]
    AllocationFailure(String),

    /// Query string was rejected
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration document could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// I/O error (config file loading)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl From<TryReserveError> for Error {
    fn from(e: TryReserveError) -> Self {
        Error::AllocationFailure(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParse(e.to_string())
    }
}

/// Errors raised while parsing a query string
///
/// Never fatal and never mutates index state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Malformed query: empty token, empty word or no terms at all
    #[error("Bad query syntax: {0}")]
    BadSyntax(String),

    /// Well-formed command this index cannot answer
    #[error("Unsupported query command: {0}")]
    Unsupported(String),
}
