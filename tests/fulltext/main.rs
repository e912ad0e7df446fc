//! End-to-end tests of the fulltext index through its public facade

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod contract;
mod properties;
mod queries;
