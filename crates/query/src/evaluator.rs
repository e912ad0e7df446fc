//! Query evaluation against a trie index
//!
//! Terms are folded left to right into an accumulated posting list:
//!
//! ```text
//! result = None
//! for term in query:
//!     And/Exclude on an empty result   → skip (cannot add documents)
//!     postings = lookup(term)          → missing word is the empty list
//!     result   = None                  → postings
//!              | Or                    → result ∪ postings
//!              | And                   → result ∩ postings
//!              | Exclude               → result ∖ postings
//! resolve(result) → document ids
//! ```
//!
//! `None` means no term has been processed yet, which is not the same as
//! an empty result.
//!
//! QueryEngine only borrows the index. Callers hold the read side of the
//! index lock for the duration of a search.

use crate::parser::{parse, MatchMode, Operator, Query, Term};
use strata_fts_core::{DocumentId, Result};
use strata_fts_index::{PostingList, TrieIndex};

/// Evaluates queries against one [`TrieIndex`]
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    index: &'a TrieIndex,
}

impl<'a> QueryEngine<'a> {
    /// Create an engine over `index`
    pub fn new(index: &'a TrieIndex) -> Self {
        QueryEngine { index }
    }

    /// Parse and evaluate `query`
    ///
    /// # Errors
    ///
    /// `Error::Query` for a malformed query, `Error::AllocationFailure`
    /// if an intermediate posting list cannot be built.
    pub fn search(&self, query: &str, max_results: usize) -> Result<Vec<DocumentId>> {
        let query = parse(query, self.index.config())?;
        self.evaluate(&query, max_results)
    }

    /// Evaluate a parsed query and resolve it to document ids
    ///
    /// Deleted documents are filtered out. At most `max_results` ids are
    /// returned; `0` means unlimited.
    pub fn evaluate(&self, query: &Query, max_results: usize) -> Result<Vec<DocumentId>> {
        match self.accumulate(query)? {
            Some(list) => list.to_document_ids(self.index.handles(), max_results),
            None => Ok(Vec::new()),
        }
    }

    /// Fold the query's terms into one posting list
    fn accumulate(&self, query: &Query) -> Result<Option<PostingList>> {
        let mut result: Option<PostingList> = None;
        for term in query.terms() {
            let current = result.as_ref();
            if matches!(term.op, Operator::And | Operator::Exclude)
                && current.is_some_and(PostingList::is_empty)
            {
                continue;
            }

            let postings = self.lookup(term)?;
            result = Some(match (current, term.op) {
                (None, _) => postings,
                (Some(acc), Operator::Or) => acc.union(&postings)?,
                (Some(acc), Operator::And) => acc.intersect(&postings)?,
                (Some(acc), Operator::Exclude) => acc.exclude(&postings)?,
            });
        }
        Ok(result)
    }

    /// Posting list matching a single term
    pub fn lookup(&self, term: &Term) -> Result<PostingList> {
        let Some(node) = self.index.find_node(term.word.as_bytes()) else {
            return Ok(PostingList::new());
        };
        match term.mode {
            MatchMode::Complete => node.collect_exact(),
            MatchMode::Prefix => node.collect_prefix(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
