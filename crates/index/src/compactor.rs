//! Handle compaction and trie pruning
//!
//! Deletion is lazy: a deleted document's handle stays in every posting
//! list that mentions it. Once enough handles are dead, compaction
//! renumbers the live ones densely and walks the trie depth-first,
//! rewriting each posting list and unlinking subtrees left with neither
//! postings nor children.
//!
//! Compaction is maintenance only. Skipping it never changes query
//! results; it only lets memory grow until the next attempt.

use crate::handles::RewriteMap;
use crate::trie::{TrieIndex, TrieNode};
use strata_fts_core::Result;

/// Emptiness reported by a subtree to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeState {
    /// No postings and no surviving children: the parent unlinks it
    Empty,
    /// Still holds postings or children
    NonEmpty,
}

/// Counters collected while sweeping a trie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SweepStats {
    /// Nodes unlinked from their parent
    pub nodes_pruned: usize,
    /// Handles dropped from posting lists
    pub postings_dropped: usize,
}

/// Result of a completed compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactionStats {
    /// Handles in the table before compaction, live and deleted
    pub handles_before: usize,
    /// Handles in the new table (all live)
    pub handles_after: usize,
    /// Nodes unlinked from the trie
    pub nodes_pruned: usize,
    /// Handles dropped from posting lists
    pub postings_dropped: usize,
}

/// What a compaction attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactionOutcome {
    /// Deleted ratio below the threshold, nothing to do
    Skipped,
    /// Exclusive access was not available; try again later
    Busy,
    /// Handles renumbered and trie pruned
    Compacted(CompactionStats),
}

/// Rewrites postings under `node` through `map` and prunes empty subtrees
///
/// Children are swept before their parent decides about them, so a whole
/// chain of nodes emptied by the rewrite collapses in one pass. With no map
/// only pruning happens.
pub(crate) fn sweep(
    node: &mut TrieNode,
    map: Option<&RewriteMap>,
    shrink_threshold: usize,
    stats: &mut SweepStats,
) -> NodeState {
    if let (Some(list), Some(map)) = (node.postings_mut(), map) {
        stats.postings_dropped += list.rewrite(map, shrink_threshold);
    }
    node.drop_empty_postings();

    node.retain_children(|child| match sweep(child, map, shrink_threshold, stats) {
        NodeState::Empty => {
            stats.nodes_pruned += 1;
            false
        }
        NodeState::NonEmpty => true,
    });

    if node.is_garbage() {
        NodeState::Empty
    } else {
        NodeState::NonEmpty
    }
}

/// Compaction driver
pub struct Compactor;

impl Compactor {
    /// Compact `index` if its deleted ratio warrants it
    ///
    /// The root survives even when everything below it is pruned.
    ///
    /// # Errors
    ///
    /// `Error::AllocationFailure` while building the new handle table. The
    /// index is untouched in that case.
    pub fn compact(index: &mut TrieIndex) -> Result<CompactionOutcome> {
        let handles = index.handles();
        if !handles.should_compact() {
            tracing::debug!(
                target: "strata::fulltext",
                handles = handles.len(),
                deleted = handles.deleted_count(),
                "Compaction skipped, deleted ratio below threshold"
            );
            return Ok(CompactionOutcome::Skipped);
        }

        let handles_before = handles.len();
        let (fresh, map) = handles.compact()?;
        let handles_after = fresh.len();

        let shrink_threshold = index.config().posting_shrink_threshold;
        let mut sweep_stats = SweepStats::default();
        sweep(
            index.root_mut(),
            Some(&map),
            shrink_threshold,
            &mut sweep_stats,
        );
        index.install_handles(fresh);

        let stats = CompactionStats {
            handles_before,
            handles_after,
            nodes_pruned: sweep_stats.nodes_pruned,
            postings_dropped: sweep_stats.postings_dropped,
        };
        tracing::info!(
            target: "strata::fulltext",
            handles_before = stats.handles_before,
            handles_after = stats.handles_after,
            nodes_pruned = stats.nodes_pruned,
            postings_dropped = stats.postings_dropped,
            "Fulltext index compacted"
        );
        Ok(CompactionOutcome::Compacted(stats))
    }
}

// ============================================================================
// Tests
// ============================================================================
