//! Byte-keyed prefix trie with per-node posting lists
//!
//! Every edge is labelled by one byte of a normalized word; the path from
//! the root to a node spells a prefix. A node carries a posting list when
//! at least one indexed word ends exactly there.
//!
//! # Node Layout
//!
//! Children live in a [`ChildTable`]: a sorted key array and a parallel
//! array of child nodes, both small vectors. Child nodes are stored inline
//! in the table, so a node with a single child (the common case along word
//! suffixes) costs one allocation for the table and none for the child.
//! Edge lookup switches strategy by fanout: equality for one child, linear
//! scan below `child_binary_search_threshold`, binary search at or above it.
//!
//! # Bulk Insertion
//!
//! A document's words arrive as a sorted [`WordList`]. Words sharing a
//! prefix are adjacent, so insertion groups them by their next byte and
//! descends into each shared prefix node once, instead of restarting at
//! the root for every word.

use crate::compactor::{sweep, SweepStats};
use crate::handles::HandleTable;
use crate::posting::PostingList;
use crate::wordlist::WordList;
use smallvec::{CollectionAllocErr, SmallVec};
use strata_fts_core::{DocumentId, Error, FulltextConfig, Handle, Result};

fn child_table_alloc_failure(e: CollectionAllocErr) -> Error {
    Error::AllocationFailure(format!("child table growth: {:?}", e))
}

// ============================================================================
// ChildTable
// ============================================================================

/// Sorted edge table of one node
#[derive(Debug, Default)]
struct ChildTable {
    /// Edge bytes, ascending
    keys: SmallVec<[u8; 8]>,
    /// `nodes[i]` is reached through `keys[i]`
    nodes: SmallVec<[TrieNode; 1]>,
}

impl ChildTable {
    fn len(&self) -> usize {
        self.keys.len()
    }

    fn position(&self, key: u8, binary_threshold: usize) -> Option<usize> {
        match self.keys.len() {
            0 => None,
            1 => (self.keys[0] == key).then_some(0),
            n if n >= binary_threshold => self.keys.binary_search(&key).ok(),
            _ => {
                for (i, &k) in self.keys.iter().enumerate() {
                    if k == key {
                        return Some(i);
                    }
                    if k > key {
                        break;
                    }
                }
                None
            }
        }
    }

    /// Make room for one more edge, growing by `chunk` slots when full
    fn reserve_one(&mut self, chunk: usize) -> Result<()> {
        if self.keys.len() == self.keys.capacity() {
            self.keys
                .try_reserve_exact(chunk)
                .map_err(child_table_alloc_failure)?;
        }
        if self.nodes.len() == self.nodes.capacity() {
            self.nodes
                .try_reserve_exact(chunk)
                .map_err(child_table_alloc_failure)?;
        }
        Ok(())
    }

    fn remove(&mut self, idx: usize) {
        self.keys.remove(idx);
        self.nodes.remove(idx);
    }

    fn memory_usage(&self) -> usize {
        let mut bytes = std::mem::size_of::<ChildTable>();
        if self.keys.spilled() {
            bytes += self.keys.capacity();
        }
        if self.nodes.spilled() {
            bytes += self.nodes.capacity() * std::mem::size_of::<TrieNode>();
        }
        bytes
    }
}

// ============================================================================
// TrieNode
// ============================================================================

/// One byte position along a set of indexed words
///
/// A node without postings and without children is garbage; it is pruned
/// by compaction and by insertion rollback, never kept around on purpose.
#[derive(Debug, Default)]
pub struct TrieNode {
    children: Option<Box<ChildTable>>,
    postings: Option<PostingList>,
}

impl TrieNode {
    /// Postings of words ending exactly at this node
    pub fn postings(&self) -> Option<&PostingList> {
        self.postings.as_ref()
    }

    /// Number of outgoing edges
    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, |t| t.len())
    }

    /// Outgoing edges in ascending byte order
    pub fn children(&self) -> impl Iterator<Item = (u8, &TrieNode)> {
        self.children
            .iter()
            .flat_map(|t| t.keys.iter().copied().zip(t.nodes.iter()))
    }

    /// Child reached through `key`
    pub fn child(&self, key: u8, binary_threshold: usize) -> Option<&TrieNode> {
        let table = self.children.as_deref()?;
        table
            .position(key, binary_threshold)
            .map(|idx| &table.nodes[idx])
    }

    /// Whether the node holds neither postings nor children
    pub fn is_garbage(&self) -> bool {
        self.postings.as_ref().map_or(true, PostingList::is_empty) && self.child_count() == 0
    }

    /// Child reached through `key`, created empty if missing
    ///
    /// A new child is linked only once the table has room for it, so a
    /// failed growth never leaves a half-linked edge.
    fn child_or_insert(&mut self, key: u8, config: &FulltextConfig) -> Result<&mut TrieNode> {
        let table = self.children.get_or_insert_with(Box::default);
        let idx = match table.position(key, config.child_binary_search_threshold) {
            Some(idx) => idx,
            None => {
                table.reserve_one(config.child_growth_chunk)?;
                let idx = table.keys.partition_point(|&k| k < key);
                table.keys.insert(idx, key);
                table.nodes.insert(idx, TrieNode::default());
                idx
            }
        };
        Ok(&mut table.nodes[idx])
    }

    /// Record `handle` as containing the word ending here
    ///
    /// A fresh handle is the largest one issued, so the append guard of the
    /// posting list is enough. A reused handle may already sit anywhere in
    /// the list and is searched for first.
    fn add_posting(&mut self, handle: Handle, reused: bool, config: &FulltextConfig) -> Result<()> {
        let list = self.postings.get_or_insert_with(PostingList::new);
        if reused && list.contains(handle, config.posting_binary_search_threshold) {
            return Ok(());
        }
        list.insert(handle)?;
        Ok(())
    }

    // ========================================================================
    // Collection
    // ========================================================================

    /// Copy of this node's own posting list (complete match)
    pub fn collect_exact(&self) -> Result<PostingList> {
        let Some(list) = &self.postings else {
            return Ok(PostingList::new());
        };
        let mut handles = Vec::new();
        handles.try_reserve_exact(list.len())?;
        handles.extend_from_slice(list.as_slice());
        Ok(PostingList::from_handles(handles))
    }

    /// Union of the postings of this node and its whole subtree (prefix match)
    pub fn collect_prefix(&self) -> Result<PostingList> {
        let mut handles = Vec::new();
        self.collect_into(&mut handles)?;
        handles.sort_unstable();
        handles.dedup();
        Ok(PostingList::from_handles(handles))
    }

    fn collect_into(&self, out: &mut Vec<Handle>) -> Result<()> {
        if let Some(list) = &self.postings {
            out.try_reserve(list.len())?;
            out.extend(list.iter());
        }
        for (_, child) in self.children() {
            child.collect_into(out)?;
        }
        Ok(())
    }

    // ========================================================================
    // Maintenance hooks
    // ========================================================================

    pub(crate) fn postings_mut(&mut self) -> Option<&mut PostingList> {
        self.postings.as_mut()
    }

    /// Drop the posting list if it holds nothing
    pub(crate) fn drop_empty_postings(&mut self) {
        if self.postings.as_ref().is_some_and(PostingList::is_empty) {
            self.postings = None;
        }
    }

    /// Keep only the children for which `keep` returns true
    ///
    /// `keep` may mutate the child before deciding. The table is released
    /// once it has no edges left.
    pub(crate) fn retain_children<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut TrieNode) -> bool,
    {
        let Some(table) = self.children.as_mut() else {
            return;
        };
        let mut idx = 0;
        while idx < table.nodes.len() {
            if keep(&mut table.nodes[idx]) {
                idx += 1;
            } else {
                table.remove(idx);
            }
        }
        if table.nodes.is_empty() {
            self.children = None;
        } else if table.nodes.len() < table.nodes.capacity() / 2 {
            table.keys.shrink_to_fit();
            table.nodes.shrink_to_fit();
        }
    }

    fn accumulate_stats(&self, stats: &mut TrieStats) {
        stats.nodes += 1;
        if let Some(list) = &self.postings {
            stats.posting_entries += list.len();
            stats.memory_bytes += list.memory_usage();
        }
        if let Some(table) = &self.children {
            stats.memory_bytes += table.memory_usage();
        }
        for (_, child) in self.children() {
            child.accumulate_stats(stats);
        }
    }
}

// ============================================================================
// TrieIndex
// ============================================================================

/// Structural statistics of a trie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrieStats {
    /// Nodes including the root
    pub nodes: usize,
    /// Handles stored across all posting lists
    pub posting_entries: usize,
    /// Approximate heap usage of nodes and postings in bytes
    pub memory_bytes: usize,
}

/// The inverted index: trie plus the handle table its postings refer to
///
/// # Thread Safety
///
/// Not synchronized. Mutating methods take `&mut self`; callers wrap the
/// index in a reader/writer lock so lookups may run concurrently.
#[derive(Debug)]
pub struct TrieIndex {
    root: TrieNode,
    handles: HandleTable,
    config: FulltextConfig,
}

impl TrieIndex {
    /// Create an empty index
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` for an unusable config, `Error::AllocationFailure`
    /// if the initial handle table cannot be reserved.
    pub fn new(config: FulltextConfig) -> Result<Self> {
        config.validate()?;
        let handles = HandleTable::new(&config)?;
        Ok(TrieIndex {
            root: TrieNode::default(),
            handles,
            config,
        })
    }

    /// Construction-time configuration
    pub fn config(&self) -> &FulltextConfig {
        &self.config
    }

    /// Current handle table
    pub fn handles(&self) -> &HandleTable {
        &self.handles
    }

    /// Root node (the empty prefix)
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    // ========================================================================
    // Index Updates
    // ========================================================================

    /// Index every word of `words` for `doc`
    ///
    /// Reuses the document's live handle if it has one. An empty word list
    /// is a no-op and allocates nothing. Words longer than the configured
    /// `max_word_length` are cut to it, as query words are.
    ///
    /// # Errors
    ///
    /// `Error::AllocationFailure`. The document's handle is then revoked so
    /// postings written before the failure never resolve, and nodes left
    /// empty by the partial insertion are pruned.
    pub fn insert_words(&mut self, doc: DocumentId, words: &WordList) -> Result<()> {
        if words.is_empty() {
            return Ok(());
        }

        let cap = self.config.max_word_length;
        let capped;
        let words = if words.max_len() > cap {
            capped = WordList::new(words.iter(), cap);
            &capped
        } else {
            words
        };

        let (handle, reused) = match self.handles.handle_for(doc) {
            Some(handle) => (handle, true),
            None => (self.handles.allocate(doc)?, false),
        };

        let inserted = insert_group(
            &mut self.root,
            words.as_slice(),
            0,
            handle,
            reused,
            &self.config,
        );

        if let Err(e) = inserted {
            let stats = self.roll_back_insert(handle);
            tracing::warn!(
                target: "strata::fulltext",
                document = doc,
                error = %e,
                pruned_nodes = stats.nodes_pruned,
                "Word insertion failed, document handle revoked"
            );
            return Err(e);
        }
        Ok(())
    }

    /// Undo a partial insertion made under `handle`
    ///
    /// The handle is revoked so postings already written never resolve,
    /// then nodes created without reaching a posting are pruned.
    fn roll_back_insert(&mut self, handle: Handle) -> SweepStats {
        self.handles.revoke(handle);
        let mut stats = SweepStats::default();
        sweep(
            &mut self.root,
            None,
            self.config.posting_shrink_threshold,
            &mut stats,
        );
        stats
    }

    /// Mark a document deleted
    ///
    /// Lazy: trie nodes are untouched and stale handles are filtered at
    /// resolution time until compaction rewrites them. Returns whether the
    /// document was indexed.
    pub fn delete_document(&mut self, doc: DocumentId) -> bool {
        let deleted = self.handles.mark_deleted(doc);
        if deleted {
            tracing::debug!(target: "strata::fulltext", document = doc, "Document marked deleted");
        }
        deleted
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Node reached by following `word` byte by byte from the root
    pub fn find_node(&self, word: &[u8]) -> Option<&TrieNode> {
        let threshold = self.config.child_binary_search_threshold;
        word.iter()
            .try_fold(&self.root, |node, &byte| node.child(byte, threshold))
    }

    /// Structural statistics, walking the whole trie
    pub fn stats(&self) -> TrieStats {
        let mut stats = TrieStats::default();
        self.root.accumulate_stats(&mut stats);
        stats
    }

    // ========================================================================
    // Compaction support
    // ========================================================================

    pub(crate) fn root_mut(&mut self) -> &mut TrieNode {
        &mut self.root
    }

    pub(crate) fn install_handles(&mut self, handles: HandleTable) {
        self.handles = handles;
    }
}

/// Insert a run of sorted words sharing their first `depth` bytes below `node`
///
/// A word ending at `depth` sorts before every longer word with the same
/// prefix, so terminal words come first. The rest is split into runs by
/// the byte at `depth`, each run descending into its child exactly once.
fn insert_group(
    node: &mut TrieNode,
    words: &[String],
    depth: usize,
    handle: Handle,
    reused: bool,
    config: &FulltextConfig,
) -> Result<()> {
    let ends_here = words.iter().take_while(|w| w.len() == depth).count();
    if ends_here > 0 {
        node.add_posting(handle, reused, config)?;
    }

    let mut rest = &words[ends_here..];
    while let Some(first) = rest.first() {
        let key = first.as_bytes()[depth];
        let run = rest
            .iter()
            .take_while(|w| w.as_bytes()[depth] == key)
            .count();
        let child = node.child_or_insert(key, config)?;
        insert_group(child, &rest[..run], depth + 1, handle, reused, config)?;
        rest = &rest[run..];
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
