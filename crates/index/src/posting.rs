//! Posting lists of document handles
//!
//! A posting list belongs to exactly one trie node and holds the handles of
//! the documents whose words end at that node.
//!
//! # Sorted Bit
//!
//! Handles are allocated in increasing order, so appends are almost always
//! in order. The list tracks whether that still holds: the first
//! out-of-order append clears the flag, and only a rebuild (compaction or
//! [`PostingList::from_handles`]) sets it again. Membership search branches
//! on the flag: binary search for sorted lists at or above the configured
//! length threshold, linear scan otherwise.
//!
//! # Set Algebra
//!
//! `union`, `intersect` and `exclude` are linear merges over sorted inputs.
//! Unsorted inputs are sorted into a scratch copy first. Results are always
//! sorted and free of duplicates.

use crate::handles::{HandleTable, RewriteMap};
use std::borrow::Cow;
use std::cmp::Ordering;
use strata_fts_core::{DocumentId, FulltextConfig, Handle, Result};

/// Capacity of the first allocation of a posting list
const INITIAL_CAPACITY: usize = 2;

/// Growth factor applied when a full list is appended to, as `num / den`
const GROWTH_NUM: usize = 6;
const GROWTH_DEN: usize = 5;

/// Growable list of document handles attached to one trie node
#[derive(Debug, Clone)]
pub struct PostingList {
    handles: Vec<Handle>,
    sorted: bool,
}

impl Default for PostingList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PostingList {
    fn eq(&self, other: &Self) -> bool {
        self.handles == other.handles
    }
}

impl Eq for PostingList {}

impl PostingList {
    /// Create a new empty posting list
    pub fn new() -> Self {
        PostingList {
            handles: Vec::new(),
            sorted: true,
        }
    }

    /// Build a list from arbitrary handles, computing the sorted bit
    pub fn from_handles(handles: Vec<Handle>) -> Self {
        let sorted = is_ascending(&handles);
        PostingList { handles, sorted }
    }

    /// Build a list from handles the caller guarantees to be strictly ascending
    fn from_sorted(handles: Vec<Handle>) -> Self {
        debug_assert!(is_ascending(&handles));
        PostingList {
            handles,
            sorted: true,
        }
    }

    /// Number of handles stored
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check if the list holds no handles
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Allocated capacity in handles
    pub fn capacity(&self) -> usize {
        self.handles.capacity()
    }

    /// Whether the stored sequence is known to be ascending
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Stored handles in insertion order
    pub fn as_slice(&self) -> &[Handle] {
        &self.handles
    }

    /// Iterate over stored handles
    pub fn iter(&self) -> impl Iterator<Item = Handle> + '_ {
        self.handles.iter().copied()
    }

    /// Approximate heap usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.handles.capacity() * std::mem::size_of::<Handle>()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append a handle
    ///
    /// No-op if `handle` equals the last stored handle. Returns whether the
    /// handle was appended.
    ///
    /// # Errors
    ///
    /// `Error::AllocationFailure` if the list could not grow; the list is
    /// left unchanged.
    pub fn insert(&mut self, handle: Handle) -> Result<bool> {
        if let Some(&last) = self.handles.last() {
            if last == handle {
                return Ok(false);
            }
            if handle < last {
                self.sorted = false;
            }
        }
        self.grow_if_full()?;
        self.handles.push(handle);
        Ok(true)
    }

    /// Ensure room for one more handle using the 1.2x growth rule
    fn grow_if_full(&mut self) -> Result<()> {
        let len = self.handles.len();
        let cap = self.handles.capacity();
        if len < cap {
            return Ok(());
        }
        let target = (cap * GROWTH_NUM / GROWTH_DEN)
            .max(cap + 1)
            .max(INITIAL_CAPACITY);
        self.handles.try_reserve_exact(target - len)?;
        Ok(())
    }

    /// Remove a handle if present
    ///
    /// Reallocates tightly when occupancy drops below half of capacity and
    /// capacity is at least `config.posting_shrink_threshold`.
    pub fn remove(&mut self, handle: Handle, config: &FulltextConfig) -> bool {
        let Some(pos) = self.position(handle, config.posting_binary_search_threshold) else {
            return false;
        };
        self.handles.remove(pos);
        self.shrink_if_sparse(config.posting_shrink_threshold);
        true
    }

    fn shrink_if_sparse(&mut self, shrink_threshold: usize) {
        let cap = self.handles.capacity();
        if cap >= shrink_threshold && self.handles.len() < cap / 2 {
            self.handles.shrink_to_fit();
        }
    }

    /// Map every handle through `map`, dropping removed handles
    ///
    /// Compaction renumbers live handles in their old order, so the result
    /// is rebuilt as a fresh list and its sorted bit recomputed.
    pub(crate) fn rewrite(&mut self, map: &RewriteMap, shrink_threshold: usize) -> usize {
        let before = self.handles.len();
        self.handles.retain_mut(|h| match map.rewrite(*h) {
            Some(new) => {
                *h = new;
                true
            }
            None => false,
        });
        self.sorted = is_ascending(&self.handles);
        self.shrink_if_sparse(shrink_threshold);
        before - self.handles.len()
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Locate a handle
    ///
    /// Binary search if the list is sorted and holds at least
    /// `binary_threshold` handles, linear scan otherwise.
    pub fn position(&self, handle: Handle, binary_threshold: usize) -> Option<usize> {
        if self.sorted && self.handles.len() >= binary_threshold {
            self.handles.binary_search(&handle).ok()
        } else {
            self.handles.iter().position(|&h| h == handle)
        }
    }

    /// Check membership
    pub fn contains(&self, handle: Handle, binary_threshold: usize) -> bool {
        self.position(handle, binary_threshold).is_some()
    }

    // ========================================================================
    // Set Algebra
    // ========================================================================

    /// Handles in ascending order without duplicates
    fn sorted_view(&self) -> Result<Cow<'_, [Handle]>> {
        if self.sorted {
            return Ok(Cow::Borrowed(&self.handles));
        }
        let mut copy = Vec::new();
        copy.try_reserve_exact(self.handles.len())?;
        copy.extend_from_slice(&self.handles);
        copy.sort_unstable();
        copy.dedup();
        Ok(Cow::Owned(copy))
    }

    /// Handles present in either list
    pub fn union(&self, other: &PostingList) -> Result<PostingList> {
        let (a, b) = (self.sorted_view()?, other.sorted_view()?);
        let mut out = Vec::new();
        out.try_reserve_exact(a.len() + b.len())?;

        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    out.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        Ok(PostingList::from_sorted(out))
    }

    /// Handles present in both lists
    pub fn intersect(&self, other: &PostingList) -> Result<PostingList> {
        if self.is_empty() || other.is_empty() {
            return Ok(PostingList::new());
        }
        let (a, b) = (self.sorted_view()?, other.sorted_view()?);
        let mut out = Vec::new();
        out.try_reserve_exact(a.len().min(b.len()))?;

        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        Ok(PostingList::from_sorted(out))
    }

    /// Handles present in `self` but not in `other`
    pub fn exclude(&self, other: &PostingList) -> Result<PostingList> {
        let a = self.sorted_view()?;
        if other.is_empty() {
            return Ok(PostingList::from_sorted(a.into_owned()));
        }
        let b = other.sorted_view()?;
        let mut out = Vec::new();
        out.try_reserve_exact(a.len())?;

        let mut j = 0;
        for &h in a.iter() {
            while j < b.len() && b[j] < h {
                j += 1;
            }
            if j < b.len() && b[j] == h {
                continue;
            }
            out.push(h);
        }
        Ok(PostingList::from_sorted(out))
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve handles to document ids
    ///
    /// Handles that no longer resolve (deleted documents) are skipped.
    /// Stops after `cap` results; `cap == 0` means unlimited.
    pub fn to_document_ids(&self, table: &HandleTable, cap: usize) -> Result<Vec<DocumentId>> {
        let limit = if cap == 0 { usize::MAX } else { cap };
        let mut out = Vec::new();
        out.try_reserve_exact(self.handles.len().min(limit))?;
        for doc in self.handles.iter().filter_map(|&h| table.resolve(h)) {
            if out.len() == limit {
                break;
            }
            out.push(doc);
        }
        Ok(out)
    }
}

fn is_ascending(handles: &[Handle]) -> bool {
    handles.windows(2).all(|w| w[0] < w[1])
}

// ============================================================================
// Tests
// ============================================================================
