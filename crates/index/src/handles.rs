//! Handle allocation and compaction
//!
//! Posting lists store compact `u32` handles instead of 64-bit document ids.
//! The [`HandleTable`] holds the one copy of each mapping, so the id costs
//! O(docs) memory rather than O(words × docs).
//!
//! # Lifecycle
//!
//! - **allocate**: next handle in increasing order, never reused
//! - **mark_deleted**: the handle stops resolving; postings still hold it
//! - **compact**: live handles are renumbered densely into a fresh table and
//!   a [`RewriteMap`] tells the trie how to rewrite its postings
//!
//! Renumbering keeps the relative order of live handles, so a sorted posting
//! list stays sorted after rewriting.

use rustc_hash::FxHashMap;
use strata_fts_core::{DocumentId, Error, FulltextConfig, Handle, Result};

// ============================================================================
// HandleTable
// ============================================================================

/// Bidirectional mapping between document ids and handles
///
/// Slot `i` holds handle `base + i`; `None` marks a deleted handle.
#[derive(Debug, Clone)]
pub struct HandleTable {
    /// handle - base -> document id, `None` once deleted
    slots: Vec<Option<DocumentId>>,
    /// document id -> live handle
    by_document: FxHashMap<DocumentId, Handle>,
    /// Handle stored in slot 0
    base: Handle,
    /// Number of `None` slots
    deleted: usize,
    /// Deleted/total ratio above which compaction is worthwhile
    compaction_ratio: f64,
}

impl HandleTable {
    /// Create an empty table sized by `config.initial_handle_capacity`
    ///
    /// # Errors
    ///
    /// `Error::AllocationFailure` if the initial capacity cannot be reserved.
    pub fn new(config: &FulltextConfig) -> Result<Self> {
        Self::with_capacity(config.initial_handle_capacity, config.compaction_ratio)
    }

    fn with_capacity(capacity: usize, compaction_ratio: f64) -> Result<Self> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        let mut by_document = FxHashMap::default();
        by_document.try_reserve(capacity)?;
        Ok(HandleTable {
            slots,
            by_document,
            base: Handle::FIRST,
            deleted: 0,
            compaction_ratio,
        })
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Total handles issued since the last compaction, live or deleted
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no handle has been issued
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of handles that still resolve
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.deleted
    }

    /// Number of handles marked deleted
    pub fn deleted_count(&self) -> usize {
        self.deleted
    }

    /// Approximate heap usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Option<DocumentId>>()
            + self.by_document.capacity()
                * (std::mem::size_of::<DocumentId>() + std::mem::size_of::<Handle>())
    }

    // ========================================================================
    // Mapping
    // ========================================================================

    /// Live handle of a document, if it has one
    pub fn handle_for(&self, doc: DocumentId) -> Option<Handle> {
        self.by_document.get(&doc).copied()
    }

    /// Issue the next unused handle for `doc`
    ///
    /// If `doc` already holds a live handle, that handle is marked deleted
    /// first: a document maps to at most one live handle.
    ///
    /// # Errors
    ///
    /// `Error::AllocationFailure` when memory or the `u32` handle space runs
    /// out. The table is unchanged in that case.
    pub fn allocate(&mut self, doc: DocumentId) -> Result<Handle> {
        let handle = self.next_handle()?;
        self.slots.try_reserve(1)?;
        self.by_document.try_reserve(1)?;

        if let Some(previous) = self.by_document.insert(doc, handle) {
            self.clear_slot(previous);
        }
        self.slots.push(Some(doc));
        Ok(handle)
    }

    fn next_handle(&self) -> Result<Handle> {
        u32::try_from(self.slots.len())
            .ok()
            .and_then(|offset| self.base.get().checked_add(offset))
            .map(Handle::new)
            .ok_or_else(|| Error::AllocationFailure("handle space exhausted".to_string()))
    }

    /// Flag the handle of `doc` deleted
    ///
    /// Unknown documents are a no-op. Returns whether a handle was deleted.
    pub fn mark_deleted(&mut self, doc: DocumentId) -> bool {
        match self.by_document.remove(&doc) {
            Some(handle) => {
                self.clear_slot(handle);
                true
            }
            None => false,
        }
    }

    /// Flag a specific handle deleted, detaching it from its document
    ///
    /// Used to roll back a failed insertion.
    pub fn revoke(&mut self, handle: Handle) {
        if let Some(doc) = self.resolve(handle) {
            if self.by_document.get(&doc) == Some(&handle) {
                self.by_document.remove(&doc);
            }
            self.clear_slot(handle);
        }
    }

    fn clear_slot(&mut self, handle: Handle) {
        if let Some(slot) = self.slot_index(handle).and_then(|i| self.slots.get_mut(i)) {
            if slot.take().is_some() {
                self.deleted += 1;
            }
        }
    }

    fn slot_index(&self, handle: Handle) -> Option<usize> {
        handle
            .get()
            .checked_sub(self.base.get())
            .map(|offset| offset as usize)
    }

    /// Document id of a live handle
    pub fn resolve(&self, handle: Handle) -> Option<DocumentId> {
        self.slot_index(handle)
            .and_then(|i| self.slots.get(i))
            .copied()
            .flatten()
    }

    // ========================================================================
    // Compaction
    // ========================================================================

    /// Whether the deleted fraction exceeds the compaction ratio
    pub fn should_compact(&self) -> bool {
        self.deleted > 0 && self.deleted as f64 > self.slots.len() as f64 * self.compaction_ratio
    }

    /// Build a dense replacement table and the old → new handle map
    ///
    /// Live handles are renumbered consecutively from [`Handle::FIRST`] in
    /// their current order. `self` is left untouched so the caller can keep
    /// serving reads until it installs the new table.
    ///
    /// # Errors
    ///
    /// `Error::AllocationFailure` if the new table or map cannot be built.
    pub fn compact(&self) -> Result<(HandleTable, RewriteMap)> {
        let live = self.live_count();
        let mut table = HandleTable::with_capacity(live, self.compaction_ratio)?;
        let mut targets = Vec::new();
        targets.try_reserve_exact(self.slots.len())?;

        for doc in &self.slots {
            match doc {
                Some(doc) => {
                    let new = table.allocate(*doc)?;
                    targets.push(Some(new));
                }
                None => targets.push(None),
            }
        }

        let map = RewriteMap {
            base: self.base,
            targets,
        };
        Ok((table, map))
    }
}

// ============================================================================
// RewriteMap
// ============================================================================

/// Old handle → new handle, or removed
#[derive(Debug, Clone)]
pub struct RewriteMap {
    base: Handle,
    targets: Vec<Option<Handle>>,
}

impl RewriteMap {
    /// New handle for `old`; `None` if the document was deleted
    pub fn rewrite(&self, old: Handle) -> Option<Handle> {
        let offset = old.get().checked_sub(self.base.get())? as usize;
        self.targets.get(offset).copied().flatten()
    }

    /// Number of old handles covered
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if the map covers no handles
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of old handles that map to "removed"
    pub fn removed_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_none()).count()
    }
}

// ============================================================================
// Tests
// ============================================================================
