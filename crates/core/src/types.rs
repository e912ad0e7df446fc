//! Core types for the fulltext index
//!
//! This module defines the foundational identifiers:
//! - DocumentId: the external 64-bit document identifier owned by the store
//! - Handle: compact 32-bit surrogate stored in posting lists

use serde::{Deserialize, Serialize};
use std::fmt;

/// External document identifier
///
/// Assigned by the enclosing document store. The index never interprets it;
/// it only maps it to a [`Handle`] and back.
pub type DocumentId = u64;

/// Compact integer surrogate for a [`DocumentId`]
///
/// Handles are dense, allocated in increasing order and only renumbered by
/// handle table compaction. They are plain values: copying one never
/// extends the lifetime of the document it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Handle(u32);

impl Handle {
    /// First handle handed out by a fresh table. Zero is never a valid handle.
    pub const FIRST: Handle = Handle(1);

    /// Wrap a raw handle value
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Handle(raw)
    }

    /// Raw handle value
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Next handle in allocation order, `None` on exhaustion of the handle space
    #[inline]
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Handle)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
