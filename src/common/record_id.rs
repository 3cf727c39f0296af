//! Record locator type.

use std::fmt;

use super::PageId;

/// Locates a tuple on disk: its page plus the slot index on that page.
///
/// Set on a [`Tuple`](crate::tuple::Tuple) when it is read from or written
/// to a heap page; `None` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId {
    pub page_id: PageId,
    pub slot: usize,
}

impl RecordId {
    /// Create a new RecordId.
    #[inline]
    pub fn new(page_id: PageId, slot: usize) -> Self {
        RecordId { page_id, slot }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({}:{}#{})", self.page_id.table_id().0, self.page_id.page_no(), self.slot)
    }
}
