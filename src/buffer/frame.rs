//! Frame - one resident entry of the buffer pool.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::common::PageId;
use crate::concurrency::TransactionId;
use crate::storage::page::HeapPage;

/// Shared handle to a resident page.
///
/// Callers lock the page for the duration of a read or mutation only; no
/// page lock is ever held across a buffer pool call.
pub type PageRef = Arc<RwLock<HeapPage>>;

/// A cache entry: the page plus its dirty owner.
///
/// A page is dirty iff `dirtied_by` is set. The owner is transient and
/// never persisted.
pub struct Frame {
    page_id: PageId,
    page: PageRef,
    dirtied_by: Option<TransactionId>,
}

impl Frame {
    /// A clean entry for `page`.
    pub fn new(page: PageRef) -> Self {
        let page_id = page.read().id();
        Self {
            page_id,
            page,
            dirtied_by: None,
        }
    }

    #[inline]
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    #[inline]
    pub fn page(&self) -> &PageRef {
        &self.page
    }

    /// Replace the cached handle, keeping the dirty owner.
    pub fn set_page(&mut self, page: PageRef) {
        self.page = page;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirtied_by.is_some()
    }

    #[inline]
    pub fn dirtied_by(&self) -> Option<TransactionId> {
        self.dirtied_by
    }

    pub fn mark_dirty(&mut self, txn: TransactionId) {
        self.dirtied_by = Some(txn);
    }

    pub fn mark_clean(&mut self) {
        self.dirtied_by = None;
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("page_id", &self.page_id)
            .field("dirtied_by", &self.dirtied_by)
            .finish()
    }
}
