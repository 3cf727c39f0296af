//! Transaction tokens and page permissions.
//!
//! There is no lock manager behind these types. A [`TransactionId`] only
//! attributes dirtied pages to the transaction that dirtied them, and
//! [`Permissions`] is accepted by the buffer pool without any blocking.
//! The lock-facing entry points on
//! [`BufferPoolManager`](crate::buffer::BufferPoolManager) report
//! [`Error::LockingNotEnforced`](crate::common::Error::LockingNotEnforced).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TRANSACTION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque transaction token passed to every buffer pool call.
///
/// # Example
/// ```
/// use heapdb::TransactionId;
///
/// let a = TransactionId::new();
/// let b = TransactionId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Allocate a fresh, process-unique transaction id.
    pub fn new() -> Self {
        TransactionId(NEXT_TRANSACTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Txn({})", self.0)
    }
}

/// Access mode requested when fetching a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permissions {
    ReadOnly,
    ReadWrite,
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permissions::ReadOnly => write!(f, "READ_ONLY"),
            Permissions::ReadWrite => write!(f, "READ_WRITE"),
        }
    }
}
