//! PageData - the raw 4KB unit of storage.
//!
//! A [`PageData`] is the byte image of one page exactly as it sits on disk.
//! [`HeapPage`](super::HeapPage) interprets those bytes as a slotted page.

use crate::common::config::PAGE_SIZE;

/// The bytes of one page (4KB, 4KB-aligned).
///
/// This is the unit of I/O between disk and memory.
///
/// # Example
/// ```
/// use heapdb::storage::page::PageData;
///
/// let mut page = PageData::new();
/// page.as_mut_slice()[0] = 0xFF;
/// assert_eq!(page.as_slice()[0], 0xFF);
/// ```
#[repr(align(4096))]
#[derive(Clone)]
pub struct PageData {
    data: [u8; PAGE_SIZE],
}

impl PageData {
    /// Create a new zeroed page. An all-zero page is an empty heap page.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [0u8; PAGE_SIZE],
        }
    }

    /// Copy a page image out of `bytes`.
    ///
    /// # Panics
    /// Panics if `bytes.len() != PAGE_SIZE`.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut page = Self::new();
        page.data.copy_from_slice(bytes);
        page
    }

    /// Get immutable slice of page data.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable slice of page data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Zero out the entire page.
    pub fn reset(&mut self) {
        self.data.fill(0);
    }
}

impl Default for PageData {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.data.iter().filter(|&&b| b != 0).count();
        write!(f, "PageData {{ nonzero_bytes: {} }}", used)
    }
}
