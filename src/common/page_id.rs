//! Table and page identifier types.

use std::fmt;

/// Identifies a table (and its backing heap file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub u32);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table({})", self.0)
    }
}

/// Identifies a page on disk: the owning table plus the page number
/// within that table's heap file.
///
/// This is the buffer pool's cache key and the unit of disk addressing.
/// Ordering is by table first, then page number, so pages of one table
/// sort in file order.
///
/// # Example
/// ```
/// use heapdb::common::{PageId, TableId};
///
/// let page_id = PageId::new(TableId(7), 42);
/// assert_eq!(page_id.table_id(), TableId(7));
/// assert_eq!(page_id.page_no(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId {
    table_id: TableId,
    page_no: u32,
}

impl PageId {
    /// Create a new PageId.
    #[inline]
    pub fn new(table_id: TableId, page_no: u32) -> Self {
        PageId { table_id, page_no }
    }

    /// The table owning this page.
    #[inline]
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Page number within the table's heap file.
    #[inline]
    pub fn page_no(&self) -> u32 {
        self.page_no
    }

    /// Byte offset of this page inside its heap file.
    #[inline]
    pub fn file_offset(&self) -> u64 {
        self.page_no as u64 * crate::common::config::PAGE_SIZE as u64
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({}:{})", self.table_id.0, self.page_no)
    }
}
