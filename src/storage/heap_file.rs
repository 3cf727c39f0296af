//! Heap files - one unordered file of heap pages per table.
//!
//! [`DbFile`] is the capability the buffer pool needs from a table's
//! backing store. [`HeapFile`] is the only implementation. A
//! [`DbFileIterator`] streams a file's tuples page by page through the
//! buffer pool.

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::buffer::{BufferPoolManager, PageRef};
use crate::common::config::PAGE_SIZE;
use crate::common::{Error, PageId, Result, TableId};
use crate::concurrency::{Permissions, TransactionId};
use crate::storage::page::{HeapPage, PageData, SlotLayout};
use crate::storage::DiskManager;
use crate::tuple::{Tuple, TupleDesc};

/// Backing store of one table, as seen by the buffer pool.
///
/// Page reads and writes go straight to disk. Tuple-level mutations go
/// through the buffer pool so the cached copy stays authoritative.
pub trait DbFile: Send + Sync {
    /// The table id, unique per file.
    fn id(&self) -> TableId;

    /// Schema of every tuple in the file.
    fn schema(&self) -> &Arc<TupleDesc>;

    /// Read and decode one page from disk.
    fn read_page(&self, page_id: PageId) -> Result<HeapPage>;

    /// Persist `page` at its offset. Never extends the file.
    fn write_page(&self, page: &HeapPage) -> Result<()>;

    /// Number of pages in the file.
    fn num_pages(&self) -> u32;

    /// Place `tuple` in the first page with a free slot, appending a new
    /// page if every page is full. Returns the pages that were modified.
    fn insert_tuple(
        &self,
        pool: &BufferPoolManager,
        txn: TransactionId,
        tuple: &mut Tuple,
    ) -> Result<Vec<PageRef>>;

    /// Clear the slot named by `tuple`'s record locator. Returns the page.
    fn delete_tuple(
        &self,
        pool: &BufferPoolManager,
        txn: TransactionId,
        tuple: &Tuple,
    ) -> Result<PageRef>;
}

/// A table stored as a bare sequence of [`HeapPage`]s.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use heapdb::storage::{DbFile, HeapFile};
/// use heapdb::tuple::{TupleDesc, Type};
///
/// let dir = tempfile::tempdir().unwrap();
/// let schema = Arc::new(TupleDesc::from_types(&[Type::Int]));
/// let file = HeapFile::create(dir.path().join("t.dat"), schema).unwrap();
/// assert_eq!(file.num_pages(), 0);
/// ```
pub struct HeapFile {
    table_id: TableId,
    schema: Arc<TupleDesc>,
    disk: Mutex<DiskManager>,
}

impl HeapFile {
    /// Create a new, empty heap file at `path`.
    ///
    /// # Errors
    /// Fails if the file already exists or cannot be created, or if a tuple
    /// of `schema` is too wide for a page.
    pub fn create<P: AsRef<Path>>(path: P, schema: Arc<TupleDesc>) -> Result<Self> {
        check_schema(&schema)?;
        let disk = DiskManager::create(&path)?;
        Self::with_disk(path.as_ref(), schema, disk)
    }

    /// Open an existing heap file at `path`.
    pub fn open<P: AsRef<Path>>(path: P, schema: Arc<TupleDesc>) -> Result<Self> {
        check_schema(&schema)?;
        let disk = DiskManager::open(&path)?;
        Self::with_disk(path.as_ref(), schema, disk)
    }

    /// Open the heap file at `path`, creating it if it doesn't exist.
    pub fn open_or_create<P: AsRef<Path>>(path: P, schema: Arc<TupleDesc>) -> Result<Self> {
        check_schema(&schema)?;
        let disk = DiskManager::open_or_create(&path)?;
        Self::with_disk(path.as_ref(), schema, disk)
    }

    fn with_disk(path: &Path, schema: Arc<TupleDesc>, disk: DiskManager) -> Result<Self> {
        let table_id = table_id_for(path)?;
        debug!("opened {} at {} ({} pages)", table_id, path.display(), disk.page_count());
        Ok(Self {
            table_id,
            schema,
            disk: Mutex::new(disk),
        })
    }

    fn check_owner(&self, page_id: PageId) -> Result<()> {
        if page_id.table_id() != self.table_id {
            return Err(Error::Storage(format!(
                "{} does not belong to {}",
                page_id, self.table_id
            )));
        }
        Ok(())
    }
}

/// Reject schemas whose tuples cannot share a page with the slot bitmap.
fn check_schema(schema: &TupleDesc) -> Result<()> {
    let size = schema.byte_size();
    if !SlotLayout::fits(size) {
        return Err(Error::Storage(format!(
            "tuples of {} bytes do not fit in a {}-byte page",
            size, PAGE_SIZE
        )));
    }
    Ok(())
}

/// Write a new heap file at `path` holding `pages`, one page per entry,
/// tuples in slot order. An empty entry is an empty page.
///
/// # Errors
/// Fails if the file already exists, a tuple does not match `schema`, or
/// an entry has more tuples than a page has slots.
pub fn write_heap_file<P: AsRef<Path>>(
    path: P,
    schema: &Arc<TupleDesc>,
    pages: &[Vec<Tuple>],
) -> Result<()> {
    check_schema(schema)?;
    let mut disk = DiskManager::create(&path)?;
    for (page_no, tuples) in pages.iter().enumerate() {
        // The table id is not part of the page bytes.
        let page_id = PageId::new(TableId(0), page_no as u32);
        let mut page = HeapPage::new(page_id, schema.clone(), PageData::new());
        for tuple in tuples {
            page.insert_tuple(&mut tuple.clone())?;
        }
        disk.append_page(page.data())?;
    }
    debug!("wrote {} pages to {}", pages.len(), path.as_ref().display());
    Ok(())
}

/// Derive a table id from the canonical path, so reopening the same file
/// yields the same id.
fn table_id_for(path: &Path) -> Result<TableId> {
    let canonical = path.canonicalize()?;
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok(TableId(hasher.finish() as u32))
}

impl DbFile for HeapFile {
    #[inline]
    fn id(&self) -> TableId {
        self.table_id
    }

    #[inline]
    fn schema(&self) -> &Arc<TupleDesc> {
        &self.schema
    }

    fn read_page(&self, page_id: PageId) -> Result<HeapPage> {
        self.check_owner(page_id)?;
        let data = self.disk.lock().read_page(page_id)?;
        Ok(HeapPage::new(page_id, self.schema.clone(), data))
    }

    fn write_page(&self, page: &HeapPage) -> Result<()> {
        self.check_owner(page.id())?;
        self.disk.lock().write_page(page.id(), page.data())
    }

    fn num_pages(&self) -> u32 {
        self.disk.lock().page_count()
    }

    fn insert_tuple(
        &self,
        pool: &BufferPoolManager,
        txn: TransactionId,
        tuple: &mut Tuple,
    ) -> Result<Vec<PageRef>> {
        for page_no in 0..self.num_pages() {
            let page_id = PageId::new(self.table_id, page_no);
            let page = pool.get(txn, page_id, Permissions::ReadWrite)?;
            {
                let mut heap_page = page.write();
                if heap_page.empty_slot_count() == 0 {
                    continue;
                }
                heap_page.insert_tuple(tuple)?;
            }
            return Ok(vec![page]);
        }

        // Every page is full: append an empty one, bypassing the cache.
        let page_no = self
            .disk
            .lock()
            .append_page(&HeapPage::create_empty_page_data())?;
        let page_id = PageId::new(self.table_id, page_no);
        debug!("appended {}", page_id);

        let page = pool.get(txn, page_id, Permissions::ReadWrite)?;
        page.write().insert_tuple(tuple)?;
        Ok(vec![page])
    }

    fn delete_tuple(
        &self,
        pool: &BufferPoolManager,
        txn: TransactionId,
        tuple: &Tuple,
    ) -> Result<PageRef> {
        let rid = tuple
            .record_id()
            .ok_or_else(|| Error::Storage("tuple has no record id".to_string()))?;
        self.check_owner(rid.page_id)?;

        let page = pool.get(txn, rid.page_id, Permissions::ReadWrite)?;
        page.write().delete_tuple(tuple)?;
        Ok(page)
    }
}

/// Forward-only stream over every tuple of one file.
///
/// Pages are fetched read-only through the buffer pool, one at a time, and
/// their occupied tuples buffered in slot order. Empty pages are skipped.
/// The stream is restartable with [`DbFileIterator::rewind`].
pub struct DbFileIterator {
    file: Arc<dyn DbFile>,
    pool: Arc<BufferPoolManager>,
    txn: TransactionId,
    state: Option<ScanState>,
}

struct ScanState {
    next_page: u32,
    buffered: VecDeque<Tuple>,
}

impl DbFileIterator {
    /// Create a closed iterator over `file`.
    pub fn new(file: Arc<dyn DbFile>, pool: Arc<BufferPoolManager>, txn: TransactionId) -> Self {
        Self {
            file,
            pool,
            txn,
            state: None,
        }
    }

    /// Position the stream before the first tuple.
    pub fn open(&mut self) -> Result<()> {
        self.state = Some(ScanState {
            next_page: 0,
            buffered: VecDeque::new(),
        });
        Ok(())
    }

    /// Whether another tuple is available. A closed iterator has none.
    pub fn has_next(&mut self) -> Result<bool> {
        let Some(state) = self.state.as_mut() else {
            return Ok(false);
        };

        while state.buffered.is_empty() && state.next_page < self.file.num_pages() {
            let page_id = PageId::new(self.file.id(), state.next_page);
            let page = self.pool.get(self.txn, page_id, Permissions::ReadOnly)?;
            state.buffered.extend(page.read().tuples());
            state.next_page += 1;
        }
        Ok(!state.buffered.is_empty())
    }

    /// The next tuple.
    ///
    /// # Errors
    /// `Error::NoSuchElement` if the iterator is closed or exhausted.
    pub fn next(&mut self) -> Result<Tuple> {
        if !self.has_next()? {
            return Err(Error::NoSuchElement);
        }
        self.state
            .as_mut()
            .and_then(|state| state.buffered.pop_front())
            .ok_or(Error::NoSuchElement)
    }

    /// Restart from the first page.
    pub fn rewind(&mut self) -> Result<()> {
        self.close();
        self.open()
    }

    /// Drop buffered tuples. `next` fails until the iterator is reopened.
    pub fn close(&mut self) {
        self.state = None;
    }
}
