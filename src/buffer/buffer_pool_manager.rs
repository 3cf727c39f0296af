//! Buffer Pool Manager - the page cache between operators and heap files.
//!
//! The [`BufferPoolManager`] provides:
//! - Bounded caching of heap pages keyed by [`PageId`]
//! - Strict LRU eviction with best-effort write-back of dirty victims
//! - Tuple insert/delete entry points that mark pages dirty
//! - Explicit flush and discard hooks

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace, warn};
use parking_lot::{Mutex, RwLock};

use crate::buffer::replacer::LruReplacer;
use crate::buffer::{BufferPoolStats, Frame, PageRef};
use crate::catalog::Catalog;
use crate::common::config::DEFAULT_POOL_PAGES;
use crate::common::{Error, FrameId, PageId, Result, TableId};
use crate::concurrency::{Permissions, TransactionId};
use crate::tuple::Tuple;

/// Everything guarded by the pool mutex.
struct PoolState {
    /// Arena of resident entries; `None` slots are on the free list.
    frames: Vec<Option<Frame>>,

    /// Unused arena slots.
    free_list: Vec<FrameId>,

    /// Maps page IDs to frame IDs.
    page_table: HashMap<PageId, FrameId>,

    /// Recency order of resident frames.
    replacer: LruReplacer,
}

impl PoolState {
    fn frame(&self, frame_id: FrameId) -> Option<&Frame> {
        self.frames.get(frame_id.0).and_then(Option::as_ref)
    }

    fn frame_mut(&mut self, frame_id: FrameId) -> Option<&mut Frame> {
        self.frames.get_mut(frame_id.0).and_then(Option::as_mut)
    }

    fn resident(&self, page_id: PageId) -> Option<&Frame> {
        self.page_table.get(&page_id).and_then(|&fid| self.frame(fid))
    }

    /// Drop `frame_id` from every structure and return its entry.
    fn detach(&mut self, frame_id: FrameId) -> Option<Frame> {
        let frame = self.frames.get_mut(frame_id.0)?.take()?;
        self.page_table.remove(&frame.page_id());
        self.replacer.remove(frame_id);
        self.free_list.push(frame_id);
        Some(frame)
    }
}

/// Caches up to `capacity` heap pages.
///
/// # Architecture
/// ```text
/// ┌───────────────────────────────────────────────────────────────┐
/// │                     BufferPoolManager                         │
/// │  ┌──────────────────── Mutex<PoolState> ──────────────────┐   │
/// │  │ ┌──────────────┐   ┌───────────────────────────────┐   │   │
/// │  │ │ page_table   │   │ frames: Vec<Option<Frame>>    │   │   │
/// │  │ │PageId → Fid  │──▶│ [F0] [F1] [ - ] [F3] ...      │   │   │
/// │  │ └──────────────┘   └───────────────────────────────┘   │   │
/// │  │ ┌──────────────┐   ┌───────────────────────────────┐   │   │
/// │  │ │  free_list   │   │ replacer: LruReplacer         │   │   │
/// │  │ │ Vec<FrameId> │   │ MRU ◀──▶ ... ◀──▶ LRU         │   │   │
/// │  │ └──────────────┘   └───────────────────────────────┘   │   │
/// │  └────────────────────────────────────────────────────────┘   │
/// │  ┌──────────────┐   ┌──────────────┐                          │
/// │  │ catalog      │   │ stats        │                          │
/// │  │ TableId→file │   │ atomics      │                          │
/// │  └──────────────┘   └──────────────┘                          │
/// └───────────────────────────────────────────────────────────────┘
/// ```
///
/// # Thread Safety
/// One mutex serializes every structural change (lookup, install, evict,
/// flush). Page contents have their own `RwLock` inside [`PageRef`]. The
/// pool never acquires the pool mutex while a caller could be expected to
/// hold a page lock, and callers must not hold a page lock across a pool
/// call.
///
/// # Buffer policy
/// Steal/no-force: a dirty page may be written back by eviction before its
/// transaction finishes, and nothing is forced to disk at commit. No page
/// lock manager backs the `txn`/`perm` arguments; see
/// [`BufferPoolManager::release_page`].
///
/// # Usage
/// ```
/// use std::sync::Arc;
/// use heapdb::{BufferPoolManager, Permissions, TransactionId};
/// use heapdb::catalog::Catalog;
/// use heapdb::storage::{DbFile, HeapFile};
/// use heapdb::tuple::{Field, Tuple, TupleDesc, Type};
///
/// let dir = tempfile::tempdir().unwrap();
/// let schema = Arc::new(TupleDesc::new(&[Type::Int], &["x"]));
/// let file = Arc::new(HeapFile::create(dir.path().join("t.dat"), schema.clone()).unwrap());
/// let catalog = Arc::new(Catalog::new());
/// catalog.add_table(file.clone(), "t");
///
/// let pool = BufferPoolManager::new(8, catalog);
/// let txn = TransactionId::new();
///
/// let mut tuple = Tuple::new(schema, vec![Field::Int(42)]).unwrap();
/// pool.insert_tuple(txn, file.id(), &mut tuple).unwrap();
///
/// let page_id = tuple.record_id().unwrap().page_id;
/// let page = pool.get(txn, page_id, Permissions::ReadOnly).unwrap();
/// assert_eq!(page.read().tuples().count(), 1);
/// assert_eq!(pool.dirtied_by(page_id), Some(txn));
/// ```
pub struct BufferPoolManager {
    state: Mutex<PoolState>,

    /// Resolves a page's table to its heap file.
    catalog: Arc<Catalog>,

    /// Performance statistics.
    stats: BufferPoolStats,

    /// Maximum number of resident pages (immutable after construction).
    capacity: usize,
}

impl BufferPoolManager {
    /// Create a pool caching at most `capacity` pages.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize, catalog: Arc<Catalog>) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        let frames = (0..capacity).map(|_| None).collect();
        // Reversed so frame 0 is handed out first.
        let free_list = (0..capacity).rev().map(FrameId::new).collect();

        Self {
            state: Mutex::new(PoolState {
                frames,
                free_list,
                page_table: HashMap::with_capacity(capacity),
                replacer: LruReplacer::new(capacity),
            }),
            catalog,
            stats: BufferPoolStats::new(),
            capacity,
        }
    }

    /// Create a pool of [`DEFAULT_POOL_PAGES`] pages.
    pub fn with_default_capacity(catalog: Arc<Catalog>) -> Self {
        Self::new(DEFAULT_POOL_PAGES, catalog)
    }

    // ========================================================================
    // Public API: Fetch pages
    // ========================================================================

    /// Fetch a page, loading it from its heap file on a miss.
    ///
    /// A hit promotes the page to most recently used. A miss with the pool
    /// full evicts the least recently used page first, writing it back if
    /// dirty; a failed write-back is logged and counted, not returned.
    ///
    /// `perm` is recorded only; no lock is taken.
    ///
    /// # Errors
    /// - `Error::TransactionAborted` if the page's table is not in the catalog
    /// - `Error::PageNotFound` / `Error::ShortRead` / `Error::Io` from the read
    pub fn get(&self, txn: TransactionId, page_id: PageId, perm: Permissions) -> Result<PageRef> {
        let mut state = self.state.lock();

        if let Some(&frame_id) = state.page_table.get(&page_id) {
            if let Some(frame) = state.frame(frame_id) {
                let page = frame.page().clone();
                state.replacer.record_access(frame_id);
                BufferPoolStats::bump(&self.stats.cache_hits);
                trace!("{} hit {} ({}) in {}", txn, page_id, perm, frame_id);
                return Ok(page);
            }
        }

        BufferPoolStats::bump(&self.stats.cache_misses);
        debug!("{} miss {} ({})", txn, page_id, perm);

        let file = self.catalog.file(page_id.table_id()).map_err(|e| {
            Error::TransactionAborted(format!("cannot load {}: {}", page_id, e))
        })?;
        let page = Arc::new(RwLock::new(file.read_page(page_id)?));
        BufferPoolStats::bump(&self.stats.pages_read);

        self.install(&mut state, page.clone())?;
        Ok(page)
    }

    // ========================================================================
    // Public API: Tuple mutation
    // ========================================================================

    /// Insert `tuple` into table `table_id` on behalf of `txn`.
    ///
    /// The heap file picks (or appends) the page. Every page it modifies is
    /// marked dirtied by `txn` and made resident; a page that is already
    /// resident keeps its place in the recency order.
    ///
    /// On success `tuple` carries its new record locator.
    pub fn insert_tuple(&self, txn: TransactionId, table_id: TableId, tuple: &mut Tuple) -> Result<()> {
        let file = self.catalog.file(table_id)?;
        let pages = file.insert_tuple(self, txn, tuple)?;

        let mut state = self.state.lock();
        for page in pages {
            self.mark_dirty(&mut state, txn, page)?;
        }
        Ok(())
    }

    /// Delete `tuple` from the page its record locator names.
    ///
    /// # Errors
    /// `Error::Storage` if the tuple has no record locator or its slot is
    /// not occupied.
    pub fn delete_tuple(&self, txn: TransactionId, tuple: &Tuple) -> Result<()> {
        let rid = tuple
            .record_id()
            .ok_or_else(|| Error::Storage("tuple has no record id".to_string()))?;
        let file = self.catalog.file(rid.page_id.table_id())?;
        let page = file.delete_tuple(self, txn, tuple)?;

        let mut state = self.state.lock();
        self.mark_dirty(&mut state, txn, page)
    }

    // ========================================================================
    // Public API: Flush and discard
    // ========================================================================

    /// Write `page_id` back if it is resident and dirty.
    ///
    /// # Errors
    /// Errors from the write are returned and the page stays dirty.
    pub fn flush_page(&self, page_id: PageId) -> Result<()> {
        let mut state = self.state.lock();
        match state.page_table.get(&page_id) {
            Some(&frame_id) => self.flush_frame(&mut state, frame_id),
            None => Ok(()),
        }
    }

    /// Write back every dirty resident page.
    pub fn flush_all_pages(&self) -> Result<()> {
        let mut state = self.state.lock();
        let mut targets: Vec<(PageId, FrameId)> =
            state.page_table.iter().map(|(&pid, &fid)| (pid, fid)).collect();
        targets.sort();

        for (_, frame_id) in targets {
            self.flush_frame(&mut state, frame_id)?;
        }
        Ok(())
    }

    /// Write back every resident page dirtied by `txn`.
    pub fn flush_pages(&self, txn: TransactionId) -> Result<()> {
        let mut state = self.state.lock();
        let mut targets: Vec<(PageId, FrameId)> = state
            .page_table
            .iter()
            .filter(|(_, &fid)| state.frame(fid).and_then(Frame::dirtied_by) == Some(txn))
            .map(|(&pid, &fid)| (pid, fid))
            .collect();
        targets.sort();

        for (_, frame_id) in targets {
            self.flush_frame(&mut state, frame_id)?;
        }
        Ok(())
    }

    /// Drop `page_id` from the cache without writing it back.
    ///
    /// Unflushed changes to the page are lost.
    pub fn discard_page(&self, page_id: PageId) {
        let mut state = self.state.lock();
        if let Some(&frame_id) = state.page_table.get(&page_id) {
            state.detach(frame_id);
            debug!("discarded {}", page_id);
        }
    }

    // ========================================================================
    // Public API: Page locking (no lock manager)
    // ========================================================================

    /// Release `txn`'s lock on `page_id`.
    ///
    /// # Errors
    /// Always `Error::LockingNotEnforced`: there are no page locks to release.
    pub fn release_page(&self, txn: TransactionId, page_id: PageId) -> Result<()> {
        warn!("release_page({}, {}) called without a lock manager", txn, page_id);
        Err(Error::LockingNotEnforced("release_page"))
    }

    /// Whether `txn` holds a lock on `page_id`.
    ///
    /// # Errors
    /// Always `Error::LockingNotEnforced`.
    pub fn holds_lock(&self, txn: TransactionId, page_id: PageId) -> Result<bool> {
        warn!("holds_lock({}, {}) called without a lock manager", txn, page_id);
        Err(Error::LockingNotEnforced("holds_lock"))
    }

    /// Commit or abort `txn`, releasing its locks.
    ///
    /// # Errors
    /// Always `Error::LockingNotEnforced`. Use [`BufferPoolManager::flush_pages`]
    /// or [`BufferPoolManager::discard_page`] directly.
    pub fn transaction_complete(&self, txn: TransactionId, commit: bool) -> Result<()> {
        warn!(
            "transaction_complete({}, commit={}) called without a lock manager",
            txn, commit
        );
        Err(Error::LockingNotEnforced("transaction_complete"))
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    /// Get buffer pool statistics.
    pub fn stats(&self) -> &BufferPoolStats {
        &self.stats
    }

    /// The catalog pages are resolved against.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Maximum number of resident pages.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pages currently resident.
    pub fn resident_count(&self) -> usize {
        self.state.lock().page_table.len()
    }

    /// Whether `page_id` is resident.
    pub fn is_resident(&self, page_id: PageId) -> bool {
        self.state.lock().page_table.contains_key(&page_id)
    }

    /// The transaction that dirtied `page_id`, if it is resident and dirty.
    pub fn dirtied_by(&self, page_id: PageId) -> Option<TransactionId> {
        self.state.lock().resident(page_id).and_then(Frame::dirtied_by)
    }

    /// Resident pages from most to least recently used.
    pub fn resident_pages(&self) -> Vec<PageId> {
        let state = self.state.lock();
        state
            .replacer
            .iter_mru()
            .filter_map(|fid| state.frame(fid).map(Frame::page_id))
            .collect()
    }

    // ========================================================================
    // Internal: Installation and eviction
    // ========================================================================

    /// Make `page` resident as most recently used, evicting if full.
    fn install(&self, state: &mut PoolState, page: PageRef) -> Result<FrameId> {
        if state.page_table.len() >= self.capacity {
            self.evict_one(state);
        }

        let frame_id = state
            .free_list
            .pop()
            .ok_or_else(|| Error::Storage("no free frame after eviction".to_string()))?;
        let frame = Frame::new(page);
        let page_id = frame.page_id();

        state.frames[frame_id.0] = Some(frame);
        state.page_table.insert(page_id, frame_id);
        state.replacer.record_access(frame_id);
        Ok(frame_id)
    }

    /// Drop the least recently used page, writing it back first if dirty.
    fn evict_one(&self, state: &mut PoolState) {
        let Some(victim) = state.replacer.evict() else {
            return;
        };
        let Some(frame) = state.detach(victim) else {
            return;
        };
        BufferPoolStats::bump(&self.stats.evictions);
        debug!("evicting {} from {}", frame.page_id(), victim);

        if frame.is_dirty() {
            if let Err(e) = self.write_back(&frame) {
                BufferPoolStats::bump(&self.stats.flush_failures);
                warn!("dropping dirty {} after failed write-back: {}", frame.page_id(), e);
            }
        }
    }

    /// Record `page` as dirtied by `txn`, making it resident if it is not.
    fn mark_dirty(&self, state: &mut PoolState, txn: TransactionId, page: PageRef) -> Result<()> {
        let page_id = page.read().id();
        let frame_id = match state.page_table.get(&page_id) {
            Some(&frame_id) => {
                if let Some(frame) = state.frame_mut(frame_id) {
                    frame.set_page(page);
                }
                frame_id
            }
            None => self.install(state, page)?,
        };

        if let Some(frame) = state.frame_mut(frame_id) {
            frame.mark_dirty(txn);
        }
        Ok(())
    }

    // ========================================================================
    // Internal: Write-back
    // ========================================================================

    fn flush_frame(&self, state: &mut PoolState, frame_id: FrameId) -> Result<()> {
        let Some(frame) = state.frame_mut(frame_id) else {
            return Ok(());
        };
        if !frame.is_dirty() {
            return Ok(());
        }

        self.write_back(frame)?;
        frame.mark_clean();
        Ok(())
    }

    fn write_back(&self, frame: &Frame) -> Result<()> {
        let file = self.catalog.file(frame.page_id().table_id())?;
        file.write_page(&frame.page().read())?;
        BufferPoolStats::bump(&self.stats.pages_written);
        trace!("wrote back {}", frame.page_id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbFile;
    use crate::test_utils::{int_row, TestDb};

    fn pid(file: &Arc<dyn DbFile>, n: u32) -> PageId {
        PageId::new(file.id(), n)
    }

    #[test]
    fn test_hit_and_miss_counters() {
        let db = TestDb::new(4);
        let file = db.table_with_pages("t", 1, &[vec![1], vec![2]]);
        let txn = TransactionId::new();

        db.pool.get(txn, pid(&file, 0), Permissions::ReadOnly).unwrap();
        db.pool.get(txn, pid(&file, 0), Permissions::ReadOnly).unwrap();
        db.pool.get(txn, pid(&file, 1), Permissions::ReadOnly).unwrap();

        let snapshot = db.pool.stats().snapshot();
        assert_eq!(snapshot.cache_hits, 1);
        assert_eq!(snapshot.cache_misses, 2);
        assert_eq!(snapshot.pages_read, 2);
        assert_eq!(db.pool.resident_count(), 2);
    }

    #[test]
    fn test_hit_returns_same_page() {
        let db = TestDb::new(2);
        let file = db.table_with_pages("t", 1, &[vec![1]]);
        let txn = TransactionId::new();

        let a = db.pool.get(txn, pid(&file, 0), Permissions::ReadOnly).unwrap();
        let b = db.pool.get(txn, pid(&file, 0), Permissions::ReadWrite).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let db = TestDb::new(3);
        let file = db.table_with_pages("t", 1, &[vec![0], vec![1], vec![2], vec![3]]);
        let txn = TransactionId::new();

        for n in 0..3 {
            db.pool.get(txn, pid(&file, n), Permissions::ReadOnly).unwrap();
        }
        // Touch page 0 so page 1 becomes the LRU entry.
        db.pool.get(txn, pid(&file, 0), Permissions::ReadOnly).unwrap();
        db.pool.get(txn, pid(&file, 3), Permissions::ReadOnly).unwrap();

        assert_eq!(db.pool.resident_count(), 3);
        assert!(!db.pool.is_resident(pid(&file, 1)));
        assert_eq!(
            db.pool.resident_pages(),
            vec![pid(&file, 3), pid(&file, 0), pid(&file, 2)]
        );
        assert_eq!(db.pool.stats().snapshot().evictions, 1);
    }

    #[test]
    fn test_dirty_victim_is_written_back() {
        let db = TestDb::new(1);
        let file = db.table_with_pages("t", 1, &[vec![], vec![7]]);
        let txn = TransactionId::new();
        let schema = file.schema().clone();

        let mut t = int_row(&schema, 99);
        db.pool.insert_tuple(txn, file.id(), &mut t).unwrap();
        assert_eq!(db.pool.dirtied_by(pid(&file, 0)), Some(txn));

        // Loading page 1 evicts dirty page 0.
        db.pool.get(txn, pid(&file, 1), Permissions::ReadOnly).unwrap();
        assert!(!db.pool.is_resident(pid(&file, 0)));

        let on_disk = file.read_page(pid(&file, 0)).unwrap();
        assert_eq!(on_disk.tuples().next().unwrap(), t);
        assert_eq!(db.pool.stats().snapshot().pages_written, 1);
    }

    #[test]
    fn test_unknown_table_aborts() {
        let db = TestDb::new(2);
        let result = db
            .pool
            .get(TransactionId::new(), PageId::new(TableId(12345), 0), Permissions::ReadOnly);
        assert!(result.unwrap_err().is_abort());
    }

    #[test]
    fn test_page_past_end_is_storage_fault() {
        let db = TestDb::new(2);
        let file = db.int_table("t", 1);
        let err = db
            .pool
            .get(TransactionId::new(), pid(&file, 5), Permissions::ReadOnly)
            .unwrap_err();
        assert!(err.is_storage_fault());
        assert_eq!(db.pool.resident_count(), 0);
    }

    #[test]
    fn test_flush_clears_dirty_and_persists() {
        let db = TestDb::new(4);
        let file = db.int_table("t", 2);
        let txn = TransactionId::new();
        let schema = file.schema().clone();

        let mut t = int_row(&schema, 5);
        db.pool.insert_tuple(txn, file.id(), &mut t).unwrap();
        let page_id = t.record_id().unwrap().page_id;

        // Appended page is still all-zero on disk.
        assert_eq!(file.read_page(page_id).unwrap().tuples().count(), 0);

        db.pool.flush_page(page_id).unwrap();
        assert_eq!(db.pool.dirtied_by(page_id), None);
        assert_eq!(file.read_page(page_id).unwrap().tuples().count(), 1);

        // Clean page: flush is a no-op.
        db.pool.flush_page(page_id).unwrap();
        assert_eq!(db.pool.stats().snapshot().pages_written, 1);
    }

    #[test]
    fn test_flush_pages_only_touches_owner() {
        let db = TestDb::new(4);
        let a = db.int_table("a", 1);
        let b = db.int_table("b", 1);
        let (ta, tb) = (TransactionId::new(), TransactionId::new());

        db.pool.insert_tuple(ta, a.id(), &mut int_row(a.schema(), 1)).unwrap();
        db.pool.insert_tuple(tb, b.id(), &mut int_row(b.schema(), 2)).unwrap();

        db.pool.flush_pages(ta).unwrap();
        assert_eq!(db.pool.dirtied_by(pid(&a, 0)), None);
        assert_eq!(db.pool.dirtied_by(pid(&b, 0)), Some(tb));

        db.pool.flush_all_pages().unwrap();
        assert_eq!(db.pool.dirtied_by(pid(&b, 0)), None);
    }

    #[test]
    fn test_flush_all_writes_every_dirty_page() {
        let db = TestDb::new(8);
        let a = db.table_with_pages("a", 1, &[vec![1], vec![2]]);
        let b = db.table_with_pages("b", 1, &[vec![3]]);
        let txn = TransactionId::new();

        for file in [&a, &b] {
            for n in 0..file.num_pages() {
                let page = db.pool.get(txn, pid(file, n), Permissions::ReadWrite).unwrap();
                let tuple = page.read().tuple_at(0).unwrap();
                db.pool.delete_tuple(txn, &tuple).unwrap();
            }
        }
        assert_eq!(db.pool.resident_count(), 3);

        db.pool.flush_all_pages().unwrap();
        assert_eq!(db.pool.stats().snapshot().pages_written, 3);
        for (file, n) in [(&a, 0), (&a, 1), (&b, 0)] {
            assert_eq!(db.pool.dirtied_by(pid(file, n)), None);
            assert_eq!(file.read_page(pid(file, n)).unwrap().tuples().count(), 0);
        }
    }

    #[test]
    fn test_discard_drops_changes() {
        let db = TestDb::new(4);
        let file = db.table_with_pages("t", 1, &[vec![1]]);
        let txn = TransactionId::new();
        let schema = file.schema().clone();

        db.pool.insert_tuple(txn, file.id(), &mut int_row(&schema, 2)).unwrap();
        db.pool.discard_page(pid(&file, 0));
        assert!(!db.pool.is_resident(pid(&file, 0)));

        let page = db.pool.get(txn, pid(&file, 0), Permissions::ReadOnly).unwrap();
        assert_eq!(page.read().tuples().count(), 1);
    }

    #[test]
    fn test_insert_makes_page_resident_and_dirty() {
        let db = TestDb::new(2);
        let file = db.table_with_pages("t", 1, &[vec![1], vec![2]]);
        let txn = TransactionId::new();
        let schema = file.schema().clone();

        db.pool.get(txn, pid(&file, 1), Permissions::ReadOnly).unwrap();
        db.pool.insert_tuple(txn, file.id(), &mut int_row(&schema, 3)).unwrap();

        assert_eq!(db.pool.resident_pages(), vec![pid(&file, 0), pid(&file, 1)]);
        assert_eq!(db.pool.dirtied_by(pid(&file, 0)), Some(txn));
        assert_eq!(db.pool.dirtied_by(pid(&file, 1)), None);
    }

    #[test]
    fn test_delete_marks_dirty() {
        let db = TestDb::new(2);
        let file = db.table_with_pages("t", 1, &[vec![1, 2]]);
        let txn = TransactionId::new();

        let page = db.pool.get(txn, pid(&file, 0), Permissions::ReadOnly).unwrap();
        let victim = page.read().tuples().next().unwrap();
        db.pool.delete_tuple(txn, &victim).unwrap();
        assert_eq!(db.pool.dirtied_by(pid(&file, 0)), Some(txn));

        // Slot already empty.
        assert!(db.pool.delete_tuple(txn, &victim).unwrap_err().is_storage_fault());
    }

    #[test]
    fn test_lock_stubs_fail_loudly() {
        let db = TestDb::new(1);
        let txn = TransactionId::new();
        let page_id = PageId::new(TableId(1), 0);

        assert!(matches!(
            db.pool.release_page(txn, page_id),
            Err(Error::LockingNotEnforced("release_page"))
        ));
        assert!(db.pool.holds_lock(txn, page_id).is_err());
        assert!(db.pool.transaction_complete(txn, true).is_err());
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity_panics() {
        let db = TestDb::new(1);
        BufferPoolManager::new(0, db.catalog.clone());
    }
}
