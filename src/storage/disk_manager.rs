//! Disk Manager - page-granular file I/O for one heap file.
//!
//! The [`DiskManager`] handles all direct file operations:
//! - Reading and overwriting existing pages
//! - Appending new pages at the end of the file
//! - Deriving the page count from the file length

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::common::config::PAGE_SIZE;
use crate::common::{Error, PageId, Result};
use crate::storage::page::PageData;

/// Manages disk I/O for a single heap file.
///
/// # File Layout
/// A heap file is a bare run of pages, no header, footer or checksum:
/// ```text
/// ┌─────────┬─────────┬─────────┬─────────┬─────────┐
/// │ Page 0  │ Page 1  │ Page 2  │  ...    │ Page N  │
/// │ (4KB)   │ (4KB)   │ (4KB)   │         │ (4KB)   │
/// └─────────┴─────────┴─────────┴─────────┴─────────┘
/// Offset:  0      4096     8192    ...    N×4096
/// ```
///
/// Page N is located at file offset `N × PAGE_SIZE`. Only the page number of
/// a [`PageId`] is used for addressing; the owning `HeapFile` checks the
/// table id.
///
/// # Thread Safety
/// `DiskManager` is **single-threaded**. `HeapFile` serializes access to it
/// behind a mutex.
///
/// # Durability
/// Writes are not followed by `fsync()`. The buffer pool is no-force and
/// there is no log to make an fsync meaningful.
pub struct DiskManager {
    file: File,
    /// Number of pages in the file, `ceil(len / PAGE_SIZE)`.
    page_count: u32,
}

impl DiskManager {
    /// Create a new, empty heap file.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)?;

        Ok(Self {
            file,
            page_count: 0,
        })
    }

    /// Open an existing heap file.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist or cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(&path)?;

        let file_size = file.metadata()?.len();
        let page_count = file_size.div_ceil(PAGE_SIZE as u64) as u32;

        Ok(Self { file, page_count })
    }

    /// Open an existing heap file, or create it if it doesn't exist.
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    /// Read one page from disk.
    ///
    /// # Errors
    /// - `Error::PageNotFound` if the page lies past the end of the file
    /// - `Error::ShortRead` if fewer than `PAGE_SIZE` bytes are available
    pub fn read_page(&mut self, page_id: PageId) -> Result<PageData> {
        if page_id.page_no() >= self.page_count {
            return Err(Error::PageNotFound(page_id));
        }

        self.file.seek(SeekFrom::Start(page_id.file_offset()))?;

        let mut page = PageData::new();
        let buf = page.as_mut_slice();
        let mut read = 0;
        while read < PAGE_SIZE {
            match self.file.read(&mut buf[read..]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        if read < PAGE_SIZE {
            return Err(Error::ShortRead { page_id, read });
        }

        Ok(page)
    }

    /// Overwrite an existing page.
    ///
    /// Never extends the file; use [`DiskManager::append_page`] for that.
    ///
    /// # Errors
    /// Returns `Error::PageNotFound` if the page is past the end of the file.
    pub fn write_page(&mut self, page_id: PageId, page: &PageData) -> Result<()> {
        if page_id.page_no() >= self.page_count {
            return Err(Error::PageNotFound(page_id));
        }

        self.file.seek(SeekFrom::Start(page_id.file_offset()))?;
        self.file.write_all(page.as_slice())?;

        Ok(())
    }

    /// Append `page` at offset `page_count × PAGE_SIZE`.
    ///
    /// Returns the page number of the appended page.
    pub fn append_page(&mut self, page: &PageData) -> Result<u32> {
        let page_no = self.page_count;
        let offset = page_no as u64 * PAGE_SIZE as u64;

        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(page.as_slice())?;

        self.page_count += 1;
        Ok(page_no)
    }

    /// Get the number of pages in the file.
    #[inline]
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Get the size of the file in bytes.
    pub fn file_size(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }
}
