//! Storage layer - disk I/O and the heap file format.
//!
//! This module handles persistent storage:
//! - [`DiskManager`] - Page-granular file I/O
//! - [`page`] - Page bytes, slot layout and [`HeapPage`](page::HeapPage)
//! - [`HeapFile`] - One table's pages, behind the [`DbFile`] capability
//! - [`write_heap_file`] - Bulk-writes a heap file from in-memory pages
//! - [`DbFileIterator`] - Tuple stream over a file through the buffer pool

mod disk_manager;
mod heap_file;
pub mod page;

pub use disk_manager::DiskManager;
pub use heap_file::{write_heap_file, DbFile, DbFileIterator, HeapFile};
