//! heapdb - page-cached heap storage and a pull-based execution kernel.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            heapdb                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Query Layer (execution/)                    │   │
//! │  │   SeqScan → Filter → Aggregate      Insert / Delete      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │              ↓                              ↑                   │
//! │  ┌──────────────────────────┐   ┌──────────────────────────┐   │
//! │  │ Buffer Pool (buffer/)    │   │ Statistics (optimizer/)  │   │
//! │  │ BufferPoolManager + LRU  │   │ IntHistogram, TableStats │   │
//! │  └──────────────────────────┘   └──────────────────────────┘   │
//! │              ↓                                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Storage Layer (storage/)                       │   │
//! │  │     HeapFile + HeapPage (slotted, bitmap) + DiskManager  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │        Catalog (catalog)         Tuples and schemas (tuple/)    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, RecordId, Error, config)
//! - [`tuple`] - Field types, schemas and rows
//! - [`storage`] - Disk I/O, heap pages and heap files
//! - [`catalog`] - Table registry
//! - [`buffer`] - Page cache with LRU eviction
//! - [`concurrency`] - Transaction tokens and page permissions
//! - [`execution`] - Query operators
//! - [`optimizer`] - Histograms and table statistics
//!
//! # Quick Start
//! ```no_run
//! use std::sync::Arc;
//! use heapdb::execution::{collect_all, OpIterator, SeqScan};
//! use heapdb::tuple::{TupleDesc, Type};
//! use heapdb::{BufferPoolManager, Catalog, DbFile, HeapFile, TransactionId};
//!
//! let schema = Arc::new(TupleDesc::new(&[Type::Int, Type::Str], &["id", "name"]));
//! let file: Arc<dyn DbFile> = Arc::new(HeapFile::open_or_create("people.dat", schema).unwrap());
//!
//! let catalog = Arc::new(Catalog::new());
//! catalog.add_table(file.clone(), "people");
//! let pool = Arc::new(BufferPoolManager::with_default_capacity(catalog));
//!
//! let mut scan = SeqScan::new(pool, TransactionId::new(), file.id(), None).unwrap();
//! scan.open().unwrap();
//! for tuple in collect_all(&mut scan).unwrap() {
//!     println!("{}", tuple);
//! }
//! ```

pub mod buffer;
pub mod catalog;
pub mod common;
pub mod concurrency;
pub mod execution;
pub mod optimizer;
pub mod storage;
pub mod tuple;

#[cfg(test)]
mod test_utils;

// Re-export commonly used items at crate root for convenience
pub use common::config::PAGE_SIZE;
pub use common::{Error, PageId, RecordId, Result, TableId};

pub use buffer::{BufferPoolManager, BufferPoolStats, StatsSnapshot};
pub use catalog::Catalog;
pub use concurrency::{Permissions, TransactionId};
pub use storage::{write_heap_file, DbFile, HeapFile};
