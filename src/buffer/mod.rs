//! Buffer pool management.
//!
//! The buffer pool is the in-memory cache layer between operators and heap
//! files. Every page access and tuple mutation goes through it.
//!
//! # Components
//! - [`BufferPoolManager`] - The page cache
//! - [`Frame`] - A resident page plus its dirty owner
//! - [`PageRef`] - Shared, lockable handle to a resident page
//! - [`BufferPoolStats`] - Performance statistics
//! - [`replacer`] - LRU eviction policy

mod buffer_pool_manager;
mod frame;
pub mod replacer;
mod stats;

pub use buffer_pool_manager::BufferPoolManager;
pub use frame::{Frame, PageRef};
pub use stats::{BufferPoolStats, StatsSnapshot};
