//! Eviction policy for the buffer pool.
//!
//! - [`LruReplacer`] - strict least-recently-used over an index-linked arena

mod lru;

pub use lru::LruReplacer;
