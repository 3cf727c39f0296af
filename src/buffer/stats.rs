//! Page cache counters.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters maintained by the buffer pool.
///
/// All fields are atomic so they can be read without taking the pool lock.
/// `Ordering::Relaxed` is enough: no counter orders any other memory.
#[derive(Debug, Default)]
pub struct BufferPoolStats {
    /// `get` calls answered from a resident page.
    pub cache_hits: AtomicU64,

    /// `get` calls that had to read the page from its heap file.
    pub cache_misses: AtomicU64,

    /// Pages dropped to make room for another.
    pub evictions: AtomicU64,

    /// Pages read from disk.
    pub pages_read: AtomicU64,

    /// Pages written to disk by eviction or an explicit flush.
    pub pages_written: AtomicU64,

    /// Dirty victims whose write-back failed during eviction.
    pub flush_failures: AtomicU64,
}

impl BufferPoolStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the counters out for display or comparison.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            pages_read: self.pages_read.load(Ordering::Relaxed),
            pages_written: self.pages_written.load(Ordering::Relaxed),
            flush_failures: self.flush_failures.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        for counter in [
            &self.cache_hits,
            &self.cache_misses,
            &self.evictions,
            &self.pages_read,
            &self.pages_written,
            &self.flush_failures,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// A point-in-time copy of [`BufferPoolStats`].
///
/// # Example
/// ```
/// use heapdb::buffer::BufferPoolStats;
///
/// let stats = BufferPoolStats::new();
/// let snapshot = stats.snapshot();
/// assert_eq!(snapshot.hit_rate(), 0.0);
/// println!("{}", snapshot);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub evictions: u64,
    pub pages_read: u64,
    pub pages_written: u64,
    pub flush_failures: u64,
}

impl StatsSnapshot {
    /// Fraction of `get` calls served from the cache (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ hits: {}, misses: {}, evictions: {}, writes: {}, flush_failures: {}, hit_rate: {:.2}% }}",
            self.cache_hits,
            self.cache_misses,
            self.evictions,
            self.pages_written,
            self.flush_failures,
            self.hit_rate() * 100.0
        )
    }
}
