//! Configuration constants for heapdb.

/// Size of a page in bytes (4KB).
///
/// Every heap file is a contiguous run of pages of exactly this size, with
/// no file header, footer or checksum. Page `N` lives at byte offset
/// `N × PAGE_SIZE`.
pub const PAGE_SIZE: usize = 4096;

/// Default number of pages the buffer pool caches.
pub const DEFAULT_POOL_PAGES: usize = 50;

/// Maximum number of bytes a string field stores on disk.
///
/// A string field occupies `4 + STRING_LEN` bytes: a big-endian length
/// prefix followed by the zero-padded bytes.
pub const STRING_LEN: usize = 128;

/// Number of buckets in every per-column histogram built by table statistics.
pub const NUM_HIST_BINS: usize = 100;

/// Default cost of reading one page, used by scan cost estimates.
pub const IO_COST_PER_PAGE: u32 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_power_of_two() {
        assert!(PAGE_SIZE.is_power_of_two());
        assert_eq!(PAGE_SIZE, 4096);
    }

    #[test]
    fn test_string_field_fits_in_page() {
        // A single-string tuple must leave room for at least one slot.
        assert!(4 + STRING_LEN < PAGE_SIZE);
    }
}
