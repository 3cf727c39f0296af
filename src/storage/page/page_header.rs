//! Slot layout and the occupancy bitmap at the start of every heap page.
//!
//! # Layout
//! ```text
//! ┌────────────────────────┬────────┬────────┬─────┬──────────────┐
//! │ bitmap: ceil(N/8) bytes│ slot 0 │ slot 1 │ ... │ slot N-1     │
//! └────────────────────────┴────────┴────────┴─────┴──────────────┘
//! N = floor(8 × PAGE_SIZE / (8 × tuple_size + 1))
//! ```
//!
//! Slot `i` is occupied iff bit `i % 8` (least significant first) of
//! bitmap byte `i / 8` is set. Any bytes after the last slot are zero.

use crate::common::config::PAGE_SIZE;

/// Geometry of a heap page holding fixed-width tuples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    tuple_size: usize,
    num_slots: usize,
}

impl SlotLayout {
    /// Layout for tuples of `tuple_size` bytes.
    ///
    /// Each slot costs `tuple_size` bytes plus one header bit.
    ///
    /// # Panics
    /// Panics if `tuple_size` is 0 or too large for a single slot.
    pub fn new(tuple_size: usize) -> Self {
        assert!(tuple_size > 0, "tuple_size must be > 0");
        let num_slots = Self::slots_for(tuple_size);
        assert!(num_slots > 0, "tuple of {} bytes does not fit a page", tuple_size);
        Self {
            tuple_size,
            num_slots,
        }
    }

    /// Whether a page can hold at least one tuple of `tuple_size` bytes.
    pub fn fits(tuple_size: usize) -> bool {
        tuple_size > 0 && Self::slots_for(tuple_size) > 0
    }

    fn slots_for(tuple_size: usize) -> usize {
        (PAGE_SIZE * 8) / (tuple_size * 8 + 1)
    }

    /// Number of tuple slots per page.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Size in bytes of the occupancy bitmap.
    #[inline]
    pub fn header_len(&self) -> usize {
        self.num_slots.div_ceil(8)
    }

    /// Size in bytes of one slot.
    #[inline]
    pub fn tuple_size(&self) -> usize {
        self.tuple_size
    }

    /// Byte range of slot `slot` within the page.
    #[inline]
    pub fn slot_range(&self, slot: usize) -> std::ops::Range<usize> {
        let start = self.header_len() + slot * self.tuple_size;
        start..start + self.tuple_size
    }

    /// Whether `slot` is marked occupied in `page`'s bitmap.
    #[inline]
    pub fn is_slot_used(&self, page: &[u8], slot: usize) -> bool {
        page[slot / 8] & (1 << (slot % 8)) != 0
    }

    /// Set or clear the occupancy bit for `slot` in `page`.
    #[inline]
    pub fn mark_slot(&self, page: &mut [u8], slot: usize, used: bool) {
        if used {
            page[slot / 8] |= 1 << (slot % 8);
        } else {
            page[slot / 8] &= !(1 << (slot % 8));
        }
    }

    /// Number of occupied slots in `page`.
    pub fn used_slots(&self, page: &[u8]) -> usize {
        (0..self.num_slots)
            .filter(|&slot| self.is_slot_used(page, slot))
            .count()
    }
}
