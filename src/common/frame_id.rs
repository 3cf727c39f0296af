//! Frame identifier type.

use std::fmt;

/// Identifies a cache entry in the buffer pool's frame arena.
///
/// Frame ids are stable for as long as the entry is resident, so the
/// recency list links entries by `FrameId` instead of by pointer:
/// `frames[frame_id.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub usize);

impl FrameId {
    /// Create a new FrameId.
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}
