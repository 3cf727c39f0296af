//! LRU (Least Recently Used) replacement policy.
//!
//! Recency is a doubly-linked list threaded through an arena indexed by
//! [`FrameId`]. Links are indices, not pointers, so promotion and eviction
//! are O(1) relinks with no aliasing.
//!
//! ```text
//!  head (MRU)                                  tail (LRU)
//!     │                                            │
//!     ▼                                            ▼
//!  ┌──────┐ next ┌──────┐ next ┌──────┐ next ┌──────┐
//!  │ F3   │─────▶│ F0   │─────▶│ F7   │─────▶│ F1   │──▶ None
//!  └──────┘◀─────└──────┘◀─────└──────┘◀─────└──────┘
//!            prev          prev          prev
//! ```

use crate::common::FrameId;

#[derive(Debug, Clone, Copy, Default)]
struct Link {
    prev: Option<FrameId>,
    next: Option<FrameId>,
    linked: bool,
}

/// Strict LRU over every tracked frame.
///
/// There are no pins: every tracked frame is an eviction candidate.
///
/// # Example
/// ```
/// use heapdb::buffer::replacer::LruReplacer;
/// use heapdb::common::FrameId;
///
/// let mut lru = LruReplacer::new(3);
/// lru.record_access(FrameId(0));
/// lru.record_access(FrameId(1));
/// lru.record_access(FrameId(0));
/// assert_eq!(lru.evict(), Some(FrameId(1)));
/// ```
#[derive(Debug)]
pub struct LruReplacer {
    links: Vec<Link>,
    head: Option<FrameId>,
    tail: Option<FrameId>,
    size: usize,
}

impl LruReplacer {
    /// Create a replacer able to track frames `0..capacity`.
    ///
    /// The arena grows if a larger frame id is recorded.
    pub fn new(capacity: usize) -> Self {
        Self {
            links: vec![Link::default(); capacity],
            head: None,
            tail: None,
            size: 0,
        }
    }

    /// Make `frame_id` the most recently used frame, tracking it if needed.
    pub fn record_access(&mut self, frame_id: FrameId) {
        if frame_id.0 >= self.links.len() {
            self.links.resize(frame_id.0 + 1, Link::default());
        }
        if self.links[frame_id.0].linked {
            if self.head == Some(frame_id) {
                return;
            }
            self.unlink(frame_id);
        }
        self.push_front(frame_id);
    }

    /// Remove and return the least recently used frame.
    pub fn evict(&mut self) -> Option<FrameId> {
        let victim = self.tail?;
        self.unlink(victim);
        Some(victim)
    }

    /// Stop tracking `frame_id`. No-op if it is not tracked.
    pub fn remove(&mut self, frame_id: FrameId) {
        if self.contains(frame_id) {
            self.unlink(frame_id);
        }
    }

    /// Whether `frame_id` is tracked.
    #[inline]
    pub fn contains(&self, frame_id: FrameId) -> bool {
        self.links.get(frame_id.0).is_some_and(|link| link.linked)
    }

    /// Number of tracked frames.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tracked frames from most to least recently used.
    pub fn iter_mru(&self) -> impl Iterator<Item = FrameId> + '_ {
        std::iter::successors(self.head, move |id| self.links[id.0].next)
    }

    fn push_front(&mut self, frame_id: FrameId) {
        let old_head = self.head;
        self.links[frame_id.0] = Link {
            prev: None,
            next: old_head,
            linked: true,
        };
        match old_head {
            Some(h) => self.links[h.0].prev = Some(frame_id),
            None => self.tail = Some(frame_id),
        }
        self.head = Some(frame_id);
        self.size += 1;
    }

    fn unlink(&mut self, frame_id: FrameId) {
        let Link { prev, next, .. } = self.links[frame_id.0];
        match prev {
            Some(p) => self.links[p.0].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.links[n.0].prev = prev,
            None => self.tail = prev,
        }
        self.links[frame_id.0] = Link::default();
        self.size -= 1;
    }
}
