//! Page types and layout.
//!
//! This module contains:
//! - [`PageData`] - The raw 4KB data container
//! - [`SlotLayout`] - Occupancy bitmap and slot geometry
//! - [`HeapPage`] - A slotted page of fixed-width tuples

mod heap_page;
#[allow(clippy::module_inception)]
mod page;
mod page_header;

pub use heap_page::HeapPage;
pub use page::PageData;
pub use page_header::SlotLayout;
