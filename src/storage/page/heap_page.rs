//! HeapPage - a slotted page of fixed-width tuples.

use std::sync::Arc;

use crate::common::{Error, PageId, RecordId, Result};
use crate::tuple::{Tuple, TupleDesc};

use super::page_header::SlotLayout;
use super::PageData;

/// A heap page: occupancy bitmap followed by fixed-width tuple slots.
///
/// The page keeps its on-disk image in place; inserts and deletes edit the
/// bitmap and slot bytes directly, so [`HeapPage::data`] is always the exact
/// byte image to persist. Unused slots are kept zeroed.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use heapdb::common::{PageId, TableId};
/// use heapdb::storage::page::{HeapPage, PageData};
/// use heapdb::tuple::{Field, Tuple, TupleDesc, Type};
///
/// let schema = Arc::new(TupleDesc::from_types(&[Type::Int]));
/// let pid = PageId::new(TableId(1), 0);
/// let mut page = HeapPage::new(pid, schema.clone(), PageData::new());
///
/// let mut t = Tuple::new(schema, vec![Field::Int(7)]).unwrap();
/// page.insert_tuple(&mut t).unwrap();
/// assert_eq!(t.record_id().unwrap().slot, 0);
/// assert_eq!(page.tuples().count(), 1);
/// ```
#[derive(Debug)]
pub struct HeapPage {
    id: PageId,
    schema: Arc<TupleDesc>,
    layout: SlotLayout,
    data: Box<PageData>,
}

impl HeapPage {
    /// Interpret `data` as a heap page for tuples of `schema`.
    pub fn new(id: PageId, schema: Arc<TupleDesc>, data: PageData) -> Self {
        let layout = SlotLayout::new(schema.byte_size());
        let mut data = Box::new(data);

        // Only occupied slots carry meaning; normalize the rest to zeros.
        let bytes = data.as_mut_slice();
        for slot in 0..layout.num_slots() {
            if !layout.is_slot_used(bytes, slot) {
                bytes[layout.slot_range(slot)].fill(0);
            }
        }
        let tail = layout.slot_range(layout.num_slots() - 1).end;
        bytes[tail..].fill(0);

        Self {
            id,
            schema,
            layout,
            data,
        }
    }

    /// The byte image of an empty page.
    pub fn create_empty_page_data() -> PageData {
        PageData::new()
    }

    /// This page's identifier.
    #[inline]
    pub fn id(&self) -> PageId {
        self.id
    }

    /// Schema of the tuples stored on this page.
    #[inline]
    pub fn schema(&self) -> &Arc<TupleDesc> {
        &self.schema
    }

    /// The page's on-disk image.
    #[inline]
    pub fn data(&self) -> &PageData {
        &self.data
    }

    /// Number of tuple slots on this page.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.layout.num_slots()
    }

    /// Number of free slots.
    pub fn empty_slot_count(&self) -> usize {
        self.num_slots() - self.layout.used_slots(self.data.as_slice())
    }

    /// Whether `slot` holds a tuple. Out-of-range slots are never used.
    pub fn is_slot_used(&self, slot: usize) -> bool {
        slot < self.num_slots() && self.layout.is_slot_used(self.data.as_slice(), slot)
    }

    /// Store `tuple` in the first free slot and bind its record locator.
    ///
    /// # Errors
    /// - `Error::SchemaMismatch` if the tuple's schema differs from the page's
    /// - `Error::Storage` if the page has no free slot
    pub fn insert_tuple(&mut self, tuple: &mut Tuple) -> Result<()> {
        if **tuple.schema() != *self.schema {
            return Err(Error::SchemaMismatch {
                expected: self.schema.to_string(),
                found: tuple.schema().to_string(),
            });
        }

        let slot = (0..self.num_slots())
            .find(|&slot| !self.layout.is_slot_used(self.data.as_slice(), slot))
            .ok_or_else(|| Error::Storage(format!("{} is full", self.id)))?;

        let range = self.layout.slot_range(slot);
        let bytes = self.data.as_mut_slice();
        tuple.serialize(&mut bytes[range]);
        self.layout.mark_slot(bytes, slot, true);

        tuple.set_record_id(Some(RecordId::new(self.id, slot)));
        Ok(())
    }

    /// Free the slot `tuple` occupies on this page.
    ///
    /// # Errors
    /// - `Error::Storage` if the tuple has no record locator, or it names
    ///   another page, or the slot is already empty
    /// - `Error::InvalidSlot` if the slot index is past the page's slots
    pub fn delete_tuple(&mut self, tuple: &Tuple) -> Result<()> {
        let rid = tuple
            .record_id()
            .ok_or_else(|| Error::Storage("tuple has no record id".to_string()))?;
        if rid.page_id != self.id {
            return Err(Error::Storage(format!("{} is not on {}", rid, self.id)));
        }
        if rid.slot >= self.num_slots() {
            return Err(Error::InvalidSlot(rid));
        }
        if !self.layout.is_slot_used(self.data.as_slice(), rid.slot) {
            return Err(Error::Storage(format!("{} is already empty", rid)));
        }

        let range = self.layout.slot_range(rid.slot);
        let bytes = self.data.as_mut_slice();
        bytes[range].fill(0);
        self.layout.mark_slot(bytes, rid.slot, false);
        Ok(())
    }

    /// The tuple in `slot`, if the slot is occupied.
    pub fn tuple_at(&self, slot: usize) -> Option<Tuple> {
        if !self.is_slot_used(slot) {
            return None;
        }
        let range = self.layout.slot_range(slot);
        let mut tuple = Tuple::parse(self.schema.clone(), &self.data.as_slice()[range]);
        tuple.set_record_id(Some(RecordId::new(self.id, slot)));
        Some(tuple)
    }

    /// Occupied tuples in ascending slot order, with record locators bound.
    pub fn tuples(&self) -> impl Iterator<Item = Tuple> + '_ {
        (0..self.num_slots()).filter_map(move |slot| self.tuple_at(slot))
    }
}
