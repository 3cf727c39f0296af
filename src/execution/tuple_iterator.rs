//! In-memory operator over a fixed list of tuples.

use std::sync::Arc;

use crate::common::Result;
use crate::tuple::{Tuple, TupleDesc};

use super::{Cursor, OpIterator};

/// Replays a vector of tuples. Used for aggregate results and as a leaf in
/// tests.
pub struct TupleIterator {
    schema: Arc<TupleDesc>,
    tuples: Vec<Tuple>,
    pos: usize,
    cursor: Cursor,
}

impl TupleIterator {
    pub fn new(schema: Arc<TupleDesc>, tuples: Vec<Tuple>) -> Self {
        Self {
            schema,
            tuples,
            pos: 0,
            cursor: Cursor::default(),
        }
    }

    /// Number of tuples replayed per pass.
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }
}

impl OpIterator for TupleIterator {
    fn open(&mut self) -> Result<()> {
        self.pos = 0;
        self.cursor.open();
        Ok(())
    }

    fn close(&mut self) {
        self.cursor.close();
    }

    fn rewind(&mut self) -> Result<()> {
        self.cursor.ensure_open()?;
        self.pos = 0;
        self.cursor.rewind();
        Ok(())
    }

    fn schema(&self) -> &Arc<TupleDesc> {
        &self.schema
    }

    fn fetch_next(&mut self) -> Result<Option<Tuple>> {
        let next = self.tuples.get(self.pos).cloned();
        if next.is_some() {
            self.pos += 1;
        }
        Ok(next)
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
}
