//! Deletion.

use std::sync::Arc;

use log::debug;

use crate::buffer::BufferPoolManager;
use crate::common::Result;
use crate::concurrency::TransactionId;
use crate::tuple::{Tuple, TupleDesc};

use super::{count_schema, count_tuple, Cursor, OneShot, OpIterator};

/// Deletes every child tuple from the page its record locator names and
/// yields one `Count` tuple.
///
/// Same one-shot behavior as [`Insert`](super::Insert).
pub struct Delete {
    pool: Arc<BufferPoolManager>,
    txn: TransactionId,
    child: Box<dyn OpIterator>,
    schema: Arc<TupleDesc>,
    state: OneShot,
    cursor: Cursor,
}

impl Delete {
    pub fn new(pool: Arc<BufferPoolManager>, txn: TransactionId, child: Box<dyn OpIterator>) -> Self {
        Self {
            pool,
            txn,
            child,
            schema: count_schema(),
            state: OneShot::NotStarted,
            cursor: Cursor::default(),
        }
    }
}

impl OpIterator for Delete {
    fn open(&mut self) -> Result<()> {
        self.child.open()?;
        self.cursor.open();
        Ok(())
    }

    fn close(&mut self) {
        self.child.close();
        self.cursor.close();
    }

    fn rewind(&mut self) -> Result<()> {
        self.cursor.ensure_open()?;
        self.child.rewind()?;
        self.cursor.rewind();
        Ok(())
    }

    fn schema(&self) -> &Arc<TupleDesc> {
        &self.schema
    }

    fn fetch_next(&mut self) -> Result<Option<Tuple>> {
        if self.state == OneShot::Done {
            return Ok(None);
        }

        let mut count = 0u64;
        while self.child.has_next()? {
            let tuple = self.child.next()?;
            self.pool.delete_tuple(self.txn, &tuple)?;
            count += 1;
        }
        self.state = OneShot::Done;
        debug!("{} deleted {} tuples", self.txn, count);

        count_tuple(&self.schema, count).map(Some)
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
}
