//! Insertion.

use std::sync::Arc;

use log::debug;

use crate::buffer::BufferPoolManager;
use crate::common::{Error, Result, TableId};
use crate::concurrency::TransactionId;
use crate::tuple::{Tuple, TupleDesc};

use super::{count_schema, count_tuple, Cursor, OneShot, OpIterator};

/// Inserts every child tuple into a table and yields one `Count` tuple.
///
/// The child is drained on the first fetch. Every later fetch, including
/// after `rewind`, returns end of stream.
pub struct Insert {
    pool: Arc<BufferPoolManager>,
    txn: TransactionId,
    table_id: TableId,
    child: Box<dyn OpIterator>,
    schema: Arc<TupleDesc>,
    state: OneShot,
    cursor: Cursor,
}

impl Insert {
    /// # Errors
    /// - `Error::TableNotFound` if `table_id` is not in the catalog
    /// - `Error::SchemaMismatch` if the child's schema differs from the table's
    pub fn new(
        pool: Arc<BufferPoolManager>,
        txn: TransactionId,
        child: Box<dyn OpIterator>,
        table_id: TableId,
    ) -> Result<Self> {
        let table_schema = pool.catalog().schema(table_id)?;
        if **child.schema() != *table_schema {
            return Err(Error::SchemaMismatch {
                expected: table_schema.to_string(),
                found: child.schema().to_string(),
            });
        }

        Ok(Self {
            pool,
            txn,
            table_id,
            child,
            schema: count_schema(),
            state: OneShot::NotStarted,
            cursor: Cursor::default(),
        })
    }
}

impl OpIterator for Insert {
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
            let mut tuple = self.child.next()?;
            self.pool.insert_tuple(self.txn, self.table_id, &mut tuple)?;
            count += 1;
        }
        self.state = OneShot::Done;
        debug!("{} inserted {} tuples into {}", self.txn, count, self.table_id);

        count_tuple(&self.schema, count).map(Some)
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
}
