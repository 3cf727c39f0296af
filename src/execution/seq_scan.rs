//! Sequential scan over one table.

use std::sync::Arc;

use log::debug;

use crate::buffer::BufferPoolManager;
use crate::common::{Result, TableId};
use crate::concurrency::TransactionId;
use crate::storage::DbFileIterator;
use crate::tuple::{Tuple, TupleDesc};

use super::{Cursor, OpIterator};

/// Leaf operator: every tuple of a table, in page then slot order.
///
/// Output fields are renamed `<alias>.<field>`; the alias defaults to the
/// table's catalog name.
pub struct SeqScan {
    table_id: TableId,
    alias: String,
    schema: Arc<TupleDesc>,
    iter: DbFileIterator,
    cursor: Cursor,
}

impl SeqScan {
    /// Scan `table_id` on behalf of `txn`.
    ///
    /// # Errors
    /// `Error::TableNotFound` if the table is not in the pool's catalog.
    pub fn new(
        pool: Arc<BufferPoolManager>,
        txn: TransactionId,
        table_id: TableId,
        alias: Option<&str>,
    ) -> Result<Self> {
        let catalog = pool.catalog().clone();
        let file = catalog.file(table_id)?;
        let alias = match alias {
            Some(alias) => alias.to_string(),
            None => catalog.table_name(table_id)?,
        };
        let schema = Arc::new(file.schema().with_prefix(&alias));

        Ok(Self {
            table_id,
            alias,
            schema,
            iter: DbFileIterator::new(file, pool, txn),
            cursor: Cursor::default(),
        })
    }

    #[inline]
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// The prefix applied to output field names.
    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl OpIterator for SeqScan {
    fn open(&mut self) -> Result<()> {
        debug!("opening scan of {} as {:?}", self.table_id, self.alias);
        self.iter.open()?;
        self.cursor.open();
        Ok(())
    }

    fn close(&mut self) {
        self.iter.close();
        self.cursor.close();
    }

    fn rewind(&mut self) -> Result<()> {
        self.cursor.ensure_open()?;
        self.iter.rewind()?;
        self.cursor.rewind();
        Ok(())
    }

    fn schema(&self) -> &Arc<TupleDesc> {
        &self.schema
    }

    fn fetch_next(&mut self) -> Result<Option<Tuple>> {
        if !self.iter.has_next()? {
            return Ok(None);
        }
        let tuple = self.iter.next()?;
        Ok(Some(tuple.with_schema(self.schema.clone())))
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
}
