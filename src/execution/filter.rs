//! Selection.

use std::sync::Arc;

use crate::common::Result;
use crate::tuple::{Tuple, TupleDesc};

use super::{Cursor, OpIterator, Predicate};

/// Passes through the child's tuples that satisfy a predicate.
pub struct Filter {
    predicate: Predicate,
    child: Box<dyn OpIterator>,
    cursor: Cursor,
}

impl Filter {
    pub fn new(predicate: Predicate, child: Box<dyn OpIterator>) -> Self {
        Self {
            predicate,
            child,
            cursor: Cursor::default(),
        }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl OpIterator for Filter {
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
        self.child.schema()
    }

    fn fetch_next(&mut self) -> Result<Option<Tuple>> {
        while self.child.has_next()? {
            let tuple = self.child.next()?;
            if self.predicate.filter(&tuple)? {
                return Ok(Some(tuple));
            }
        }
        Ok(None)
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
}
