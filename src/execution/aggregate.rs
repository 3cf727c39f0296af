//! Aggregation operator.

use std::sync::Arc;

use log::debug;

use crate::common::Result;
use crate::tuple::{Tuple, TupleDesc};

use super::{AggregateOp, Aggregator, Cursor, OpIterator, TupleIterator};

/// Computes one aggregate over its child, optionally grouped by one column.
///
/// `open` drains the child into a fresh [`Aggregator`]; tuples are then
/// served from the materialized result. `rewind` replays the result without
/// re-reading the child.
pub struct Aggregate {
    child: Box<dyn OpIterator>,
    afield: usize,
    gfield: Option<usize>,
    op: AggregateOp,
    schema: Arc<TupleDesc>,
    results: Option<TupleIterator>,
    cursor: Cursor,
}

impl Aggregate {
    /// # Errors
    /// Same as [`Aggregator::new`] over the child's schema.
    pub fn new(
        child: Box<dyn OpIterator>,
        afield: usize,
        gfield: Option<usize>,
        op: AggregateOp,
    ) -> Result<Self> {
        let schema = Aggregator::new(child.schema(), afield, gfield, op)?
            .schema()
            .clone();
        Ok(Self {
            child,
            afield,
            gfield,
            op,
            schema,
            results: None,
            cursor: Cursor::default(),
        })
    }

    /// Index of the grouping column in the child, if grouping.
    pub fn group_field(&self) -> Option<usize> {
        self.gfield
    }

    /// Name of the grouping column in the child, if grouping.
    pub fn group_field_name(&self) -> Option<&str> {
        self.gfield
            .and_then(|g| self.child.schema().field_name(g).ok())
    }

    pub fn aggregate_field(&self) -> usize {
        self.afield
    }

    /// Name of the aggregated column in the child.
    pub fn aggregate_field_name(&self) -> Result<&str> {
        self.child.schema().field_name(self.afield)
    }

    pub fn aggregate_op(&self) -> AggregateOp {
        self.op
    }
}

impl OpIterator for Aggregate {
    fn open(&mut self) -> Result<()> {
        self.child.open()?;

        let mut aggregator = Aggregator::new(self.child.schema(), self.afield, self.gfield, self.op)?;
        while self.child.has_next()? {
            aggregator.merge_tuple(&self.child.next()?)?;
        }
        debug!("{} over {} groups", self.op, aggregator.group_count());

        let mut results = aggregator.iterator()?;
        results.open()?;
        self.results = Some(results);
        self.cursor.open();
        Ok(())
    }

    fn close(&mut self) {
        self.child.close();
        self.results = None;
        self.cursor.close();
    }

    fn rewind(&mut self) -> Result<()> {
        self.cursor.ensure_open()?;
        if let Some(results) = self.results.as_mut() {
            results.rewind()?;
        }
        self.cursor.rewind();
        Ok(())
    }

    fn schema(&self) -> &Arc<TupleDesc> {
        &self.schema
    }

    fn fetch_next(&mut self) -> Result<Option<Tuple>> {
        let Some(results) = self.results.as_mut() else {
            return Ok(None);
        };
        if results.has_next()? {
            results.next().map(Some)
        } else {
            Ok(None)
        }
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
}
