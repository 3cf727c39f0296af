//! Pull-based query operators.
//!
//! An operator tree is opened top-down; tuples flow bottom-up, one per
//! `next` call. Every operator implements a single primitive,
//! [`OpIterator::fetch_next`], and gets `has_next`/`next` from the trait.
//!
//! ```text
//!        Aggregate            open():  drains child into an Aggregator
//!            │
//!          Filter             fetch_next(): first child tuple passing the predicate
//!            │
//!         SeqScan             fetch_next(): next tuple of the heap file
//!            │
//!   BufferPoolManager ──▶ HeapFile
//! ```
//!
//! # State machine
//! `Closed → Open → Closed`. `has_next` on a closed operator returns
//! [`Error::OperatorNotOpen`]; `next` on a closed or exhausted operator
//! returns [`Error::NoSuchElement`]. `rewind` is only valid while open.

mod aggregate;
mod aggregator;
mod delete;
mod filter;
mod insert;
mod predicate;
mod seq_scan;
mod tuple_iterator;

use std::sync::Arc;

use crate::common::{Error, Result};
use crate::tuple::{Field, Tuple, TupleDesc, Type};

pub use aggregate::Aggregate;
pub use aggregator::{AggregateOp, Aggregator};
pub use delete::Delete;
pub use filter::Filter;
pub use insert::Insert;
pub use predicate::{CompareOp, Predicate};
pub use seq_scan::SeqScan;
pub use tuple_iterator::TupleIterator;

/// Open/peek state shared by every operator.
///
/// Holds at most one tuple fetched by `has_next` and not yet returned by
/// `next`.
#[derive(Debug, Default)]
pub struct Cursor {
    open: bool,
    peeked: Option<Tuple>,
}

impl Cursor {
    /// Mark the operator open with nothing buffered.
    pub fn open(&mut self) {
        self.open = true;
        self.peeked = None;
    }

    /// Mark the operator closed, dropping any buffered tuple.
    pub fn close(&mut self) {
        self.open = false;
        self.peeked = None;
    }

    /// Drop any buffered tuple.
    pub fn rewind(&mut self) {
        self.peeked = None;
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// `Err(OperatorNotOpen)` unless open.
    pub fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(Error::OperatorNotOpen)
        }
    }
}

/// Progress of a mutating operator. `rewind` never resets it: an Insert or
/// Delete reports its count once per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum OneShot {
    #[default]
    NotStarted,
    Done,
}

/// The single-field `Count` schema returned by Insert and Delete.
fn count_schema() -> Arc<TupleDesc> {
    Arc::new(TupleDesc::new(&[Type::Int], &["Count"]))
}

fn count_tuple(schema: &Arc<TupleDesc>, count: u64) -> Result<Tuple> {
    let count = i32::try_from(count).map_err(|_| Error::AggregateOverflow(count as i64))?;
    Tuple::new(schema.clone(), vec![Field::Int(count)])
}

/// A node in an operator tree.
///
/// Implementors provide lifecycle methods and [`fetch_next`]; callers use
/// [`has_next`] and [`next`].
///
/// [`fetch_next`]: OpIterator::fetch_next
/// [`has_next`]: OpIterator::has_next
/// [`next`]: OpIterator::next
pub trait OpIterator {
    /// Open children, then this operator.
    fn open(&mut self) -> Result<()>;

    /// Close this operator and its children.
    fn close(&mut self);

    /// Restart from the first tuple without closing ancestors.
    fn rewind(&mut self) -> Result<()>;

    /// Schema of the tuples this operator produces.
    fn schema(&self) -> &Arc<TupleDesc>;

    /// The next output tuple, or `None` at end of stream.
    ///
    /// Only called while open.
    fn fetch_next(&mut self) -> Result<Option<Tuple>>;

    /// The operator's cursor.
    fn cursor_mut(&mut self) -> &mut Cursor;

    /// Whether `next` would return a tuple.
    ///
    /// # Errors
    /// `Error::OperatorNotOpen` if the operator is closed, plus any error
    /// from fetching.
    fn has_next(&mut self) -> Result<bool> {
        self.cursor_mut().ensure_open()?;
        if self.cursor_mut().peeked.is_none() {
            let fetched = self.fetch_next()?;
            self.cursor_mut().peeked = fetched;
        }
        Ok(self.cursor_mut().peeked.is_some())
    }

    /// The next output tuple.
    ///
    /// # Errors
    /// `Error::NoSuchElement` if the operator is closed or exhausted.
    fn next(&mut self) -> Result<Tuple> {
        if !self.cursor_mut().is_open() || !self.has_next()? {
            return Err(Error::NoSuchElement);
        }
        self.cursor_mut().peeked.take().ok_or(Error::NoSuchElement)
    }
}

/// Drain `op` into a vector. The operator must be open.
pub fn collect_all(op: &mut dyn OpIterator) -> Result<Vec<Tuple>> {
    let mut out = Vec::new();
    while op.has_next()? {
        out.push(op.next()?);
    }
    Ok(out)
}
