//! Tuple model: field types, values, schemas and rows.
//!
//! - [`Type`] / [`Field`] - fixed-width column types and their values
//! - [`TupleDesc`] - an immutable schema
//! - [`Tuple`] - one row, optionally bound to a [`RecordId`](crate::common::RecordId)

mod field;
#[allow(clippy::module_inception)]
mod tuple;
mod tuple_desc;

pub use field::{Field, Type};
pub use tuple::Tuple;
pub use tuple_desc::{TdItem, TupleDesc};
