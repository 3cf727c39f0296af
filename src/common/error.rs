//! Error types for heapdb.

use thiserror::Error;

use super::{PageId, RecordId, TableId};

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in heapdb.
///
/// The variants fall into four groups:
/// - storage faults (I/O, bad pages, bad record locators)
/// - transaction aborts raised by the buffer pool
/// - iterator protocol misuse (`next` past the end, use before `open`)
/// - contract misuse at construction or field access time
///
/// Every kind propagates unchanged to the caller of the top-level
/// `open`/`next`; nothing is retried inside the kernel.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from disk operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested page lies past the end of its heap file.
    #[error("{0} not found")]
    PageNotFound(PageId),

    /// Fewer than `PAGE_SIZE` bytes were available at the page offset.
    #[error("short read for {page_id}: got {read} bytes")]
    ShortRead { page_id: PageId, read: usize },

    /// Invalid tuple or page state handed to the storage layer.
    #[error("storage error: {0}")]
    Storage(String),

    /// The buffer pool could not satisfy a page request.
    #[error("transaction aborted: {0}")]
    TransactionAborted(String),

    /// `next` was called with no element available.
    #[error("no more elements")]
    NoSuchElement,

    /// An iterator was used before `open` or after `close`.
    #[error("operator not open")]
    OperatorNotOpen,

    /// A tuple's schema does not match the schema it is used against.
    #[error("schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },

    /// Field index outside the schema.
    #[error("field index {index} out of range for {len} fields")]
    FieldIndexOutOfRange { index: usize, len: usize },

    /// No field with the given name.
    #[error("no field named {0:?}")]
    UnknownField(String),

    /// A field value of the wrong type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Aggregate operator not defined for the aggregated column's type.
    #[error("{op} is not supported over {field_type} columns")]
    UnsupportedAggregate {
        op: &'static str,
        field_type: &'static str,
    },

    /// Aggregate result does not fit in a 32-bit integer field.
    #[error("aggregate value {0} overflows an integer field")]
    AggregateOverflow(i64),

    /// No table registered under the given id.
    #[error("table {0} not found")]
    TableNotFound(TableId),

    /// No table registered under the given name.
    #[error("table {0:?} not found")]
    TableNameNotFound(String),

    /// Slot in a record locator is past the page's slot count.
    #[error("{0} does not address a slot on its page")]
    InvalidSlot(RecordId),

    /// Lock-manager entry point that has no implementation behind it.
    #[error("{0}: page locking is not enforced")]
    LockingNotEnforced(&'static str),
}

impl Error {
    /// Whether this error aborts the enclosing transaction scope.
    pub fn is_abort(&self) -> bool {
        matches!(self, Error::TransactionAborted(_))
    }

    /// Whether this error is a programming-contract violation of the
    /// iterator protocol rather than an environment failure.
    pub fn is_protocol_misuse(&self) -> bool {
        matches!(self, Error::NoSuchElement | Error::OperatorNotOpen)
    }

    /// Whether this error came from the storage layer.
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::PageNotFound(_)
                | Error::ShortRead { .. }
                | Error::Storage(_)
                | Error::InvalidSlot(_)
        )
    }
}
