//! Comparison predicates.

use std::fmt;

use crate::common::Result;
use crate::tuple::{Field, Tuple};

/// Comparison operators understood by predicates, histograms and
/// [`Field::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Equals,
    GreaterThan,
    GreaterThanOrEq,
    LessThan,
    LessThanOrEq,
    /// Substring match for strings, equality for integers.
    Like,
    NotEquals,
}

impl CompareOp {
    pub const ALL: [CompareOp; 7] = [
        CompareOp::Equals,
        CompareOp::GreaterThan,
        CompareOp::GreaterThanOrEq,
        CompareOp::LessThan,
        CompareOp::LessThanOrEq,
        CompareOp::Like,
        CompareOp::NotEquals,
    ];
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareOp::Equals => "=",
            CompareOp::GreaterThan => ">",
            CompareOp::GreaterThanOrEq => ">=",
            CompareOp::LessThan => "<",
            CompareOp::LessThanOrEq => "<=",
            CompareOp::Like => "LIKE",
            CompareOp::NotEquals => "<>",
        };
        f.write_str(s)
    }
}

/// `tuple[field] <op> operand`.
///
/// # Example
/// ```
/// use heapdb::execution::{CompareOp, Predicate};
/// use heapdb::tuple::Field;
///
/// let p = Predicate::new(0, CompareOp::GreaterThan, Field::Int(3));
/// assert_eq!(p.to_string(), "$0 > 3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: usize,
    op: CompareOp,
    operand: Field,
}

impl Predicate {
    pub fn new(field: usize, op: CompareOp, operand: Field) -> Self {
        Self { field, op, operand }
    }

    #[inline]
    pub fn field(&self) -> usize {
        self.field
    }

    #[inline]
    pub fn op(&self) -> CompareOp {
        self.op
    }

    #[inline]
    pub fn operand(&self) -> &Field {
        &self.operand
    }

    /// Whether `tuple` satisfies the predicate.
    ///
    /// # Errors
    /// Fails if the field index is out of range or the operand's type
    /// differs from the field's.
    pub fn filter(&self, tuple: &Tuple) -> Result<bool> {
        tuple.field(self.field)?.compare(self.op, &self.operand)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${} {} {}", self.field, self.op, self.operand)
    }
}
