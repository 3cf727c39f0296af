//! Histogram over a string column.

use std::fmt;

use crate::execution::CompareOp;

use super::IntHistogram;

/// Approximates strings by their first four bytes.
///
/// A string maps to the big-endian integer formed by its first four UTF-8
/// bytes (missing bytes are zero), clamped to the codes of `""` and
/// `"zzzz"`. Estimates are those of an [`IntHistogram`] over that range, so
/// ordering predicates follow byte order of the prefix.
#[derive(Debug, Clone)]
pub struct StringHistogram {
    inner: IntHistogram,
}

impl StringHistogram {
    pub fn new(buckets: usize) -> Self {
        Self {
            inner: IntHistogram::new(buckets, Self::min_code(), Self::max_code()),
        }
    }

    /// Integer code of `s`.
    pub fn string_to_int(s: &str) -> i32 {
        let mut code: i64 = 0;
        for i in 0..4 {
            let byte = s.as_bytes().get(i).copied().unwrap_or(0);
            code = (code << 8) | byte as i64;
        }
        code.clamp(Self::min_code() as i64, Self::max_code() as i64) as i32
    }

    pub fn add_value(&mut self, s: &str) {
        self.inner.add_value(Self::string_to_int(s));
    }

    /// Estimated fraction of the added strings satisfying `value op s`.
    pub fn estimate_selectivity(&self, op: CompareOp, s: &str) -> f64 {
        self.inner.estimate_selectivity(op, Self::string_to_int(s))
    }

    /// Number of strings added so far.
    pub fn total(&self) -> u64 {
        self.inner.total()
    }

    fn min_code() -> i32 {
        0
    }

    fn max_code() -> i32 {
        i32::from_be_bytes(*b"zzzz")
    }
}

impl fmt::Display for StringHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringHistogram({})", self.inner)
    }
}
