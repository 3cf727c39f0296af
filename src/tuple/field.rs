//! Field types and values.
//!
//! # On-disk encoding
//! ```text
//! Int  : 4 bytes, big-endian two's complement
//! Str  : 4-byte big-endian length, then STRING_LEN bytes (zero padded)
//! ```

use std::fmt;

use crate::common::config::STRING_LEN;
use crate::common::{Error, Result};
use crate::execution::CompareOp;

/// Type of a field. Every type has a fixed on-disk width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Str,
}

impl Type {
    /// Number of bytes a field of this type occupies on disk.
    #[inline]
    pub const fn byte_len(&self) -> usize {
        match self {
            Type::Int => 4,
            Type::Str => STRING_LEN + 4,
        }
    }

    /// Human-readable type name.
    pub const fn name(&self) -> &'static str {
        match self {
            Type::Int => "INT_TYPE",
            Type::Str => "STRING_TYPE",
        }
    }

    /// Decode a field of this type from the start of `bytes`.
    ///
    /// # Panics
    /// Panics if `bytes.len() < self.byte_len()`.
    pub fn parse(&self, bytes: &[u8]) -> Field {
        match self {
            Type::Int => Field::Int(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
            Type::Str => {
                let declared = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
                let len = declared.min(STRING_LEN);
                Field::Str(String::from_utf8_lossy(&bytes[4..4 + len]).into_owned())
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Int(i32),
    Str(String),
}

impl Field {
    /// The type of this value.
    pub fn field_type(&self) -> Type {
        match self {
            Field::Int(_) => Type::Int,
            Field::Str(_) => Type::Str,
        }
    }

    /// The integer value, if this is an integer field.
    pub fn as_int(&self) -> Result<i32> {
        match self {
            Field::Int(v) => Ok(*v),
            Field::Str(_) => Err(Error::TypeMismatch {
                expected: Type::Int.name(),
                found: Type::Str.name(),
            }),
        }
    }

    /// The string value, if this is a string field.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Field::Str(s) => Ok(s),
            Field::Int(_) => Err(Error::TypeMismatch {
                expected: Type::Str.name(),
                found: Type::Int.name(),
            }),
        }
    }

    /// Encode into `out`, which must be exactly `self.field_type().byte_len()` bytes.
    ///
    /// Strings longer than `STRING_LEN` bytes are truncated at the last
    /// character boundary that fits.
    pub fn serialize(&self, out: &mut [u8]) {
        match self {
            Field::Int(v) => out[..4].copy_from_slice(&v.to_be_bytes()),
            Field::Str(s) => {
                let mut len = s.len().min(STRING_LEN);
                while !s.is_char_boundary(len) {
                    len -= 1;
                }
                out[..4].copy_from_slice(&(len as u32).to_be_bytes());
                out[4..4 + len].copy_from_slice(&s.as_bytes()[..len]);
                out[4 + len..Type::Str.byte_len()].fill(0);
            }
        }
    }

    /// Evaluate `self op other`.
    ///
    /// `Like` is equality for integers and substring containment for strings.
    ///
    /// # Errors
    /// `Error::TypeMismatch` if the two values have different types.
    pub fn compare(&self, op: CompareOp, other: &Field) -> Result<bool> {
        match (self, other) {
            (Field::Int(a), Field::Int(b)) => Ok(match op {
                CompareOp::Equals | CompareOp::Like => a == b,
                CompareOp::NotEquals => a != b,
                CompareOp::GreaterThan => a > b,
                CompareOp::GreaterThanOrEq => a >= b,
                CompareOp::LessThan => a < b,
                CompareOp::LessThanOrEq => a <= b,
            }),
            (Field::Str(a), Field::Str(b)) => Ok(match op {
                CompareOp::Equals => a == b,
                CompareOp::NotEquals => a != b,
                CompareOp::GreaterThan => a > b,
                CompareOp::GreaterThanOrEq => a >= b,
                CompareOp::LessThan => a < b,
                CompareOp::LessThanOrEq => a <= b,
                CompareOp::Like => a.contains(b.as_str()),
            }),
            _ => Err(Error::TypeMismatch {
                expected: self.field_type().name(),
                found: other.field_type().name(),
            }),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Int(v) => write!(f, "{}", v),
            Field::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for Field {
    fn from(v: i32) -> Self {
        Field::Int(v)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Str(s.to_string())
    }
}
