//! A single row.

use std::fmt;
use std::sync::Arc;

use crate::common::{Error, RecordId, Result};

use super::{Field, TupleDesc};

/// One schema-conformant row plus an optional record locator.
///
/// The locator is `None` until the tuple is read from or written to a
/// heap page.
#[derive(Debug, Clone)]
pub struct Tuple {
    schema: Arc<TupleDesc>,
    fields: Vec<Field>,
    record_id: Option<RecordId>,
}

impl Tuple {
    /// Build a tuple, checking that `fields` conforms to `schema`.
    ///
    /// # Errors
    /// - `Error::SchemaMismatch` if the field count differs
    /// - `Error::TypeMismatch` if any field has the wrong type
    pub fn new(schema: Arc<TupleDesc>, fields: Vec<Field>) -> Result<Self> {
        if fields.len() != schema.num_fields() {
            return Err(Error::SchemaMismatch {
                expected: schema.to_string(),
                found: format!("{} fields", fields.len()),
            });
        }
        for (item, field) in schema.iter().zip(fields.iter()) {
            if item.field_type != field.field_type() {
                return Err(Error::TypeMismatch {
                    expected: item.field_type.name(),
                    found: field.field_type().name(),
                });
            }
        }
        Ok(Self {
            schema,
            fields,
            record_id: None,
        })
    }

    /// Decode a tuple from its on-disk bytes.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than `schema.byte_size()`.
    pub fn parse(schema: Arc<TupleDesc>, bytes: &[u8]) -> Self {
        let mut offset = 0;
        let fields = schema
            .iter()
            .map(|item| {
                let field = item.field_type.parse(&bytes[offset..]);
                offset += item.field_type.byte_len();
                field
            })
            .collect();
        Self {
            schema,
            fields,
            record_id: None,
        }
    }

    /// Encode into `out`, which must be `schema().byte_size()` bytes long.
    pub fn serialize(&self, out: &mut [u8]) {
        let mut offset = 0;
        for field in &self.fields {
            let len = field.field_type().byte_len();
            field.serialize(&mut out[offset..offset + len]);
            offset += len;
        }
    }

    /// The tuple's schema.
    #[inline]
    pub fn schema(&self) -> &Arc<TupleDesc> {
        &self.schema
    }

    /// The `i`th field.
    pub fn field(&self, i: usize) -> Result<&Field> {
        self.fields.get(i).ok_or(Error::FieldIndexOutOfRange {
            index: i,
            len: self.fields.len(),
        })
    }

    /// All fields in schema order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Replace the `i`th field.
    pub fn set_field(&mut self, i: usize, field: Field) -> Result<()> {
        let expected = self.schema.field_type(i)?;
        if expected != field.field_type() {
            return Err(Error::TypeMismatch {
                expected: expected.name(),
                found: field.field_type().name(),
            });
        }
        self.fields[i] = field;
        Ok(())
    }

    /// Where this tuple lives on disk, if anywhere.
    #[inline]
    pub fn record_id(&self) -> Option<RecordId> {
        self.record_id
    }

    /// Bind or clear the record locator.
    pub fn set_record_id(&mut self, record_id: Option<RecordId>) {
        self.record_id = record_id;
    }

    /// Rebind the tuple to an equal schema with different field names.
    pub(crate) fn with_schema(mut self, schema: Arc<TupleDesc>) -> Self {
        debug_assert!(*schema == *self.schema);
        self.schema = schema;
        self
    }
}

impl PartialEq for Tuple {
    /// Tuples compare by value; schemas and record locators are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "\t")?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}
