//! Tuple schema.

use std::fmt;

use crate::common::{Error, Result};

use super::Type;

/// One (type, name) column of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TdItem {
    pub field_type: Type,
    pub name: String,
}

impl fmt::Display for TdItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.field_type, self.name)
    }
}

/// Ordered, immutable sequence of typed, named fields.
///
/// Two schemas are equal iff they have the same number of fields and the
/// same type at every position; field names are ignored.
///
/// # Example
/// ```
/// use heapdb::tuple::{TupleDesc, Type};
///
/// let td = TupleDesc::new(&[Type::Int, Type::Str], &["id", "name"]);
/// assert_eq!(td.num_fields(), 2);
/// assert_eq!(td.byte_size(), 4 + 132);
/// assert_eq!(td.index_of("name").unwrap(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TupleDesc {
    items: Vec<TdItem>,
}

impl TupleDesc {
    /// Create a schema from parallel type and name slices.
    ///
    /// Missing trailing names become empty strings; extra names are ignored.
    ///
    /// # Panics
    /// Panics if `types` is empty.
    pub fn new(types: &[Type], names: &[&str]) -> Self {
        assert!(!types.is_empty(), "a schema needs at least one field");
        let items = types
            .iter()
            .enumerate()
            .map(|(i, &field_type)| TdItem {
                field_type,
                name: names.get(i).map(|n| n.to_string()).unwrap_or_default(),
            })
            .collect();
        Self { items }
    }

    /// Create a schema of anonymous fields.
    pub fn from_types(types: &[Type]) -> Self {
        Self::new(types, &[])
    }

    /// Create a schema from owned items.
    ///
    /// # Panics
    /// Panics if `items` is empty.
    pub fn from_items(items: Vec<TdItem>) -> Self {
        assert!(!items.is_empty(), "a schema needs at least one field");
        Self { items }
    }

    /// Concatenate two schemas: all of `a`'s fields, then all of `b`'s.
    pub fn merge(a: &TupleDesc, b: &TupleDesc) -> TupleDesc {
        let items = a.items.iter().chain(b.items.iter()).cloned().collect();
        TupleDesc { items }
    }

    /// Number of fields.
    #[inline]
    pub fn num_fields(&self) -> usize {
        self.items.len()
    }

    /// Name of the `i`th field.
    pub fn field_name(&self, i: usize) -> Result<&str> {
        self.item(i).map(|item| item.name.as_str())
    }

    /// Type of the `i`th field.
    pub fn field_type(&self, i: usize) -> Result<Type> {
        self.item(i).map(|item| item.field_type)
    }

    /// Index of the first field called `name`.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.name == name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))
    }

    /// Size in bytes of one tuple with this schema.
    pub fn byte_size(&self) -> usize {
        self.items.iter().map(|item| item.field_type.byte_len()).sum()
    }

    /// Iterate over the schema's columns.
    pub fn iter(&self) -> impl Iterator<Item = &TdItem> {
        self.items.iter()
    }

    /// A copy of this schema with every field renamed to `prefix.name`.
    pub fn with_prefix(&self, prefix: &str) -> TupleDesc {
        let items = self
            .items
            .iter()
            .map(|item| TdItem {
                field_type: item.field_type,
                name: format!("{}.{}", prefix, item.name),
            })
            .collect();
        TupleDesc { items }
    }

    fn item(&self, i: usize) -> Result<&TdItem> {
        self.items.get(i).ok_or(Error::FieldIndexOutOfRange {
            index: i,
            len: self.items.len(),
        })
    }
}

impl PartialEq for TupleDesc {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(other.items.iter())
                .all(|(a, b)| a.field_type == b.field_type)
    }
}

impl Eq for TupleDesc {}

impl fmt::Display for TupleDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}
