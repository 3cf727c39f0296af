//! Grouped aggregation state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::common::{Error, Result};
use crate::tuple::{Field, TdItem, Tuple, TupleDesc, Type};

use super::TupleIterator;

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateOp {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateOp::Count => "COUNT",
            AggregateOp::Sum => "SUM",
            AggregateOp::Avg => "AVG",
            AggregateOp::Min => "MIN",
            AggregateOp::Max => "MAX",
        }
    }

    /// Whether the function is defined over columns of `field_type`.
    pub fn supports(&self, field_type: Type) -> bool {
        field_type == Type::Int || *self == AggregateOp::Count
    }

    fn seed(&self) -> i64 {
        match self {
            AggregateOp::Count | AggregateOp::Sum | AggregateOp::Avg => 0,
            AggregateOp::Min => i32::MAX as i64,
            AggregateOp::Max => i32::MIN as i64,
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy)]
struct GroupState {
    value: i64,
    count: i64,
}

/// Running per-group state for one aggregate over one column.
///
/// Groups are reported in the order they were first seen. Accumulators are
/// 64-bit; a result that does not fit an INT field is an error at
/// [`Aggregator::iterator`] time.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use heapdb::execution::{AggregateOp, Aggregator, OpIterator};
/// use heapdb::tuple::{Field, Tuple, TupleDesc, Type};
///
/// let schema = Arc::new(TupleDesc::new(&[Type::Int], &["x"]));
/// let mut agg = Aggregator::new(&schema, 0, None, AggregateOp::Sum).unwrap();
/// for v in [1, 2, 3] {
///     agg.merge_tuple(&Tuple::new(schema.clone(), vec![Field::Int(v)]).unwrap()).unwrap();
/// }
///
/// let mut results = agg.iterator().unwrap();
/// results.open().unwrap();
/// assert_eq!(results.next().unwrap().field(0).unwrap(), &Field::Int(6));
/// ```
#[derive(Debug)]
pub struct Aggregator {
    afield: usize,
    gfield: Option<usize>,
    op: AggregateOp,
    schema: Arc<TupleDesc>,
    index: HashMap<Option<Field>, usize>,
    groups: Vec<(Option<Field>, GroupState)>,
}

impl Aggregator {
    /// Aggregate `op` over column `afield` of `child`, grouped by `gfield`.
    ///
    /// # Errors
    /// - `Error::FieldIndexOutOfRange` if either field is not in `child`
    /// - `Error::UnsupportedAggregate` for anything but COUNT over a string
    ///   column
    pub fn new(child: &TupleDesc, afield: usize, gfield: Option<usize>, op: AggregateOp) -> Result<Self> {
        let atype = child.field_type(afield)?;
        if !op.supports(atype) {
            return Err(Error::UnsupportedAggregate {
                op: op.name(),
                field_type: atype.name(),
            });
        }

        let mut items = Vec::with_capacity(2);
        if let Some(g) = gfield {
            items.push(TdItem {
                field_type: child.field_type(g)?,
                name: child.field_name(g)?.to_string(),
            });
        }
        items.push(TdItem {
            field_type: Type::Int,
            name: format!("{} ({})", op, child.field_name(afield)?),
        });

        Ok(Self {
            afield,
            gfield,
            op,
            schema: Arc::new(TupleDesc::from_items(items)),
            index: HashMap::new(),
            groups: Vec::new(),
        })
    }

    /// Schema of the result tuples: the group column (if any), then the
    /// aggregate value.
    pub fn schema(&self) -> &Arc<TupleDesc> {
        &self.schema
    }

    /// Number of groups seen so far.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Fold `tuple` into its group.
    pub fn merge_tuple(&mut self, tuple: &Tuple) -> Result<()> {
        let key = match self.gfield {
            Some(g) => Some(tuple.field(g)?.clone()),
            None => None,
        };
        let value = match self.op {
            AggregateOp::Count => 0,
            _ => tuple.field(self.afield)?.as_int()? as i64,
        };

        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.groups.push((
                    key.clone(),
                    GroupState {
                        value: self.op.seed(),
                        count: 0,
                    },
                ));
                self.index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        let state = &mut self.groups[slot].1;
        match self.op {
            AggregateOp::Count => state.value += 1,
            AggregateOp::Sum => state.value += value,
            AggregateOp::Avg => {
                state.value += value;
                state.count += 1;
            }
            AggregateOp::Min => state.value = state.value.min(value),
            AggregateOp::Max => state.value = state.value.max(value),
        }
        Ok(())
    }

    /// Materialize one result tuple per group.
    ///
    /// AVG divides with truncation toward zero.
    ///
    /// # Errors
    /// `Error::AggregateOverflow` if a result does not fit in an INT.
    pub fn iterator(&self) -> Result<TupleIterator> {
        let mut tuples = Vec::with_capacity(self.groups.len());
        for (key, state) in &self.groups {
            let value = match self.op {
                AggregateOp::Avg => state.value / state.count.max(1),
                _ => state.value,
            };
            let value = i32::try_from(value).map_err(|_| Error::AggregateOverflow(value))?;

            let mut fields = Vec::with_capacity(2);
            if let Some(key) = key {
                fields.push(key.clone());
            }
            fields.push(Field::Int(value));
            tuples.push(Tuple::new(self.schema.clone(), fields)?);
        }
        Ok(TupleIterator::new(self.schema.clone(), tuples))
    }
}
