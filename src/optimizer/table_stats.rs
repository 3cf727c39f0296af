//! Per-table statistics for cost-based planning.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::buffer::BufferPoolManager;
use crate::common::config::{IO_COST_PER_PAGE, NUM_HIST_BINS};
use crate::common::{Error, Result, TableId};
use crate::concurrency::TransactionId;
use crate::execution::CompareOp;
use crate::storage::DbFileIterator;
use crate::tuple::{Field, Type};

use super::{IntHistogram, StringHistogram};

#[derive(Debug, Clone)]
enum ColumnHistogram {
    Int(IntHistogram),
    Str(StringHistogram),
}

/// Tuple count, page count and one histogram per column of a table.
///
/// Built by two full scans: the first finds each INT column's range, the
/// second fills the histograms. The result is a snapshot; later writes to
/// the table are not reflected.
#[derive(Debug, Clone)]
pub struct TableStats {
    table_id: TableId,
    io_cost_per_page: u32,
    num_pages: u32,
    total_tuples: u64,
    columns: Vec<ColumnHistogram>,
}

impl TableStats {
    /// Scan `table_id` through `pool` and build its statistics.
    ///
    /// # Errors
    /// `Error::TableNotFound` if the table is not in the pool's catalog, and
    /// any error raised while scanning.
    pub fn compute(pool: &Arc<BufferPoolManager>, table_id: TableId, io_cost_per_page: u32) -> Result<Self> {
        let file = pool.catalog().file(table_id)?;
        let schema = file.schema().clone();
        let num_pages = file.num_pages();
        let mut iter = DbFileIterator::new(file, pool.clone(), TransactionId::new());

        // Pass 1: ranges of INT columns.
        let mut ranges: Vec<Option<(i32, i32)>> = vec![None; schema.num_fields()];
        let mut total_tuples = 0u64;
        iter.open()?;
        while iter.has_next()? {
            let tuple = iter.next()?;
            total_tuples += 1;
            for (range, field) in ranges.iter_mut().zip(tuple.fields()) {
                if let Field::Int(v) = *field {
                    *range = Some(match *range {
                        Some((lo, hi)) => (lo.min(v), hi.max(v)),
                        None => (v, v),
                    });
                }
            }
        }

        let mut columns: Vec<ColumnHistogram> = schema
            .iter()
            .zip(&ranges)
            .map(|(item, range)| match item.field_type {
                Type::Int => {
                    let (lo, hi) = range.unwrap_or((0, 0));
                    ColumnHistogram::Int(IntHistogram::new(NUM_HIST_BINS, lo, hi))
                }
                Type::Str => ColumnHistogram::Str(StringHistogram::new(NUM_HIST_BINS)),
            })
            .collect();

        // Pass 2: histograms.
        iter.rewind()?;
        while iter.has_next()? {
            let tuple = iter.next()?;
            for (column, field) in columns.iter_mut().zip(tuple.fields()) {
                match (column, field) {
                    (ColumnHistogram::Int(h), Field::Int(v)) => h.add_value(*v),
                    (ColumnHistogram::Str(h), Field::Str(s)) => h.add_value(s),
                    _ => {}
                }
            }
        }
        iter.close();

        debug!(
            "stats for {}: {} tuples over {} pages",
            table_id, total_tuples, num_pages
        );

        Ok(Self {
            table_id,
            io_cost_per_page,
            num_pages,
            total_tuples,
            columns,
        })
    }

    #[inline]
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Number of tuples seen by the scan.
    #[inline]
    pub fn total_tuples(&self) -> u64 {
        self.total_tuples
    }

    /// Cost of a full sequential scan: pages times the per-page I/O cost.
    pub fn estimate_scan_cost(&self) -> f64 {
        self.num_pages as f64 * self.io_cost_per_page as f64
    }

    /// Expected number of tuples passing a predicate of the given
    /// selectivity, rounded to the nearest integer.
    pub fn estimate_table_cardinality(&self, selectivity: f64) -> u64 {
        (self.total_tuples as f64 * selectivity).round().max(0.0) as u64
    }

    /// Estimated fraction of tuples satisfying `column[field] op constant`.
    ///
    /// # Errors
    /// - `Error::FieldIndexOutOfRange` if `field` is not a column
    /// - `Error::TypeMismatch` if `constant` has a different type than the
    ///   column
    pub fn estimate_selectivity(&self, field: usize, op: CompareOp, constant: &Field) -> Result<f64> {
        let column = self.columns.get(field).ok_or(Error::FieldIndexOutOfRange {
            index: field,
            len: self.columns.len(),
        })?;
        match (column, constant) {
            (ColumnHistogram::Int(h), Field::Int(v)) => Ok(h.estimate_selectivity(op, *v)),
            (ColumnHistogram::Str(h), Field::Str(s)) => Ok(h.estimate_selectivity(op, s)),
            (ColumnHistogram::Int(_), other) => Err(Error::TypeMismatch {
                expected: Type::Int.name(),
                found: other.field_type().name(),
            }),
            (ColumnHistogram::Str(_), other) => Err(Error::TypeMismatch {
                expected: Type::Str.name(),
                found: other.field_type().name(),
            }),
        }
    }
}

/// Statistics for every table in a catalog, keyed by table name.
#[derive(Debug, Clone, Default)]
pub struct TableStatsMap {
    stats: HashMap<String, TableStats>,
}

impl TableStatsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute statistics for each table registered in the pool's catalog,
    /// using the default per-page I/O cost.
    pub fn compute_all(pool: &Arc<BufferPoolManager>) -> Result<Self> {
        let catalog = pool.catalog();
        let mut map = Self::new();
        for table_id in catalog.table_ids() {
            let name = catalog.table_name(table_id)?;
            let stats = TableStats::compute(pool, table_id, IO_COST_PER_PAGE)?;
            map.insert(name, stats);
        }
        debug!("computed statistics for {} tables", map.len());
        Ok(map)
    }

    pub fn get(&self, table_name: &str) -> Option<&TableStats> {
        self.stats.get(table_name)
    }

    /// Store `stats` under `table_name`, replacing any previous entry.
    pub fn insert(&mut self, table_name: String, stats: TableStats) -> Option<TableStats> {
        self.stats.insert(table_name, stats)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableStats)> {
        self.stats.iter().map(|(name, stats)| (name.as_str(), stats))
    }
}
