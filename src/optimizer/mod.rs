//! Selectivity and cost estimation.
//!
//! [`TableStats`] scans a table once per statistic pass and keeps an
//! [`IntHistogram`] per INT column and a [`StringHistogram`] per STRING
//! column. Nothing here writes to a table.

mod int_histogram;
mod string_histogram;
mod table_stats;

pub use int_histogram::IntHistogram;
pub use string_histogram::StringHistogram;
pub use table_stats::{TableStats, TableStatsMap};
