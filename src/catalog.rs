//! Catalog - the registry of tables the buffer pool and scans resolve
//! pages against.
//!
//! Maps a [`TableId`] to its backing [`DbFile`], schema and name. The
//! catalog lives in memory only; nothing here is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::common::{Error, Result, TableId};
use crate::storage::DbFile;
use crate::tuple::TupleDesc;

struct TableEntry {
    file: Arc<dyn DbFile>,
    name: String,
}

#[derive(Default)]
struct CatalogInner {
    tables: HashMap<TableId, TableEntry>,
    names: HashMap<String, TableId>,
}

/// In-memory table registry.
///
/// # Thread Safety
/// Lookups take a shared lock; registration takes an exclusive one.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use heapdb::catalog::Catalog;
/// use heapdb::storage::{DbFile, HeapFile};
/// use heapdb::tuple::{TupleDesc, Type};
///
/// let dir = tempfile::tempdir().unwrap();
/// let schema = Arc::new(TupleDesc::new(&[Type::Int], &["x"]));
/// let file = Arc::new(HeapFile::create(dir.path().join("t.dat"), schema).unwrap());
///
/// let catalog = Catalog::new();
/// catalog.add_table(file.clone(), "t");
/// assert_eq!(catalog.table_id("t").unwrap(), file.id());
/// ```
#[derive(Default)]
pub struct Catalog {
    inner: RwLock<CatalogInner>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `file` under `name`.
    ///
    /// A name already in use is rebound to the new file, and a file already
    /// registered under another name is renamed.
    pub fn add_table(&self, file: Arc<dyn DbFile>, name: &str) {
        let table_id = file.id();
        let mut inner = self.inner.write();

        if let Some(old_id) = inner.names.remove(name) {
            inner.tables.remove(&old_id);
        }
        if let Some(old) = inner.tables.remove(&table_id) {
            inner.names.remove(&old.name);
        }

        inner.names.insert(name.to_string(), table_id);
        inner.tables.insert(
            table_id,
            TableEntry {
                file,
                name: name.to_string(),
            },
        );
        debug!("registered {} as {:?}", table_id, name);
    }

    /// Id of the table called `name`.
    pub fn table_id(&self, name: &str) -> Result<TableId> {
        self.inner
            .read()
            .names
            .get(name)
            .copied()
            .ok_or_else(|| Error::TableNameNotFound(name.to_string()))
    }

    /// Backing file of `table_id`.
    pub fn file(&self, table_id: TableId) -> Result<Arc<dyn DbFile>> {
        self.with_entry(table_id, |entry| entry.file.clone())
    }

    /// Schema of `table_id`.
    pub fn schema(&self, table_id: TableId) -> Result<Arc<TupleDesc>> {
        self.with_entry(table_id, |entry| entry.file.schema().clone())
    }

    /// Name of `table_id`.
    pub fn table_name(&self, table_id: TableId) -> Result<String> {
        self.with_entry(table_id, |entry| entry.name.clone())
    }

    /// Ids of all registered tables, in ascending order.
    pub fn table_ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self.inner.read().tables.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.inner.read().tables.len()
    }

    /// Whether no table is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every table.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.tables.clear();
        inner.names.clear();
    }

    fn with_entry<T>(&self, table_id: TableId, f: impl FnOnce(&TableEntry) -> T) -> Result<T> {
        self.inner
            .read()
            .tables
            .get(&table_id)
            .map(f)
            .ok_or(Error::TableNotFound(table_id))
    }
}
