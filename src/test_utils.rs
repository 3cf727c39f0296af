//! Shared fixtures for unit tests.

use std::sync::Arc;

use tempfile::{tempdir, TempDir};

use crate::buffer::BufferPoolManager;
use crate::catalog::Catalog;
use crate::storage::{write_heap_file, DbFile, HeapFile};
use crate::tuple::{Field, Tuple, TupleDesc, Type};

/// A temp directory, a catalog and a pool over it.
pub struct TestDb {
    pub dir: TempDir,
    pub catalog: Arc<Catalog>,
    pub pool: Arc<BufferPoolManager>,
}

impl TestDb {
    pub fn new(capacity: usize) -> Self {
        let dir = tempdir().unwrap();
        let catalog = Arc::new(Catalog::new());
        let pool = Arc::new(BufferPoolManager::new(capacity, catalog.clone()));
        Self { dir, catalog, pool }
    }

    /// Register an empty table of `width` INT columns named `c0..`.
    pub fn int_table(&self, name: &str, width: usize) -> Arc<dyn DbFile> {
        self.table_with_pages(name, width, &[])
    }

    /// Register a table whose file holds `pages`, each a list of rows whose
    /// every column is the row's value. An empty list is an empty page.
    pub fn table_with_pages(&self, name: &str, width: usize, pages: &[Vec<i32>]) -> Arc<dyn DbFile> {
        let path = self.dir.path().join(format!("{}.dat", name));
        let schema = int_schema(width);
        let pages: Vec<Vec<Tuple>> = pages
            .iter()
            .map(|rows| rows.iter().map(|&v| int_row(&schema, v)).collect())
            .collect();
        write_heap_file(&path, &schema, &pages).unwrap();

        let file: Arc<dyn DbFile> = Arc::new(HeapFile::open(&path, schema).unwrap());
        self.catalog.add_table(file.clone(), name);
        file
    }
}

/// `width` INT columns named `c0`, `c1`, ...
pub fn int_schema(width: usize) -> Arc<TupleDesc> {
    let names: Vec<String> = (0..width).map(|i| format!("c{}", i)).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    Arc::new(TupleDesc::new(&vec![Type::Int; width], &names))
}

/// A row with every column set to `value`.
pub fn int_row(schema: &Arc<TupleDesc>, value: i32) -> Tuple {
    Tuple::new(schema.clone(), vec![Field::Int(value); schema.num_fields()]).unwrap()
}

/// First column of every tuple.
pub fn first_ints(tuples: &[Tuple]) -> Vec<i32> {
    tuples
        .iter()
        .map(|t| t.field(0).unwrap().as_int().unwrap())
        .collect()
}
