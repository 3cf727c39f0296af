//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use heapdb::storage::page::SlotLayout;
use heapdb::tuple::{Field, Tuple, TupleDesc, Type};
use heapdb::{write_heap_file, BufferPoolManager, Catalog, DbFile, HeapFile};
use tempfile::{tempdir, TempDir};

pub struct Db {
    pub dir: TempDir,
    pub catalog: Arc<Catalog>,
    pub pool: Arc<BufferPoolManager>,
}

impl Db {
    pub fn new(capacity: usize) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempdir().unwrap();
        let catalog = Arc::new(Catalog::new());
        let pool = Arc::new(BufferPoolManager::new(capacity, catalog.clone()));
        Self { dir, catalog, pool }
    }

    /// Create and register a table whose file starts with `pages`.
    pub fn table(&self, name: &str, schema: Arc<TupleDesc>, pages: &[Vec<Tuple>]) -> Arc<dyn DbFile> {
        let path = self.dir.path().join(format!("{}.dat", name));
        write_heap_file(&path, &schema, pages).unwrap();
        let file: Arc<dyn DbFile> = Arc::new(HeapFile::open(&path, schema).unwrap());
        self.catalog.add_table(file.clone(), name);
        file
    }

    /// A table of `width` INT columns, every column of a row set to its value.
    pub fn int_table(&self, name: &str, width: usize, pages: &[Vec<i32>]) -> Arc<dyn DbFile> {
        let schema = int_schema(width);
        let pages: Vec<Vec<Tuple>> = pages
            .iter()
            .map(|rows| rows.iter().map(|&v| int_row(&schema, v)).collect())
            .collect();
        self.table(name, schema, &pages)
    }
}

pub fn int_schema(width: usize) -> Arc<TupleDesc> {
    let names: Vec<String> = (0..width).map(|i| format!("c{}", i)).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    Arc::new(TupleDesc::new(&vec![Type::Int; width], &names))
}

pub fn int_row(schema: &Arc<TupleDesc>, value: i32) -> Tuple {
    Tuple::new(schema.clone(), vec![Field::Int(value); schema.num_fields()]).unwrap()
}

pub fn first_ints(tuples: &[Tuple]) -> Vec<i32> {
    tuples
        .iter()
        .map(|t| t.field(0).unwrap().as_int().unwrap())
        .collect()
}

/// Number of rows of a `width`-INT table that fit on one page.
pub fn rows_per_page(width: usize) -> usize {
    SlotLayout::new(int_schema(width).byte_size()).num_slots()
}
