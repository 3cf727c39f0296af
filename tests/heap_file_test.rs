//! Heap file placement, slot reuse and scans through the pool.

mod common;

use common::{first_ints, int_row, rows_per_page, Db};
use heapdb::execution::{collect_all, OpIterator, SeqScan};
use heapdb::storage::HeapFile;
use heapdb::tuple::{TupleDesc, Type};
use heapdb::{DbFile, PageId, Permissions, TransactionId};

#[test]
fn test_insert_into_full_table_appends_one_page() {
    let db = Db::new(8);
    let per_page = rows_per_page(1) as i32;
    let file = db.int_table("t", 1, &[(0..per_page).collect(), (0..per_page).collect()]);
    assert_eq!(file.num_pages(), 2);

    let txn = TransactionId::new();
    let mut row = int_row(file.schema(), -1);
    db.pool.insert_tuple(txn, file.id(), &mut row).unwrap();

    assert_eq!(file.num_pages(), 3);
    let rid = row.record_id().unwrap();
    assert_eq!(rid.page_id, PageId::new(file.id(), 2));
    assert_eq!(rid.slot, 0);

    let page = db.pool.get(txn, rid.page_id, Permissions::ReadOnly).unwrap();
    let stored = page.read().tuple_at(0).unwrap();
    assert_eq!(stored, row);
}

#[test]
fn test_insert_fills_gaps_before_appending() {
    let db = Db::new(8);
    let per_page = rows_per_page(1) as i32;
    let file = db.int_table("t", 1, &[(0..per_page).collect(), vec![7]]);

    let txn = TransactionId::new();
    let mut row = int_row(file.schema(), 8);
    db.pool.insert_tuple(txn, file.id(), &mut row).unwrap();

    assert_eq!(file.num_pages(), 2);
    assert_eq!(row.record_id().unwrap().page_id.page_no(), 1);
    assert_eq!(row.record_id().unwrap().slot, 1);
}

#[test]
fn test_deleted_slot_is_reused() {
    let db = Db::new(8);
    let file = db.int_table("t", 3, &[vec![0, 1, 2, 3, 4]]);
    let txn = TransactionId::new();

    let mut scan = SeqScan::new(db.pool.clone(), txn, file.id(), None).unwrap();
    scan.open().unwrap();
    let victim = collect_all(&mut scan)
        .unwrap()
        .into_iter()
        .find(|t| t.field(0).unwrap().as_int().unwrap() == 2)
        .unwrap();
    let freed = victim.record_id().unwrap();

    db.pool.delete_tuple(txn, &victim).unwrap();
    let page = db.pool.get(txn, freed.page_id, Permissions::ReadOnly).unwrap();
    assert!(!page.read().is_slot_used(freed.slot));
    drop(page);

    let mut row = int_row(file.schema(), 42);
    db.pool.insert_tuple(txn, file.id(), &mut row).unwrap();
    assert_eq!(row.record_id(), Some(freed));
    assert_eq!(file.num_pages(), 1);
}

#[test]
fn test_double_delete_is_storage_fault() {
    let db = Db::new(8);
    let file = db.int_table("t", 1, &[vec![1]]);
    let txn = TransactionId::new();

    let tuple = db
        .pool
        .get(txn, PageId::new(file.id(), 0), Permissions::ReadWrite)
        .unwrap()
        .read()
        .tuple_at(0)
        .unwrap();
    db.pool.delete_tuple(txn, &tuple).unwrap();
    let err = db.pool.delete_tuple(txn, &tuple).unwrap_err();
    assert!(err.is_storage_fault());
}

#[test]
fn test_scan_skips_empty_pages_in_order() {
    let db = Db::new(3);
    let file = db.int_table(
        "t",
        2,
        &[vec![1, 2], vec![], vec![], vec![3], vec![], vec![4, 5, 6], vec![]],
    );

    let mut scan = SeqScan::new(db.pool.clone(), TransactionId::new(), file.id(), None).unwrap();
    scan.open().unwrap();
    assert_eq!(first_ints(&collect_all(&mut scan).unwrap()), vec![1, 2, 3, 4, 5, 6]);
    assert!(!scan.has_next().unwrap());

    scan.rewind().unwrap();
    assert_eq!(collect_all(&mut scan).unwrap().len(), 6);
}

#[test]
fn test_table_id_is_stable_across_opens() {
    let db = Db::new(2);
    let file = db.int_table("t", 1, &[vec![1]]);
    let path = db.dir.path().join("t.dat");

    let reopened = HeapFile::open(&path, file.schema().clone()).unwrap();
    assert_eq!(reopened.id(), file.id());
    assert_eq!(reopened.num_pages(), 1);
}

#[test]
fn test_too_wide_schema_is_a_storage_error() {
    let db = Db::new(2);
    let path = db.dir.path().join("wide.dat");
    let wide = std::sync::Arc::new(TupleDesc::from_types(&[Type::Str; 32]));

    let err = HeapFile::open_or_create(&path, wide).err().unwrap();
    assert!(err.is_storage_fault());
    assert!(!path.exists());
}
