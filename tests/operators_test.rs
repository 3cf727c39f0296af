//! Operator trees over real heap files.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::{first_ints, Db};
use heapdb::execution::{
    collect_all, Aggregate, AggregateOp, CompareOp, Delete, Filter, Insert, OpIterator, Predicate,
    SeqScan, TupleIterator,
};
use heapdb::tuple::{Field, Tuple, TupleDesc, Type};
use heapdb::{DbFile, TransactionId};

fn people_schema() -> Arc<TupleDesc> {
    Arc::new(TupleDesc::new(&[Type::Int, Type::Str], &["age", "city"]))
}

fn people(rows: &[(i32, &str)]) -> Vec<Tuple> {
    let schema = people_schema();
    rows.iter()
        .map(|&(age, city)| Tuple::new(schema.clone(), vec![Field::Int(age), Field::from(city)]).unwrap())
        .collect()
}

/// Loads rows through an Insert operator and returns the table.
fn load(db: &Db, name: &str, rows: &[(i32, &str)]) -> Arc<dyn DbFile> {
    let file = db.table(name, people_schema(), &[]);
    let source = TupleIterator::new(people_schema(), people(rows));
    let mut insert = Insert::new(db.pool.clone(), TransactionId::new(), Box::new(source), file.id()).unwrap();
    insert.open().unwrap();
    assert_eq!(insert.next().unwrap().field(0).unwrap(), &Field::Int(rows.len() as i32));
    insert.close();
    file
}

fn grouped(agg: &mut dyn OpIterator) -> HashMap<String, i32> {
    collect_all(agg)
        .unwrap()
        .iter()
        .map(|t| {
            (
                t.field(0).unwrap().as_str().unwrap().to_string(),
                t.field(1).unwrap().as_int().unwrap(),
            )
        })
        .collect()
}

#[test]
fn test_parity_aggregates_over_heap_file() {
    let db = Db::new(4);
    let rows: Vec<(i32, &str)> = [1, 2, 3, 2, 4]
        .iter()
        .map(|&v| (v, if v % 2 == 0 { "even" } else { "odd" }))
        .collect();
    let file = load(&db, "nums", &rows);

    // Odd: 1, 3. Even: 2, 2, 4.
    let expected = [
        (AggregateOp::Count, 2, 3),
        (AggregateOp::Sum, 4, 8),
        (AggregateOp::Min, 1, 2),
        (AggregateOp::Max, 3, 4),
        (AggregateOp::Avg, 2, 2),
    ];
    for (op, odd, even) in expected {
        let scan = SeqScan::new(db.pool.clone(), TransactionId::new(), file.id(), None).unwrap();
        let mut agg = Aggregate::new(Box::new(scan), 0, Some(1), op).unwrap();
        agg.open().unwrap();
        let got = grouped(&mut agg);
        assert_eq!(got.len(), 2, "{}", op);
        assert_eq!(got["odd"], odd, "{}", op);
        assert_eq!(got["even"], even, "{}", op);
    }
}

#[test]
fn test_filter_then_count_by_city() {
    let db = Db::new(4);
    let file = load(
        &db,
        "people",
        &[(30, "oslo"), (17, "rome"), (45, "oslo"), (52, "rome"), (12, "oslo")],
    );

    let scan = SeqScan::new(db.pool.clone(), TransactionId::new(), file.id(), Some("p")).unwrap();
    assert_eq!(scan.schema().field_name(1).unwrap(), "p.city");
    let adults = Filter::new(
        Predicate::new(0, CompareOp::GreaterThanOrEq, Field::Int(18)),
        Box::new(scan),
    );
    let mut agg = Aggregate::new(Box::new(adults), 0, Some(1), AggregateOp::Count).unwrap();
    assert_eq!(agg.schema().field_name(1).unwrap(), "COUNT (p.age)");

    agg.open().unwrap();
    let got = grouped(&mut agg);
    assert_eq!(got["oslo"], 2);
    assert_eq!(got["rome"], 1);
}

#[test]
fn test_like_on_strings() {
    let db = Db::new(4);
    let file = load(&db, "people", &[(1, "amsterdam"), (2, "rotterdam"), (3, "berlin")]);

    let scan = SeqScan::new(db.pool.clone(), TransactionId::new(), file.id(), None).unwrap();
    let mut dams = Filter::new(Predicate::new(1, CompareOp::Like, Field::from("dam")), Box::new(scan));
    dams.open().unwrap();
    assert_eq!(first_ints(&collect_all(&mut dams).unwrap()), vec![1, 2]);
}

#[test]
fn test_delete_is_one_shot_and_persists() {
    let db = Db::new(4);
    let file = load(&db, "people", &[(10, "a"), (20, "b"), (30, "c"), (40, "d")]);
    let txn = TransactionId::new();

    let scan = SeqScan::new(db.pool.clone(), txn, file.id(), None).unwrap();
    let old = Filter::new(Predicate::new(0, CompareOp::GreaterThan, Field::Int(25)), Box::new(scan));
    let mut delete = Delete::new(db.pool.clone(), txn, Box::new(old));
    delete.open().unwrap();
    assert_eq!(delete.next().unwrap().field(0).unwrap(), &Field::Int(2));
    assert!(!delete.has_next().unwrap());
    delete.rewind().unwrap();
    assert!(!delete.has_next().unwrap());
    delete.close();

    db.pool.flush_all_pages().unwrap();
    let mut scan = SeqScan::new(db.pool.clone(), txn, file.id(), None).unwrap();
    scan.open().unwrap();
    assert_eq!(first_ints(&collect_all(&mut scan).unwrap()), vec![10, 20]);
}

#[test]
fn test_insert_select_copies_table() {
    let db = Db::new(4);
    let src = load(&db, "src", &[(1, "x"), (2, "y"), (3, "z")]);
    let dst = db.table("dst", people_schema(), &[]);
    let txn = TransactionId::new();

    let scan = SeqScan::new(db.pool.clone(), txn, src.id(), None).unwrap();
    let mut insert = Insert::new(db.pool.clone(), txn, Box::new(scan), dst.id()).unwrap();
    insert.open().unwrap();
    assert_eq!(insert.next().unwrap().field(0).unwrap(), &Field::Int(3));
    assert!(insert.next().unwrap_err().is_protocol_misuse());

    let mut check = SeqScan::new(db.pool.clone(), txn, dst.id(), None).unwrap();
    check.open().unwrap();
    let copied = collect_all(&mut check).unwrap();
    assert_eq!(first_ints(&copied), vec![1, 2, 3]);
    assert_eq!(copied[2].field(1).unwrap(), &Field::from("z"));
}
