//! Integration tests for the CSV record store
//!
//! Tests cover:
//! - load on absent, empty and header-only files
//! - append with exact-duplicate elimination
//! - overwrite without dedupe or re-derivation
//! - overwrite(load()) leaves file content unchanged

use matprice_common::store::AppendOutcome;
use matprice_common::{Error, MaterialInput, MaterialRecord, RecordSet, RecordStore};
use std::fs;
use tempfile::TempDir;

const HEADER: &str =
    "width,length,height,amount,price,link,product_identifier,qm,price_per_unit,price_per_qm";

/// Test helper: store backed by a file inside a fresh temp dir
fn setup_store() -> (TempDir, RecordStore) {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path().join("materials.csv"));
    (dir, store)
}

fn plywood(id: &str) -> MaterialRecord {
    MaterialRecord::from_input(&MaterialInput {
        width: 600.0,
        length: 400.0,
        height: 18.0,
        amount: 10.0,
        price: 50.0,
        link: "u".to_string(),
        product_identifier: id.to_string(),
    })
}

#[test]
fn test_load_absent_file_is_empty() {
    let (_dir, store) = setup_store();

    let set = store.load().unwrap();
    assert!(set.is_empty());
    assert_eq!(set.columns(), HEADER.split(',').collect::<Vec<_>>());
    assert!(!store.path().exists(), "load must not create the file");
}

#[test]
fn test_load_zero_byte_file_is_empty() {
    let (_dir, store) = setup_store();
    fs::write(store.path(), "").unwrap();

    let set = store.load().unwrap();
    assert_eq!(set.len(), 0);
    assert_eq!(set.columns().len(), 10);
}

#[test]
fn test_load_header_only_file_is_empty() {
    let (_dir, store) = setup_store();
    fs::write(store.path(), format!("{}\n", HEADER)).unwrap();

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_reports_missing_column() {
    let (_dir, store) = setup_store();
    fs::write(store.path(), "width,length\n1,2\n").unwrap();

    assert!(matches!(store.load(), Err(Error::MissingColumn(_))));
}

#[test]
fn test_append_twice_stores_one_row() {
    let (_dir, store) = setup_store();

    assert_eq!(store.append(plywood("p1")).unwrap(), AppendOutcome::Created);
    assert_eq!(store.append(plywood("p1")).unwrap(), AppendOutcome::Updated);

    let set = store.load().unwrap();
    assert_eq!(set.len(), 1);
    let r = &set.records()[0];
    assert_eq!(r.product_identifier, "p1");
    assert_eq!(r.height, 18.0);
    assert!((r.qm - 2.4).abs() < 1e-9);
    assert!((r.price_per_qm - 20.8333).abs() < 1e-4);
}

#[test]
fn test_append_without_dedupe_keeps_duplicates() {
    let (_dir, store) = setup_store();

    store.append_with(plywood("p1"), false).unwrap();
    store.append_with(plywood("p1"), false).unwrap();

    assert_eq!(store.load().unwrap().len(), 2);
}

#[test]
fn test_append_preserves_order() {
    let (_dir, store) = setup_store();

    for id in ["c", "a", "b", "a"] {
        store.append(plywood(id)).unwrap();
    }

    let ids: Vec<_> = store
        .load()
        .unwrap()
        .into_records()
        .into_iter()
        .map(|r| r.product_identifier)
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn test_append_onto_empty_file_reports_created() {
    let (_dir, store) = setup_store();
    fs::write(store.path(), "").unwrap();

    assert_eq!(store.append(plywood("p1")).unwrap(), AppendOutcome::Created);
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn test_append_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path().join("data").join("materials.csv"));

    store.append(plywood("p1")).unwrap();
    assert!(store.path().exists());
}

#[test]
fn test_append_existing_duplicates_also_collapse() {
    let (_dir, store) = setup_store();
    let row = plywood("p1").to_cells().join(",");
    fs::write(store.path(), format!("{}\n{}\n{}\n", HEADER, row, row)).unwrap();

    store.append(plywood("p2")).unwrap();

    let ids: Vec<_> = store
        .load()
        .unwrap()
        .records()
        .iter()
        .map(|r| r.product_identifier.clone())
        .collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}

#[test]
fn test_overwrite_keeps_duplicates_and_stale_derived_values() {
    let (_dir, store) = setup_store();
    store.append(plywood("p1")).unwrap();

    let mut edited = store.load().unwrap().into_records();
    edited[0].price = 75.0;
    edited.push(edited[0].clone());
    store.overwrite(&RecordSet::from(edited)).unwrap();

    let set = store.load().unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.records()[0].price, 75.0);
    assert_eq!(set.records()[0].price_per_unit, 5.0, "no re-derivation");
}

#[test]
fn test_overwrite_of_load_is_noop() {
    let (_dir, store) = setup_store();
    store.append(plywood("birch, 18mm")).unwrap();
    store.append(plywood("poplar \"light\"")).unwrap();
    let before = fs::read_to_string(store.path()).unwrap();

    let set = store.load().unwrap();
    store.overwrite(&set).unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn test_overwrite_of_pandas_style_file_preserves_values() {
    let (_dir, store) = setup_store();
    let content = format!(
        "{}\n600,400,18,10,50.0,https://shop.example/p1,p1,2.4000000000000004,5.0,20.833333333333332\n",
        HEADER
    );
    fs::write(store.path(), &content).unwrap();

    let set = store.load().unwrap();
    store.overwrite(&set).unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded, set);

    // Numbers are rewritten in shortest form: "50.0" -> "50", "5.0" -> "5"
    let after = fs::read_to_string(store.path()).unwrap();
    assert_ne!(after, content);
    assert!(after.contains(",10,50,https://shop.example/p1,p1,2.4000000000000004,5,20.833333333333332\n"));
}

#[test]
fn test_extra_column_survives_overwrite_of_load() {
    let (_dir, store) = setup_store();
    let content = format!(
        "{},notes\n600,400,18,10,50,u,p1,2.4000000000000004,5,20.833333333333332,from supplier A\n",
        HEADER
    );
    fs::write(store.path(), &content).unwrap();

    let set = store.load().unwrap();
    assert_eq!(set.extra_columns(), ["notes".to_string()]);
    store.overwrite(&set).unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), content);
}

#[test]
fn test_extra_column_survives_append() {
    let (_dir, store) = setup_store();
    fs::write(
        store.path(),
        format!(
            "{},notes\n1220,2440,18,1,40,u,birch,2.9768,40,13.437248051599033,from supplier A\n",
            HEADER
        ),
    )
    .unwrap();

    store.append(plywood("p1")).unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], format!("{},notes", HEADER));
    assert!(lines[1].ends_with(",from supplier A"));
    assert!(lines[2].ends_with(","), "appended row has an empty notes cell");

    let set = store.load().unwrap();
    assert_eq!(set.records()[0].extra_cell("notes"), "from supplier A");
    assert_eq!(set.records()[1].extra_cell("notes"), "");
}

#[test]
fn test_overwrite_empty_set_leaves_header() {
    let (_dir, store) = setup_store();
    store.append(plywood("p1")).unwrap();

    store.overwrite(&RecordSet::empty()).unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), format!("{}\n", HEADER));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_overwrite_into_missing_directory_path_fails() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "x").unwrap();
    let store = RecordStore::new(blocker.join("materials.csv"));

    assert!(store.overwrite(&RecordSet::empty()).is_err());
}
