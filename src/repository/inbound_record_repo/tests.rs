use super::{InboundRecordRepository, UpsertOutcome};
use crate::domain::types::BoxSize;
use crate::domain::InboundRecord;
use crate::store::DocumentStore;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn setup_test_repo() -> (TempDir, Arc<InboundRecordRepository>) {
    let dir = TempDir::new().unwrap();
    let store = DocumentStore::open(dir.path()).unwrap();
    let repo = Arc::new(InboundRecordRepository::new(store.inbound_records()));
    (dir, repo)
}

fn make_test_record(date: &str, barcode: &str, box_count: i32) -> InboundRecord {
    InboundRecord {
        id: Some(format!("{}-{}", date, barcode)),
        date: date.to_string(),
        barcode: barcode.to_string(),
        identifier: "7".to_string(),
        last_4_barcode: crate::domain::inbound_record::last_4(barcode),
        units_per_case: 12,
        box_count,
        partial_case_1: 0,
        partial_case_2: 0,
        partial_case_3: 0,
        partial_case_4: 0,
        total_unit_count: box_count * 12,
        subcategory: "FLOWER".to_string(),
        ftp_cases: 0,
        ocala_cases: box_count,
        ftp_units: 0,
        ocala_units: box_count * 12,
        box_size: BoxSize::Large,
        verified_total_unit_count: box_count * 12,
        notes: None,
        created_by: "tester".to_string(),
        created_at: None,
    }
}

#[test]
fn test_upsert_inserts_new_key() {
    let (_dir, repo) = setup_test_repo();

    let outcome = repo.upsert(make_test_record("15-01-2025", "A001", 5)).unwrap();
    assert_eq!(outcome, UpsertOutcome::Inserted);

    let found = repo.find_by_key("15-01-2025", "A001").unwrap();
    assert_eq!(found.unwrap().box_count, 5);
}

#[test]
fn test_upsert_replaces_same_key_wholesale() {
    let (_dir, repo) = setup_test_repo();

    let mut first = make_test_record("15-01-2025", "A001", 5);
    first.notes = Some("first".to_string());
    repo.upsert(first).unwrap();
    repo.upsert(make_test_record("15-01-2025", "B002", 1)).unwrap();

    let second = make_test_record("15-01-2025", "A001", 9);
    let outcome = repo.upsert(second).unwrap();
    assert_eq!(outcome, UpsertOutcome::Replaced);

    let records = repo.find_by_date("15-01-2025").unwrap();
    assert_eq!(records.len(), 2);
    // 位置保持不变, 字段整条替换 (无字段级合并)
    assert_eq!(records[0].barcode, "A001");
    assert_eq!(records[0].box_count, 9);
    assert_eq!(records[0].notes, None);
}

#[test]
fn test_same_barcode_on_different_dates_are_distinct() {
    let (_dir, repo) = setup_test_repo();

    repo.upsert(make_test_record("15-01-2025", "A001", 5)).unwrap();
    repo.upsert(make_test_record("16-01-2025", "A001", 6)).unwrap();

    assert_eq!(repo.list_all().unwrap().len(), 2);
    assert_eq!(repo.find_by_date("16-01-2025").unwrap()[0].box_count, 6);
}

#[test]
fn test_upsert_is_idempotent() {
    let (_dir, repo) = setup_test_repo();

    for _ in 0..5 {
        repo.upsert(make_test_record("15-01-2025", "A001", 5)).unwrap();
        repo.upsert(make_test_record("15-01-2025", "B002", 3)).unwrap();
    }

    assert_eq!(repo.find_by_date("15-01-2025").unwrap().len(), 2);
}

#[test]
fn test_apply_notes_updates_all_records_for_date() {
    let (_dir, repo) = setup_test_repo();
    repo.upsert(make_test_record("15-01-2025", "A001", 5)).unwrap();
    repo.upsert(make_test_record("15-01-2025", "B002", 3)).unwrap();
    repo.upsert(make_test_record("16-01-2025", "C003", 3)).unwrap();

    let update = repo
        .apply_notes_for_date("15-01-2025", "short (incomplete)", || {
            panic!("载体记录不应被创建")
        })
        .unwrap();

    assert_eq!(update.updated, 2);
    assert!(!update.created_carrier);
    for record in repo.find_by_date("15-01-2025").unwrap() {
        assert_eq!(record.notes.as_deref(), Some("short (incomplete)"));
    }
    assert_eq!(repo.find_by_date("16-01-2025").unwrap()[0].notes, None);
}

#[test]
fn test_apply_notes_creates_carrier_when_empty() {
    let (_dir, repo) = setup_test_repo();

    let update = repo
        .apply_notes_for_date("15-01-2025", "late truck", || {
            InboundRecord::notes_carrier("15-01-2025", "late truck".to_string(), "alice")
        })
        .unwrap();

    assert_eq!(update.updated, 0);
    assert!(update.created_carrier);

    let records = repo.find_by_date("15-01-2025").unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_notes_carrier());
}

#[test]
fn test_concurrent_upserts_are_not_lost() {
    let (_dir, repo) = setup_test_repo();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let repo = repo.clone();
            thread::spawn(move || {
                repo.upsert(make_test_record("15-01-2025", &format!("BC{:03}", i), i))
                    .unwrap();
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(repo.find_by_date("15-01-2025").unwrap().len(), 16);
}
