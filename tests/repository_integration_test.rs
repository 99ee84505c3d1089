// ==========================================
// Repository 层集成测试
// ==========================================
// 测试目标: 验证文档集合持久化、upsert 语义、完成状态与旧数据兼容
// ==========================================


use inbound_tracker::domain::types::BoxSize;
use inbound_tracker::domain::{AuditLog, Batch, InboundRecord};
use inbound_tracker::logging;
use inbound_tracker::repository::{InventoryRepository, UpsertOutcome};
use inbound_tracker::store::{DocumentStore, INBOUND_RECORDS_FILE};
use test_helpers::{create_test_inventory, TEST_DATE, TEST_USER};

fn make_record(barcode: &str, notes: Option<&str>) -> InboundRecord {
    let mut record = InboundRecord::notes_carrier(TEST_DATE, String::new(), TEST_USER);
    record.barcode = barcode.to_string();
    record.identifier = format!("item {}", barcode);
    record.box_size = BoxSize::Small;
    record.notes = notes.map(|n| n.to_string());
    record
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_records_survive_reopen() {
    logging::init_test();
    let (dir, inventory) = create_test_inventory();

    inventory.upsert_record(make_record("111", None)).unwrap();
    inventory.upsert_record(make_record("222", Some("ok"))).unwrap();
    inventory
        .append_batch(Batch::new(TEST_DATE, vec!["111".into(), "222".into()], TEST_USER))
        .unwrap();
    inventory
        .append_audit(AuditLog::new(TEST_USER, "add_batch", None))
        .unwrap();
    let before = inventory.list_records(TEST_DATE).unwrap();
    drop(inventory);

    let reopened = InventoryRepository::new(&DocumentStore::open(dir.path()).unwrap());
    assert_eq!(reopened.list_records(TEST_DATE).unwrap(), before);
    assert_eq!(reopened.list_batches().unwrap().len(), 1);
    assert_eq!(reopened.list_audit().unwrap().len(), 1);
}

#[test]
fn test_upsert_idempotent_latest_wins() {
    let (_dir, inventory) = create_test_inventory();

    assert_eq!(
        inventory.upsert_record(make_record("111", None)).unwrap(),
        UpsertOutcome::Inserted
    );
    let mut updated = make_record("111", Some("recount"));
    updated.box_count = 7;
    assert_eq!(
        inventory.upsert_record(updated.clone()).unwrap(),
        UpsertOutcome::Replaced
    );
    assert_eq!(
        inventory.upsert_record(updated.clone()).unwrap(),
        UpsertOutcome::Replaced
    );

    let records = inventory.list_records(TEST_DATE).unwrap();
    assert_eq!(records, vec![updated]);
}

#[test]
fn test_completion_status_rules() {
    let (_dir, inventory) = create_test_inventory();
    assert!(inventory.completion_status(TEST_DATE).unwrap());

    inventory.upsert_record(make_record("111", Some("fine"))).unwrap();
    assert!(inventory.completion_status(TEST_DATE).unwrap());

    inventory
        .upsert_record(make_record("222", Some("Damaged, INCOMPLETE")))
        .unwrap();
    assert!(!inventory.completion_status(TEST_DATE).unwrap());
    assert!(inventory.completion_status("16-01-2025").unwrap());
}

#[test]
fn test_legacy_file_with_numeric_ids_and_unknown_fields() {
    let (dir, inventory) = create_test_inventory();
    let legacy = r#"[
      {
        "id": 42,
        "date": "15-01-2025",
        "barcode": "0001112223",
        "identifier": "Gummies 10pk",
        "last_4_barcode": "2223",
        "units_per_case": 24,
        "box_count": 3,
        "partial_case_1": 0,
        "partial_case_2": 0,
        "partial_case_3": 0,
        "partial_case_4": 0,
        "total_unit_count": 72,
        "subcategory": "GUMMIES",
        "ftp_cases": 1,
        "ocala_cases": 2,
        "ftp_units": 24,
        "ocala_units": 48,
        "box_size": "SM",
        "verified_total_unit_count": 72,
        "notes": null,
        "created_by": "legacy",
        "created_at": "2025-01-15T08:00:00Z",
        "scanner_model": "ZX-9"
      }
    ]"#;
    std::fs::write(dir.path().join(INBOUND_RECORDS_FILE), legacy).unwrap();

    let records = inventory.list_records(TEST_DATE).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.as_deref(), Some("42"));
    assert_eq!(records[0].box_size, BoxSize::Small);

    // 旧记录可被 upsert 替换
    let mut replacement = records[0].clone();
    replacement.notes = Some("checked".to_string());
    assert_eq!(
        inventory.upsert_record(replacement).unwrap(),
        UpsertOutcome::Replaced
    );
}

#[test]
fn test_corrupt_collection_surfaces_error() {
    let (dir, inventory) = create_test_inventory();
    std::fs::write(dir.path().join(INBOUND_RECORDS_FILE), "[{ truncated").unwrap();

    assert!(inventory.list_records(TEST_DATE).is_err());
    assert!(inventory.upsert_record(make_record("111", None)).is_err());

    // 失败的写入不得覆盖原文件
    let raw = std::fs::read_to_string(dir.path().join(INBOUND_RECORDS_FILE)).unwrap();
    assert_eq!(raw, "[{ truncated");
}
