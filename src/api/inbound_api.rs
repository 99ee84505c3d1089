// ==========================================
// 入库追踪系统 - 入库录入 API
// ==========================================
// 职责: 扫码、提交入库记录、日期级备注、完成状态查询
// 审计: scan_barcode / scan_existing_barcode / submit_record / update_notes / add_notes
// 红线: 日期必须已有批次; 校验失败的表单不得写入存储
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{
    normalize_date_key, validate_barcode, InboundFormValidator, InboundRecordForm,
};
use crate::domain::batch::Batch;
use crate::domain::inbound_record::{compose_notes, last_4, NOTES_BARCODE_PREFIX};
use crate::domain::{AuditAction, InboundRecord};
use crate::engine::allocation::AllocationCalculator;
use crate::repository::inbound_record_repo::{NotesUpdate, UpsertOutcome};
use crate::repository::inventory_repo::InventoryRepository;
use crate::services::AuditSink;

// ==========================================
// ScanOutcome - 扫码结果
// ==========================================

/// 扫码结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScanOutcome {
    /// 批次内条码, 尚无记录
    New,
    /// 已有记录 (可查看/修改)
    Existing(InboundRecord),
    /// 不属于该日期批次
    NotInBatch,
}

// ==========================================
// InboundApi - 入库录入 API
// ==========================================

/// 入库录入API
///
/// 职责：
/// 1. 扫码判定 (新条码 / 已录入 / 不在批次内)
/// 2. 提交入库记录 (校验 → 分仓计算 → upsert)
/// 3. 日期级备注改写
/// 4. 记录列表与完成状态
pub struct InboundApi {
    inventory: Arc<InventoryRepository>,
    audit: AuditSink,
    validator: InboundFormValidator,
    calculator: AllocationCalculator,
}

impl InboundApi {
    pub fn new(
        inventory: Arc<InventoryRepository>,
        audit: AuditSink,
        validator: InboundFormValidator,
    ) -> Self {
        Self {
            inventory,
            audit,
            validator,
            calculator: AllocationCalculator::new(),
        }
    }

    /// 扫码
    ///
    /// # 返回
    /// - Ok(ScanOutcome::Existing): 该日期已有此条码记录, 审计 scan_existing_barcode
    /// - Ok(ScanOutcome::New): 批次内条码, 审计 scan_barcode
    /// - Ok(ScanOutcome::NotInBatch): 不审计
    /// - Err(ApiError::NotFound): 该日期无批次
    pub fn scan_barcode(&self, user: &str, date: &str, barcode: &str) -> ApiResult<ScanOutcome> {
        let date_key = normalize_date_key(date)?;
        let barcode = validate_barcode(barcode)?;
        let batch = self.require_batch(&date_key)?;

        if let Some(existing) = self.inventory.find_record(&date_key, &barcode)? {
            self.audit.log_action(
                user,
                AuditAction::ScanExistingBarcode,
                Some(format!("Re-scanned existing barcode: {}", barcode)),
            );
            return Ok(ScanOutcome::Existing(existing));
        }

        if batch.contains_sku(&barcode) {
            self.audit.log_action(
                user,
                AuditAction::ScanBarcode,
                Some(format!("Scanned barcode: {}", barcode)),
            );
            return Ok(ScanOutcome::New);
        }

        tracing::warn!(date = %date_key, barcode = %barcode, "条码不在批次内");
        Ok(ScanOutcome::NotInBatch)
    }

    /// 提交入库记录
    ///
    /// # 参数
    /// - form: 原始表单 (字符串字段)
    /// - is_complete: false 时备注追加 " (incomplete)"
    ///
    /// # 返回
    /// - Ok(InboundRecord): 已写入的记录 (含派生字段)
    /// - Err(ApiError): 校验失败、日期无批次、存储失败
    pub fn submit_record(
        &self,
        user: &str,
        date: &str,
        form: &InboundRecordForm,
        is_complete: bool,
    ) -> ApiResult<InboundRecord> {
        let date_key = normalize_date_key(date)?;
        let validated = self.validator.validate(form)?;
        if validated.barcode.starts_with(NOTES_BARCODE_PREFIX) {
            return Err(ApiError::field(
                "barcode",
                format!("{} 为备注保留前缀", NOTES_BARCODE_PREFIX),
            ));
        }

        let batch = self.require_batch(&date_key)?;
        if !batch.contains_sku(&validated.barcode) {
            tracing::warn!(date = %date_key, barcode = %validated.barcode, "提交的条码不在批次内");
        }

        let [p1, p2, p3, p4] = validated.partials;
        let mut record = InboundRecord {
            id: Some(Uuid::new_v4().to_string()),
            date: date_key,
            last_4_barcode: last_4(&validated.barcode),
            barcode: validated.barcode,
            identifier: validated.identifier,
            units_per_case: validated.units_per_case,
            box_count: validated.box_count,
            partial_case_1: p1,
            partial_case_2: p2,
            partial_case_3: p3,
            partial_case_4: p4,
            total_unit_count: 0,
            subcategory: validated.subcategory,
            ftp_cases: 0,
            ocala_cases: 0,
            ftp_units: 0,
            ocala_units: 0,
            box_size: validated.box_size,
            verified_total_unit_count: validated.verified_total_unit_count,
            notes: Some(compose_notes(&validated.notes, is_complete)),
            created_by: user.to_string(),
            created_at: Some(Utc::now().to_rfc3339()),
        };
        self.calculator.recompute(&mut record);

        let outcome = self.inventory.upsert_record(record.clone())?;
        if outcome == UpsertOutcome::Replaced {
            tracing::debug!(barcode = %record.barcode, "同键记录已整条替换");
        }

        self.audit.log_action(
            user,
            AuditAction::SubmitRecord,
            Some(format!(
                "Submitted inbound record for barcode: {}",
                record.barcode
            )),
        );

        Ok(record)
    }

    /// 指定日期的记录 (存储顺序)
    pub fn list_records(&self, date: &str) -> ApiResult<Vec<InboundRecord>> {
        let date_key = normalize_date_key(date)?;
        Ok(self.inventory.list_records(&date_key)?)
    }

    /// 指定日期的完成状态
    pub fn completion_status(&self, date: &str) -> ApiResult<bool> {
        let date_key = normalize_date_key(date)?;
        Ok(self.inventory.completion_status(&date_key)?)
    }

    /// 日期级备注 (取该日期第一条记录的备注)
    pub fn date_notes(&self, date: &str) -> ApiResult<Option<String>> {
        let date_key = normalize_date_key(date)?;
        Ok(self
            .inventory
            .list_records(&date_key)?
            .into_iter()
            .next()
            .and_then(|r| r.notes))
    }

    /// 保存日期级备注
    ///
    /// 单个临界区内: 该日期已有记录 → 全部改写备注 (审计 update_notes);
    /// 无记录 → 写入 NOTES_<date> 备注载体 (审计 add_notes)
    pub fn save_date_notes(
        &self,
        user: &str,
        date: &str,
        notes: &str,
        is_complete: bool,
    ) -> ApiResult<NotesUpdate> {
        let date_key = normalize_date_key(date)?;
        self.require_batch(&date_key)?;

        let composed = compose_notes(notes, is_complete);
        let update = self.inventory.apply_notes_for_date(&date_key, &composed, || {
            InboundRecord::notes_carrier(&date_key, composed.clone(), user)
        })?;

        let (action, verb) = if update.created_carrier {
            (AuditAction::AddNotes, "Added")
        } else {
            (AuditAction::UpdateNotes, "Updated")
        };
        self.audit.log_action(
            user,
            action,
            Some(format!("{} notes for {}: {}", verb, date_key, notes)),
        );

        Ok(update)
    }

    fn require_batch(&self, date_key: &str) -> ApiResult<Batch> {
        self.inventory
            .find_batch_by_date(date_key)?
            .ok_or_else(|| ApiError::NotFound(format!("日期{}没有批次", date_key)))
    }
}
