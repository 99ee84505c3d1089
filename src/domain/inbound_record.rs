// ==========================================
// 入库追踪系统 - 入库记录领域模型
// ==========================================
// 唯一键: (date, barcode), 冲突时整条替换
// 派生字段: last_4_barcode, total_unit_count, ftp_*/ocala_*
// ==========================================

use crate::domain::serde_compat::deserialize_optional_id;
use crate::domain::types::BoxSize;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 备注载体记录的条码前缀
pub const NOTES_BARCODE_PREFIX: &str = "NOTES_";

/// 未完成标记 (大小写不敏感子串匹配)
pub const INCOMPLETE_MARKER: &str = "incomplete";

/// 写入备注时追加的未完成后缀
pub const INCOMPLETE_SUFFIX: &str = " (incomplete)";

// ==========================================
// InboundRecord - 入库记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundRecord {
    // ===== 主键 =====
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub date: String,
    pub barcode: String,

    // ===== 录入字段 =====
    pub identifier: String,
    pub last_4_barcode: String,
    pub units_per_case: i32,
    pub box_count: i32,
    pub partial_case_1: i32,
    pub partial_case_2: i32,
    pub partial_case_3: i32,
    pub partial_case_4: i32,

    // ===== 派生字段 =====
    pub total_unit_count: i32,
    pub subcategory: String, // 品类代码, 未知代码原样保留
    pub ftp_cases: i32,
    pub ocala_cases: i32,
    pub ftp_units: i32,
    pub ocala_units: i32,

    // ===== 复核 =====
    pub box_size: BoxSize,
    pub verified_total_unit_count: i32,
    #[serde(default)]
    pub notes: Option<String>,

    // ===== 审计 =====
    pub created_by: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl InboundRecord {
    /// 构造日期级备注载体记录 (条码 = NOTES_<date>)
    ///
    /// 某日期尚无任何扫描记录时, 批次级备注挂在这条记录上
    pub fn notes_carrier(date: &str, notes: String, created_by: &str) -> Self {
        Self {
            id: Some(Uuid::new_v4().to_string()),
            date: date.to_string(),
            barcode: notes_carrier_barcode(date),
            identifier: String::new(),
            last_4_barcode: String::new(),
            units_per_case: 0,
            box_count: 0,
            partial_case_1: 0,
            partial_case_2: 0,
            partial_case_3: 0,
            partial_case_4: 0,
            total_unit_count: 0,
            subcategory: String::new(),
            ftp_cases: 0,
            ocala_cases: 0,
            ftp_units: 0,
            ocala_units: 0,
            box_size: BoxSize::Unspecified,
            verified_total_unit_count: 0,
            notes: Some(notes),
            created_by: created_by.to_string(),
            created_at: Some(Utc::now().to_rfc3339()),
        }
    }

    /// 是否为备注载体记录
    pub fn is_notes_carrier(&self) -> bool {
        self.barcode.starts_with(NOTES_BARCODE_PREFIX)
    }

    /// 复合键是否相同
    pub fn same_key(&self, date: &str, barcode: &str) -> bool {
        self.date == date && self.barcode == barcode
    }

    /// 备注是否带未完成标记
    pub fn has_incomplete_marker(&self) -> bool {
        self.notes
            .as_deref()
            .map(notes_mark_incomplete)
            .unwrap_or(false)
    }

    pub fn partials(&self) -> [i32; 4] {
        [
            self.partial_case_1,
            self.partial_case_2,
            self.partial_case_3,
            self.partial_case_4,
        ]
    }
}

/// 备注载体条码
pub fn notes_carrier_barcode(date: &str) -> String {
    format!("{}{}", NOTES_BARCODE_PREFIX, date)
}

/// 条码末 4 位 (不足 4 位时返回全部)
pub fn last_4(barcode: &str) -> String {
    let count = barcode.chars().count();
    barcode.chars().skip(count.saturating_sub(4)).collect()
}

/// 备注文本是否含未完成标记
pub fn notes_mark_incomplete(notes: &str) -> bool {
    notes.to_lowercase().contains(INCOMPLETE_MARKER)
}

/// 组装写入的备注: 未完成时追加后缀
pub fn compose_notes(notes: &str, is_complete: bool) -> String {
    if is_complete {
        notes.to_string()
    } else {
        format!("{}{}", notes, INCOMPLETE_SUFFIX)
    }
}
