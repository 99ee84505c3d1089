// ==========================================
// 入库追踪系统 - 审计日志领域模型
// ==========================================
// 红线: 只追加, 写入后不可修改
// 用途: 用户操作追踪
// ==========================================

use crate::domain::serde_compat::deserialize_optional_id;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// AuditLog - 审计日志
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub created_by: String,
    pub action: String,
    #[serde(default)]
    pub timestamp: Option<String>, // RFC 3339
    #[serde(default)]
    pub details: Option<String>,
}

// ==========================================
// AuditAction - 操作标签
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    Login,
    Logout,
    AddBatch,
    SelectDate,
    ScanBarcode,
    ScanExistingBarcode,
    SubmitRecord,
    UpdateNotes,
    AddNotes,
    Navigate,
}

impl AuditAction {
    /// 存储标签
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Login => "login",
            AuditAction::Logout => "logout",
            AuditAction::AddBatch => "add_batch",
            AuditAction::SelectDate => "select_date",
            AuditAction::ScanBarcode => "scan_barcode",
            AuditAction::ScanExistingBarcode => "scan_existing_barcode",
            AuditAction::SubmitRecord => "submit_record",
            AuditAction::UpdateNotes => "update_notes",
            AuditAction::AddNotes => "add_notes",
            AuditAction::Navigate => "navigate",
        }
    }

    /// 从存储标签解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "login" => Some(AuditAction::Login),
            "logout" => Some(AuditAction::Logout),
            "add_batch" => Some(AuditAction::AddBatch),
            "select_date" => Some(AuditAction::SelectDate),
            "scan_barcode" => Some(AuditAction::ScanBarcode),
            "scan_existing_barcode" => Some(AuditAction::ScanExistingBarcode),
            "submit_record" => Some(AuditAction::SubmitRecord),
            "update_notes" => Some(AuditAction::UpdateNotes),
            "add_notes" => Some(AuditAction::AddNotes),
            "navigate" => Some(AuditAction::Navigate),
            _ => None,
        }
    }
}

impl AuditLog {
    /// 创建新的审计日志 (时间戳取当前 UTC)
    pub fn new(created_by: impl Into<String>, action: &str, details: Option<String>) -> Self {
        Self {
            id: Some(Uuid::new_v4().to_string()),
            created_by: created_by.into(),
            action: action.to_string(),
            timestamp: Some(Utc::now().to_rfc3339()),
            details,
        }
    }

    /// 解析时间戳
    ///
    /// # 返回
    /// - Ok(None): 无时间戳 (旧数据)
    /// - Ok(Some(ts)): 解析成功
    /// - Err: 时间戳格式错误 (不回退为当前时间)
    pub fn parsed_timestamp(&self) -> Result<Option<DateTime<FixedOffset>>, chrono::ParseError> {
        self.timestamp
            .as_deref()
            .map(DateTime::parse_from_rfc3339)
            .transpose()
    }
}
