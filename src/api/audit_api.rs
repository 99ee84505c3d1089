// ==========================================
// 入库追踪系统 - 审计日志 API
// ==========================================
// 职责: 审计日志查询 (新 → 旧)
// 红线: 时间戳无法解析时报错, 不以当前时间代替
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::AuditLog;
use crate::repository::audit_log_repo::sort_newest_first;
use crate::repository::inventory_repo::InventoryRepository;
use crate::services::AuditSink;

/// 审计日志API
pub struct AuditApi {
    inventory: Arc<InventoryRepository>,
    audit: AuditSink,
}

impl AuditApi {
    pub fn new(inventory: Arc<InventoryRepository>, audit: AuditSink) -> Self {
        Self { inventory, audit }
    }

    /// 全部审计日志 (时间戳倒序)
    pub fn list_audit(&self) -> ApiResult<Vec<AuditLog>> {
        Ok(sort_newest_first(self.inventory.list_audit()?)?)
    }

    /// 指定操作人的审计日志 (时间戳倒序)
    pub fn list_by_actor(&self, user: &str) -> ApiResult<Vec<AuditLog>> {
        if user.trim().is_empty() {
            return Err(ApiError::field("user", "必填"));
        }
        Ok(sort_newest_first(self.inventory.list_audit_by_actor(user)?)?)
    }

    /// 最近 limit 条
    pub fn list_recent(&self, limit: usize) -> ApiResult<Vec<AuditLog>> {
        Ok(self.inventory.list_audit_recent(limit)?)
    }

    /// 记录界面侧操作 (登录、导航等)
    pub fn record(&self, user: &str, action: &str, details: Option<String>) {
        self.audit.log(user, action, details);
    }
}
