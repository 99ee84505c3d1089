// ==========================================
// 入库追踪系统 - 会话上下文
// ==========================================
// 职责: 当前操作人、选中日期、选中批次
// 约束: 不持有存储句柄; 审计经由调用方传入的 AuditSink
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{AuditAction, Batch};
use crate::services::AuditSink;

/// 会话上下文 (每个界面会话一份)
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current_user: Option<String>,
    selected_date: Option<String>,
    selected_batch: Option<Batch>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登录
    pub fn login(&mut self, user: &str, audit: &AuditSink) -> ApiResult<()> {
        let user = user.trim();
        if user.is_empty() {
            return Err(ApiError::field("user", "必填"));
        }

        self.current_user = Some(user.to_string());
        audit.log_action(user, AuditAction::Login, Some(format!("User {} logged in", user)));
        Ok(())
    }

    /// 登出 (清空全部选中状态)
    pub fn logout(&mut self, audit: &AuditSink) {
        if let Some(user) = self.current_user.take() {
            audit.log_action(&user, AuditAction::Logout, Some(format!("User {} logged out", user)));
        }
        self.selected_date = None;
        self.selected_batch = None;
    }

    pub fn select_date(&mut self, date: &str, audit: &AuditSink) -> ApiResult<()> {
        let user = self.require_user()?.to_string();
        self.selected_date = Some(date.to_string());
        audit.log_action(&user, AuditAction::SelectDate, Some(format!("Selected date: {}", date)));
        Ok(())
    }

    pub fn select_batch(&mut self, batch: Batch) {
        self.selected_batch = Some(batch);
    }

    pub fn clear_selected_batch(&mut self) {
        self.selected_batch = None;
    }

    /// 记录界面导航
    pub fn navigate(&self, description: &str, audit: &AuditSink) -> ApiResult<()> {
        let user = self.require_user()?;
        audit.log_action(user, AuditAction::Navigate, Some(description.to_string()));
        Ok(())
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn selected_date(&self) -> Option<&str> {
        self.selected_date.as_deref()
    }

    pub fn selected_batch(&self) -> Option<&Batch> {
        self.selected_batch.as_ref()
    }

    /// 当前操作人 (未登录时报错)
    pub fn require_user(&self) -> ApiResult<&str> {
        self.current_user
            .as_deref()
            .ok_or_else(|| ApiError::ValidationError("未登录".to_string()))
    }
}
