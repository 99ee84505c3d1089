use crate::domain::AuditLog;
use crate::repository::error::RepositoryResult;
use crate::store::Collection;
use std::sync::Arc;

// ==========================================
// AuditLogRepository - 审计日志仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
pub struct AuditLogRepository {
    pub(super) collection: Arc<Collection<AuditLog>>,
}

impl AuditLogRepository {
    /// 创建新的审计日志仓储
    pub fn new(collection: Arc<Collection<AuditLog>>) -> Self {
        Self { collection }
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 追加审计日志
    ///
    /// # 返回
    /// - `Ok(total)`: 追加后的日志总数
    /// - `Err(...)`: 存储错误
    pub fn append(&self, log: AuditLog) -> RepositoryResult<usize> {
        self.collection.update(move |items| {
            items.push(log);
            Ok(items.len())
        })
    }

    /// 批量追加审计日志 (一次读改写)
    pub fn batch_append(&self, logs: Vec<AuditLog>) -> RepositoryResult<usize> {
        let count = logs.len();
        if count == 0 {
            return Ok(0);
        }
        self.collection.update(move |items| {
            items.extend(logs);
            Ok(count)
        })
    }
}
