use super::core::AuditLogRepository;
use crate::domain::AuditLog;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, FixedOffset};

impl AuditLogRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 全部审计日志 (存储顺序)
    pub fn list_all(&self) -> RepositoryResult<Vec<AuditLog>> {
        self.collection.load()
    }

    /// 指定操作人的日志 (存储顺序)
    pub fn find_by_actor(&self, actor: &str) -> RepositoryResult<Vec<AuditLog>> {
        Ok(self
            .collection
            .load()?
            .into_iter()
            .filter(|l| l.created_by == actor)
            .collect())
    }

    /// 指定操作标签的日志 (存储顺序)
    pub fn find_by_action(&self, action: &str) -> RepositoryResult<Vec<AuditLog>> {
        Ok(self
            .collection
            .load()?
            .into_iter()
            .filter(|l| l.action == action)
            .collect())
    }

    /// 最近的日志 (按时间戳倒序, 无时间戳的旧数据排最后)
    ///
    /// 时间戳无法解析时返回错误, 不以当前时间代替
    pub fn find_recent(&self, limit: usize) -> RepositoryResult<Vec<AuditLog>> {
        let mut logs = sort_newest_first(self.collection.load()?)?;
        logs.truncate(limit);
        Ok(logs)
    }
}

/// 按时间戳倒序排列 (稳定排序)
pub(crate) fn sort_newest_first(logs: Vec<AuditLog>) -> RepositoryResult<Vec<AuditLog>> {
    let mut keyed: Vec<(Option<DateTime<FixedOffset>>, AuditLog)> = logs
        .into_iter()
        .map(|log| {
            let ts = log.parsed_timestamp().map_err(|e| {
                RepositoryError::InvalidTimestamp(format!(
                    "审计日志 id={:?}, timestamp={:?}: {}",
                    log.id, log.timestamp, e
                ))
            })?;
            Ok((ts, log))
        })
        .collect::<RepositoryResult<_>>()?;

    // None < Some, 倒序后无时间戳的记录落在末尾
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(keyed.into_iter().map(|(_, log)| log).collect())
}
