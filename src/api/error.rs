// ==========================================
// 入库追踪系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 将Repository错误转换为用户可读的错误消息
// 约束: 所有错误信息必须包含显式原因
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误 (写入存储前拒绝)
    // ==========================================
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("字段{field}错误: {message}")]
    FieldValueError { field: String, message: String },

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("时间戳无法解析: {0}")]
    InvalidTimestamp(String),

    // ==========================================
    // 存储错误
    // ==========================================
    #[error("存储错误: {0}")]
    StorageError(String),

    #[error("存储锁获取失败: {0}")]
    LockError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 构造字段错误
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        ApiError::FieldValueError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::LockError(msg) => ApiError::LockError(msg),
            e @ RepositoryError::Io { .. } => ApiError::StorageError(e.to_string()),
            e @ RepositoryError::Serialization { .. } => ApiError::StorageError(e.to_string()),
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::InvalidTimestamp(msg) => ApiError::InvalidTimestamp(msg),
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::NotFound {
            entity: "Batch".to_string(),
            id: "15-01-2025".to_string(),
        }
        .into();
        assert!(matches!(api_err, ApiError::NotFound(ref m) if m.contains("15-01-2025")));

        let api_err: ApiError = RepositoryError::io(
            Path::new("/data/batches.json"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        )
        .into();
        assert!(matches!(api_err, ApiError::StorageError(ref m) if m.contains("batches.json")));

        let api_err: ApiError = RepositoryError::InvalidTimestamp("bad".to_string()).into();
        assert!(matches!(api_err, ApiError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_field_error_message() {
        let err = ApiError::field("box_count", "必须为非负整数");
        assert_eq!(err.to_string(), "字段box_count错误: 必须为非负整数");
    }
}
