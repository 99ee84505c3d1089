// ==========================================
// 入库追踪系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约束: 存储 I/O 与序列化错误必须向上传播, 不得吞掉
// ==========================================

use std::path::{Path, PathBuf};
use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 并发控制错误 =====
    #[error("集合锁获取失败: {0}")]
    LockError(String),

    // ===== 存储错误 =====
    #[error("存储 I/O 失败 (path={path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("集合序列化失败 (collection={collection}): {source}")]
    Serialization {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    // ===== 数据错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("时间戳无法解析: {0}")]
    InvalidTimestamp(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    /// 构造带路径的 I/O 错误
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        RepositoryError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
