// ==========================================
// 入库追踪系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供集合级数据访问接口, 屏蔽文件存储细节
// 约束: 同一集合的所有修改串行化 (集合锁)
// ==========================================

pub mod audit_log_repo;
pub mod batch_repo;
pub mod error;
pub mod inbound_record_repo;
pub mod inventory_repo;

// 重导出核心仓储
pub use audit_log_repo::AuditLogRepository;
pub use batch_repo::BatchRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use inbound_record_repo::{InboundRecordRepository, NotesUpdate, UpsertOutcome};
pub use inventory_repo::InventoryRepository;
