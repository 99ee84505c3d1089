// ==========================================
// 入库追踪系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod audit_log;
pub mod batch;
pub mod inbound_record;
pub mod serde_compat;
pub mod types;

// 重导出核心类型
pub use audit_log::{AuditAction, AuditLog};
pub use batch::Batch;
pub use inbound_record::InboundRecord;
pub use types::{BoxSize, Subcategory};
