// ==========================================
// 入库追踪系统 - 服务层
// ==========================================
// 职责: 脱离调用方关键路径运行的后台服务
// ==========================================

pub mod audit_sink;

pub use audit_sink::{AuditSink, AuditWriter, DEFAULT_AUDIT_QUEUE_CAPACITY};
