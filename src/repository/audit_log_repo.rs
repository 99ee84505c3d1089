// ==========================================
// 入库追踪系统 - 审计日志数据仓储
// ==========================================
// 集合: audit-logs
// 红线: 只追加, 写入后不可修改
// ==========================================

mod core;
mod queries;


pub use core::AuditLogRepository;
pub(crate) use queries::sort_newest_first;
