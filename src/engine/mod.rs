// ==========================================
// 入库追踪系统 - 引擎层
// ==========================================
// 职责: 纯计算规则 (分仓、完成状态)
// 红线: 引擎不直接访问存储
// ==========================================

pub mod allocation;
pub mod completion;

pub use allocation::{AllocationCalculator, AllocationInput, AllocationResult};
pub use completion::{is_date_complete, CompletionEvaluator};
