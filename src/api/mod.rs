// ==========================================
// 入库追踪系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供界面协作方调用
// 约束: 校验在此层完成, 仓储层只接收合法数据
// ==========================================

pub mod audit_api;
pub mod batch_api;
pub mod error;
pub mod inbound_api;
pub mod validator;

// 重导出核心类型
pub use audit_api::AuditApi;
pub use batch_api::BatchApi;
pub use error::{ApiError, ApiResult};
pub use inbound_api::{InboundApi, ScanOutcome};
pub use validator::{InboundFormValidator, InboundRecordForm, ValidationMode};
