// ==========================================
// 入库追踪系统 - 应用层
// ==========================================
// 职责: 组装存储、仓储、审计写入任务与API, 管理界面会话
// ==========================================

pub mod session;
pub mod state;

// 重导出
pub use session::SessionContext;
pub use state::{get_default_data_dir, AppState, DATA_DIR_ENV};
