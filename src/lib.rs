// ==========================================
// 入库追踪系统 - 核心库
// ==========================================
// 范围: 本地文档存储、入库记录 upsert、分仓计算、完成状态判定、审计日志
// 界面层不在本库内, 只消费 api / app 暴露的接口
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 存储层 - JSON 文档集合 (原子覆写)
pub mod store;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 服务层 - 后台任务
pub mod services;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装与会话
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{BoxSize, Subcategory};

// 领域实体
pub use domain::{AuditAction, AuditLog, Batch, InboundRecord};

// 引擎
pub use engine::{AllocationCalculator, CompletionEvaluator};

// API
pub use api::{AuditApi, BatchApi, InboundApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "入库追踪系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
