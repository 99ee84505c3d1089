// ==========================================
// 入库追踪系统 - 配置层
// ==========================================
// 职责: 系统配置加载/保存
// 存储: tracker_config.json
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{ConfigManager, TrackerConfig, CONFIG_FILE};
