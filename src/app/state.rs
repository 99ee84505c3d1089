// ==========================================
// 入库追踪系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约束: 必须在 tokio 运行时内创建 (审计写入任务随之启动)
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{AuditApi, BatchApi, InboundApi, InboundFormValidator};
use crate::config::config_manager::{ConfigManager, TrackerConfig};
use crate::repository::inventory_repo::InventoryRepository;
use crate::services::AuditSink;
use crate::store::DocumentStore;

/// 数据目录环境变量
pub const DATA_DIR_ENV: &str = "INBOUND_TRACKER_DATA_DIR";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 生效配置
    pub config: TrackerConfig,

    /// 批次管理API
    pub batch_api: Arc<BatchApi>,

    /// 入库录入API
    pub inbound_api: Arc<InboundApi>,

    /// 审计日志API
    pub audit_api: Arc<AuditApi>,

    /// 库存仓储门面
    pub inventory: Arc<InventoryRepository>,

    /// 审计写入器
    pub audit_sink: AuditSink,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - config: 系统配置 (data_dir 为集合文件目录)
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开文档存储 (目录不存在时创建)
    /// 2. 初始化仓储与审计写入任务
    /// 3. 创建所有API实例
    pub fn new(config: TrackerConfig) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据目录: {}", config.data_dir.display());

        let store = DocumentStore::open(&config.data_dir)
            .map_err(|e| format!("无法打开数据目录: {}", e))?;

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let inventory = Arc::new(InventoryRepository::new(&store));

        // ==========================================
        // 初始化审计写入任务
        // ==========================================
        let audit_sink = AuditSink::spawn(inventory.audit_repo(), config.audit_queue_capacity);

        // ==========================================
        // 初始化API层
        // ==========================================
        let validator = InboundFormValidator::new(config.validation_mode);
        let batch_api = Arc::new(BatchApi::new(inventory.clone(), audit_sink.clone()));
        let inbound_api = Arc::new(InboundApi::new(
            inventory.clone(),
            audit_sink.clone(),
            validator,
        ));
        let audit_api = Arc::new(AuditApi::new(inventory.clone(), audit_sink.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            config,
            batch_api,
            inbound_api,
            audit_api,
            inventory,
            audit_sink,
        })
    }

    /// 从数据目录加载配置并创建
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, String> {
        let manager = ConfigManager::new(data_dir.as_ref());
        let config = manager
            .load()
            .map_err(|e| format!("无法加载配置: {}", e))?;
        Self::new(config)
    }

    /// 排空审计队列并停止写入任务
    pub async fn shutdown(&self) {
        self.audit_sink.flush().await;
        self.audit_sink.shutdown().await;
    }
}

/// 默认数据目录
///
/// 优先级:
/// 1. 环境变量 INBOUND_TRACKER_DATA_DIR
/// 2. 用户数据目录/inbound-tracker (开发构建为 inbound-tracker-dev)
/// 3. ./inbound_tracker_data
pub fn get_default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(DATA_DIR_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::data_dir() {
        Some(data_dir) => {
            // 开发环境使用独立目录，避免污染生产数据
            #[cfg(debug_assertions)]
            {
                data_dir.join("inbound-tracker-dev")
            }

            #[cfg(not(debug_assertions))]
            {
                data_dir.join("inbound-tracker")
            }
        }
        None => PathBuf::from("./inbound_tracker_data"),
    }
}
