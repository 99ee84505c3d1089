// ==========================================
// 入库追踪系统 - 配置管理器
// ==========================================
// 职责: 配置加载、保存
// 存储: 数据目录下的 tracker_config.json
// 规则: 文件不存在 → 默认值; 格式错误 → 报错 (不静默回退)
// ==========================================

use crate::api::validator::ValidationMode;
use crate::services::DEFAULT_AUDIT_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 配置文件名
pub const CONFIG_FILE: &str = "tracker_config.json";

// ==========================================
// TrackerConfig - 系统配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// 数据目录 (集合文件所在目录); 由宿主提供, 不写入配置文件
    #[serde(skip)]
    pub data_dir: PathBuf,

    /// 审计队列容量
    pub audit_queue_capacity: usize,

    /// 录入校验模式 (散箱个数多于箱数时的处理)
    pub validation_mode: ValidationMode,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            audit_queue_capacity: DEFAULT_AUDIT_QUEUE_CAPACITY,
            validation_mode: ValidationMode::Strict,
        }
    }
}

impl TrackerConfig {
    /// 指定数据目录的默认配置
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    data_dir: PathBuf,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - data_dir: 数据目录
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// 读取配置
    ///
    /// # 返回
    /// - Ok(TrackerConfig): 文件内容 (缺失字段取默认值), 文件不存在时为默认配置
    /// - Err: 读取失败或 JSON 格式错误
    pub fn load(&self) -> Result<TrackerConfig, Box<dyn Error + Send + Sync>> {
        let path = self.config_path();
        let mut config = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<TrackerConfig>(&raw)
                .map_err(|e| format!("配置文件格式错误 ({}): {}", path.display(), e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("配置文件不存在, 使用默认配置: {}", path.display());
                TrackerConfig::default()
            }
            Err(e) => return Err(format!("配置文件读取失败 ({}): {}", path.display(), e).into()),
        };

        config.data_dir = self.data_dir.clone();
        tracing::info!(
            audit_queue_capacity = config.audit_queue_capacity,
            validation_mode = ?config.validation_mode,
            "配置已加载"
        );
        Ok(config)
    }

    /// 保存配置 (原子覆写)
    pub fn save(&self, config: &TrackerConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
        fs::create_dir_all(&self.data_dir)?;
        let tmp = tempfile::NamedTempFile::new_in(&self.data_dir)?;
        serde_json::to_writer_pretty(tmp.as_file(), config)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.config_path()).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigManager::new(dir.path()).load().unwrap();
        assert_eq!(config.audit_queue_capacity, DEFAULT_AUDIT_QUEUE_CAPACITY);
        assert_eq!(config.validation_mode, ValidationMode::Strict);
        assert_eq!(config.data_dir, dir.path());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::new(dir.path());
        let mut config = TrackerConfig::with_data_dir(dir.path());
        config.audit_queue_capacity = 8;
        config.validation_mode = ValidationMode::Lenient;

        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{"audit_queue_capacity": 3}"#).unwrap();

        let config = ConfigManager::new(dir.path()).load().unwrap();
        assert_eq!(config.audit_queue_capacity, 3);
        assert_eq!(config.validation_mode, ValidationMode::Strict);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ nope").unwrap();
        assert!(ConfigManager::new(dir.path()).load().is_err());
    }
}
