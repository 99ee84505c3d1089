// ==========================================
// 入库追踪系统 - 文档存储
// ==========================================
// 目标:
// - 每个集合一个 JSON 文件, 整体读取、整体覆写
// - 覆写原子化: 同目录临时文件 → fsync → rename → fsync 目录
// - 每个集合一把锁, 所有读改写在锁内完成
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::NamedTempFile;

use crate::domain::{AuditLog, Batch, InboundRecord};

/// 批次集合文件名
pub const BATCHES_FILE: &str = "batches.json";

/// 入库记录集合文件名
pub const INBOUND_RECORDS_FILE: &str = "inbound_records.json";

/// 审计日志集合文件名
pub const AUDIT_LOGS_FILE: &str = "audit_logs.json";

// ==========================================
// CollectionName - 集合标识
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Batches,
    InboundRecords,
    AuditLogs,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Batches => "batches",
            CollectionName::InboundRecords => "inbound-records",
            CollectionName::AuditLogs => "audit-logs",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            CollectionName::Batches => BATCHES_FILE,
            CollectionName::InboundRecords => INBOUND_RECORDS_FILE,
            CollectionName::AuditLogs => AUDIT_LOGS_FILE,
        }
    }
}

// ==========================================
// Collection<T> - 单个文档集合
// ==========================================
pub struct Collection<T> {
    name: CollectionName,
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    fn new(dir: &Path, name: CollectionName) -> Self {
        Self {
            name,
            path: dir.join(name.file_name()),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> CollectionName {
        self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_lock(&self) -> RepositoryResult<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|e| RepositoryError::LockError(format!("{}: {}", self.name.as_str(), e)))
    }

    /// 读取整个集合 (一致性快照)
    ///
    /// 文件不存在时返回空集合, 不视为错误
    pub fn load(&self) -> RepositoryResult<Vec<T>> {
        let _guard = self.get_lock()?;
        self.load_unlocked()
    }

    /// 整体覆写集合
    pub fn save(&self, items: &[T]) -> RepositoryResult<()> {
        let _guard = self.get_lock()?;
        self.save_unlocked(items)
    }

    /// 锁内完成 读 → 改 → 写
    ///
    /// 闭包返回错误时不写盘
    pub fn update<R, F>(&self, f: F) -> RepositoryResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> RepositoryResult<R>,
    {
        let _guard = self.get_lock()?;
        let mut items = self.load_unlocked()?;
        let result = f(&mut items)?;
        self.save_unlocked(&items)?;
        Ok(result)
    }

    fn load_unlocked(&self) -> RepositoryResult<Vec<T>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("集合文件不存在, 视为空集合: {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(RepositoryError::io(&self.path, e)),
        };

        let items: Vec<T> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            RepositoryError::Serialization {
                collection: self.name.as_str().to_string(),
                source: e,
            }
        })?;

        tracing::debug!(
            collection = self.name.as_str(),
            count = items.len(),
            "集合已加载"
        );
        Ok(items)
    }

    fn save_unlocked(&self, items: &[T]) -> RepositoryResult<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| RepositoryError::InternalError(format!(
                "集合路径无父目录: {}",
                self.path.display()
            )))?;

        let tmp = NamedTempFile::new_in(dir).map_err(|e| RepositoryError::io(dir, e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, items).map_err(|e| {
                RepositoryError::Serialization {
                    collection: self.name.as_str().to_string(),
                    source: e,
                }
            })?;
            writer.flush().map_err(|e| RepositoryError::io(tmp.path(), e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| RepositoryError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| RepositoryError::io(&self.path, e.error))?;
        sync_dir(dir)?;

        tracing::debug!(
            collection = self.name.as_str(),
            count = items.len(),
            "集合已覆写"
        );
        Ok(())
    }
}

/// rename 落盘: 同步父目录项
#[cfg(unix)]
fn sync_dir(dir: &Path) -> RepositoryResult<()> {
    File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(|e| RepositoryError::io(dir, e))
}

// 非 unix 平台无法以文件句柄打开目录
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> RepositoryResult<()> {
    Ok(())
}

// ==========================================
// DocumentStore - 三个集合的持有者
// ==========================================
// 同一数据目录在进程内只应打开一次, 否则锁不共享
pub struct DocumentStore {
    dir: PathBuf,
    batches: Arc<Collection<Batch>>,
    inbound_records: Arc<Collection<InboundRecord>>,
    audit_logs: Arc<Collection<AuditLog>>,
}

impl DocumentStore {
    /// 打开数据目录 (不存在则创建)
    pub fn open(dir: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| RepositoryError::io(&dir, e))?;
        tracing::info!("文档存储已打开: {}", dir.display());

        Ok(Self {
            batches: Arc::new(Collection::new(&dir, CollectionName::Batches)),
            inbound_records: Arc::new(Collection::new(&dir, CollectionName::InboundRecords)),
            audit_logs: Arc::new(Collection::new(&dir, CollectionName::AuditLogs)),
            dir,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn batches(&self) -> Arc<Collection<Batch>> {
        self.batches.clone()
    }

    pub fn inbound_records(&self) -> Arc<Collection<InboundRecord>> {
        self.inbound_records.clone()
    }

    pub fn audit_logs(&self) -> Arc<Collection<AuditLog>> {
        self.audit_logs.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_log(actor: &str, action: &str) -> AuditLog {
        AuditLog::new(actor, action, Some(format!("{} did {}", actor, action)))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();
        assert!(store.batches().load().unwrap().is_empty());
        assert!(!store.batches().path().exists());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();
        let logs = vec![
            make_log("c", "login"),
            make_log("a", "add_batch"),
            make_log("b", "logout"),
        ];

        store.audit_logs().save(&logs).unwrap();
        let loaded = store.audit_logs().load().unwrap();
        assert_eq!(loaded, logs);
    }

    #[test]
    fn test_save_is_full_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();
        let audit = store.audit_logs();

        audit.save(&[make_log("a", "login"), make_log("b", "login")]).unwrap();
        audit.save(&[make_log("c", "logout")]).unwrap();

        let loaded = audit.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].created_by, "c");
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();
        store.audit_logs().save(&[make_log("a", "login")]).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec![AUDIT_LOGS_FILE.to_string()]);
    }

    #[test]
    fn test_repeated_saves_replace_file_in_place() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();
        let audit = store.audit_logs();

        for i in 0..5 {
            audit.save(&vec![make_log("a", "login"); i + 1]).unwrap();
        }
        sync_dir(dir.path()).unwrap();

        assert_eq!(audit.load().unwrap().len(), 5);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_corrupt_file_is_surfaced() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(BATCHES_FILE), "[{ not json").unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        let err = store.batches().load().unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization { .. }));
    }

    #[test]
    fn test_update_error_does_not_write() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();
        let audit = store.audit_logs();
        audit.save(&[make_log("a", "login")]).unwrap();

        let result: RepositoryResult<()> = audit.update(|items| {
            items.clear();
            Err(RepositoryError::ValidationError("abort".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(audit.load().unwrap().len(), 1);
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = DocumentStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }
}
