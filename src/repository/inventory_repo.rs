// ==========================================
// 入库追踪系统 - 库存仓储门面
// ==========================================
// 职责: 对外暴露统一的仓储操作 (界面协作方只依赖此接口)
// 说明: 三个集合各自独立加锁, 门面本身无状态
// ==========================================

use crate::domain::{AuditLog, Batch, InboundRecord};
use crate::engine::completion::is_date_complete;
use crate::repository::audit_log_repo::AuditLogRepository;
use crate::repository::batch_repo::BatchRepository;
use crate::repository::error::RepositoryResult;
use crate::repository::inbound_record_repo::{InboundRecordRepository, NotesUpdate, UpsertOutcome};
use crate::store::DocumentStore;
use std::sync::Arc;

// ==========================================
// InventoryRepository - 库存仓储
// ==========================================
pub struct InventoryRepository {
    batch_repo: Arc<BatchRepository>,
    record_repo: Arc<InboundRecordRepository>,
    audit_repo: Arc<AuditLogRepository>,
}

impl InventoryRepository {
    /// 从文档存储创建
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            batch_repo: Arc::new(BatchRepository::new(store.batches())),
            record_repo: Arc::new(InboundRecordRepository::new(store.inbound_records())),
            audit_repo: Arc::new(AuditLogRepository::new(store.audit_logs())),
        }
    }

    pub fn batch_repo(&self) -> Arc<BatchRepository> {
        self.batch_repo.clone()
    }

    pub fn record_repo(&self) -> Arc<InboundRecordRepository> {
        self.record_repo.clone()
    }

    pub fn audit_repo(&self) -> Arc<AuditLogRepository> {
        self.audit_repo.clone()
    }

    // ==========================================
    // 批次
    // ==========================================

    pub fn list_batches(&self) -> RepositoryResult<Vec<Batch>> {
        self.batch_repo.list_all()
    }

    pub fn append_batch(&self, batch: Batch) -> RepositoryResult<()> {
        self.batch_repo.append(batch)
    }

    pub fn find_batch_by_date(&self, date: &str) -> RepositoryResult<Option<Batch>> {
        self.batch_repo.find_by_date(date)
    }

    // ==========================================
    // 入库记录
    // ==========================================

    pub fn list_records(&self, date: &str) -> RepositoryResult<Vec<InboundRecord>> {
        self.record_repo.find_by_date(date)
    }

    pub fn find_record(&self, date: &str, barcode: &str) -> RepositoryResult<Option<InboundRecord>> {
        self.record_repo.find_by_key(date, barcode)
    }

    pub fn upsert_record(&self, record: InboundRecord) -> RepositoryResult<UpsertOutcome> {
        self.record_repo.upsert(record)
    }

    /// 日期级备注改写 (单个临界区)
    pub fn apply_notes_for_date(
        &self,
        date: &str,
        notes: &str,
        carrier: impl FnOnce() -> InboundRecord,
    ) -> RepositoryResult<NotesUpdate> {
        self.record_repo.apply_notes_for_date(date, notes, carrier)
    }

    /// 完成状态
    ///
    /// - false: 该日期任一记录备注含 "incomplete" (大小写不敏感)
    /// - true: 其他情况, 包括零记录
    pub fn completion_status(&self, date: &str) -> RepositoryResult<bool> {
        let records = self.record_repo.find_by_date(date)?;
        Ok(is_date_complete(&records))
    }

    // ==========================================
    // 审计日志
    // ==========================================

    pub fn append_audit(&self, entry: AuditLog) -> RepositoryResult<()> {
        self.audit_repo.append(entry)?;
        Ok(())
    }

    pub fn list_audit(&self) -> RepositoryResult<Vec<AuditLog>> {
        self.audit_repo.list_all()
    }

    pub fn list_audit_by_actor(&self, actor: &str) -> RepositoryResult<Vec<AuditLog>> {
        self.audit_repo.find_by_actor(actor)
    }

    pub fn list_audit_recent(&self, limit: usize) -> RepositoryResult<Vec<AuditLog>> {
        self.audit_repo.find_recent(limit)
    }
}
