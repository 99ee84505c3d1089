// ==========================================
// 入库追踪系统 - 批次管理 API
// ==========================================
// 职责: 批次创建、查询, 日期完成状态汇总
// 审计: add_batch
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::normalize_date_key;
use crate::domain::batch::dedup_skus;
use crate::domain::{AuditAction, Batch};
use crate::engine::completion::CompletionEvaluator;
use crate::repository::inventory_repo::InventoryRepository;
use crate::services::AuditSink;

// ==========================================
// BatchApi - 批次管理 API
// ==========================================

/// 批次管理API
///
/// 职责：
/// 1. 创建批次 (校验日期与SKU)
/// 2. 批次列表
/// 3. 批次日期 → 完成状态
pub struct BatchApi {
    inventory: Arc<InventoryRepository>,
    audit: AuditSink,
    evaluator: CompletionEvaluator,
}

impl BatchApi {
    pub fn new(inventory: Arc<InventoryRepository>, audit: AuditSink) -> Self {
        Self {
            inventory,
            audit,
            evaluator: CompletionEvaluator::new(),
        }
    }

    /// 创建批次
    ///
    /// # 参数
    /// - user: 操作人
    /// - date: 日期键 (DD-MM-YYYY), 写入前规范化为两位日/月
    /// - skus: 预期 SKU, 去空白、按首次出现顺序去重
    ///
    /// # 返回
    /// - Ok(Batch): 已写入的批次
    /// - Err(ApiError): 日期非法、无有效SKU、存储失败
    pub fn create_batch(&self, user: &str, date: &str, skus: Vec<String>) -> ApiResult<Batch> {
        let date_key = normalize_date_key(date)?;

        let skus = dedup_skus(skus);
        if skus.is_empty() {
            return Err(ApiError::ValidationError(
                "批次至少需要一个非空SKU".to_string(),
            ));
        }

        let batch = Batch::new(date_key.clone(), skus, user);
        self.inventory.append_batch(batch.clone())?;

        self.audit.log_action(
            user,
            AuditAction::AddBatch,
            Some(format!(
                "Added batch for {} with {} SKUs",
                date_key,
                batch.skus.len()
            )),
        );

        Ok(batch)
    }

    /// 全部批次 (存储顺序)
    pub fn list_batches(&self) -> ApiResult<Vec<Batch>> {
        Ok(self.inventory.list_batches()?)
    }

    /// 批次日期 → 完成状态
    ///
    /// 批次与记录各加载一次
    pub fn completion_map(&self) -> ApiResult<BTreeMap<String, bool>> {
        let dates = self.inventory.batch_repo().list_dates()?;
        let records = self.inventory.record_repo().list_all()?;
        Ok(self.evaluator.build_status_map(&dates, &records))
    }
}
