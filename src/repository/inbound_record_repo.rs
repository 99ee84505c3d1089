// ==========================================
// 入库追踪系统 - 入库记录数据仓储
// ==========================================
// 集合: inbound-records
// 唯一键: (date, barcode), 冲突时整条替换
// 红线: 日期级备注改写是单个临界区
// ==========================================

mod core;
mod queries;

#[cfg(test)]
mod tests;

use crate::domain::InboundRecord;
use crate::store::Collection;
use std::sync::Arc;

// ==========================================
// InboundRecordRepository - 入库记录仓储
// ==========================================
pub struct InboundRecordRepository {
    collection: Arc<Collection<InboundRecord>>,
}

impl InboundRecordRepository {
    /// 创建新的入库记录仓储
    pub fn new(collection: Arc<Collection<InboundRecord>>) -> Self {
        Self { collection }
    }
}

/// upsert 结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// 日期级备注改写结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotesUpdate {
    /// 被改写备注的记录数
    pub updated: usize,
    /// 是否新建了 NOTES_<date> 载体记录
    pub created_carrier: bool,
}
