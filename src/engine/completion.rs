// ==========================================
// 入库追踪系统 - 完成状态判定引擎
// ==========================================
// 规则: 某日期任一记录备注含 "incomplete" (大小写不敏感) → 未完成
//       否则 (含零记录) → 已完成
// 约束: 该规则是历史数据的兼容契约, 不得改为结构化字段
// ==========================================

use crate::domain::InboundRecord;
use std::collections::{BTreeMap, HashSet};
use tracing::instrument;

/// 单日期判定
pub fn is_date_complete<'a, I>(records: I) -> bool
where
    I: IntoIterator<Item = &'a InboundRecord>,
{
    !records.into_iter().any(|r| r.has_incomplete_marker())
}

// ==========================================
// CompletionEvaluator - 完成状态判定器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionEvaluator;

impl CompletionEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// 指定日期的完成状态
    pub fn status_for_date(&self, date: &str, records: &[InboundRecord]) -> bool {
        is_date_complete(records.iter().filter(|r| r.date == date))
    }

    /// 构建 日期 → 完成状态 映射
    ///
    /// 单次遍历记录集合找出未完成日期, 再对每个批次日期查表
    #[instrument(skip(self, batch_dates, records), fields(dates = batch_dates.len(), records = records.len()))]
    pub fn build_status_map(
        &self,
        batch_dates: &[String],
        records: &[InboundRecord],
    ) -> BTreeMap<String, bool> {
        let incomplete: HashSet<&str> = records
            .iter()
            .filter(|r| r.has_incomplete_marker())
            .map(|r| r.date.as_str())
            .collect();

        batch_dates
            .iter()
            .map(|date| (date.clone(), !incomplete.contains(date.as_str())))
            .collect()
    }
}
