use super::InboundRecordRepository;
use crate::domain::InboundRecord;
use crate::repository::error::RepositoryResult;

impl InboundRecordRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 全部记录 (存储顺序)
    pub fn list_all(&self) -> RepositoryResult<Vec<InboundRecord>> {
        self.collection.load()
    }

    /// 指定日期的全部记录 (精确匹配)
    pub fn find_by_date(&self, date: &str) -> RepositoryResult<Vec<InboundRecord>> {
        let records: Vec<InboundRecord> = self
            .collection
            .load()?
            .into_iter()
            .filter(|r| r.date == date)
            .collect();

        tracing::debug!(date = %date, count = records.len(), "按日期查询入库记录");
        Ok(records)
    }

    /// 按复合键查询
    pub fn find_by_key(&self, date: &str, barcode: &str) -> RepositoryResult<Option<InboundRecord>> {
        Ok(self
            .collection
            .load()?
            .into_iter()
            .find(|r| r.same_key(date, barcode)))
    }
}
