// ==========================================
// 入库追踪系统 - 批次数据仓储
// ==========================================
// 集合: batches
// 红线: 只追加, 不按日期去重, 无编辑路径
// ==========================================

use crate::domain::Batch;
use crate::repository::error::RepositoryResult;
use crate::store::Collection;
use std::sync::Arc;

// ==========================================
// BatchRepository - 批次仓储
// ==========================================
pub struct BatchRepository {
    collection: Arc<Collection<Batch>>,
}

impl BatchRepository {
    pub fn new(collection: Arc<Collection<Batch>>) -> Self {
        Self { collection }
    }

    /// 全部批次 (存储顺序)
    pub fn list_all(&self) -> RepositoryResult<Vec<Batch>> {
        self.collection.load()
    }

    /// 追加批次 (同日期允许重复)
    pub fn append(&self, batch: Batch) -> RepositoryResult<()> {
        let date = batch.date.clone();
        let sku_count = batch.skus.len();
        let total = self.collection.update(move |items| {
            items.push(batch);
            Ok(items.len())
        })?;

        tracing::info!(date = %date, sku_count, total, "批次已追加");
        Ok(())
    }

    /// 按日期查找批次 (存储顺序第一条)
    pub fn find_by_date(&self, date: &str) -> RepositoryResult<Option<Batch>> {
        Ok(self.collection.load()?.into_iter().find(|b| b.date == date))
    }

    /// 已知批次日期 (去重, 保持首次出现顺序)
    pub fn list_dates(&self) -> RepositoryResult<Vec<String>> {
        let mut dates: Vec<String> = Vec::new();
        for batch in self.collection.load()? {
            if !dates.contains(&batch.date) {
                dates.push(batch.date);
            }
        }
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocumentStore;
    use tempfile::TempDir;

    fn setup() -> (TempDir, BatchRepository) {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();
        (dir, BatchRepository::new(store.batches()))
    }

    #[test]
    fn test_append_does_not_dedup_on_date() {
        let (_dir, repo) = setup();
        repo.append(Batch::new("15-01-2025", vec!["1".into()], "alice")).unwrap();
        repo.append(Batch::new("15-01-2025", vec!["2".into()], "bob")).unwrap();

        let batches = repo.list_all().unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(repo.list_dates().unwrap(), vec!["15-01-2025"]);

        let first = repo.find_by_date("15-01-2025").unwrap().unwrap();
        assert_eq!(first.created_by, "alice");
    }

    #[test]
    fn test_find_by_date_missing() {
        let (_dir, repo) = setup();
        assert!(repo.find_by_date("01-01-2000").unwrap().is_none());
    }
}
