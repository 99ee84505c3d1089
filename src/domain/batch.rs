// ==========================================
// 入库追踪系统 - 批次领域模型
// ==========================================
// 批次 = 某一日期预期入库的 SKU 集合
// 红线: 创建后不可修改, 无编辑路径
// ==========================================

use crate::domain::serde_compat::deserialize_optional_id;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Batch - 批次
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub date: String,               // 日期键 (DD-MM-YYYY)
    pub skus: Vec<String>,          // 预期 SKU (有序)
    pub created_by: String,
    #[serde(default)]
    pub created_at: Option<String>, // RFC 3339
}

impl Batch {
    /// 创建新批次
    ///
    /// SKU 按首次出现顺序去重, 空白条码被丢弃
    pub fn new(date: impl Into<String>, skus: Vec<String>, created_by: impl Into<String>) -> Self {
        Self {
            id: Some(Uuid::new_v4().to_string()),
            date: date.into(),
            skus: dedup_skus(skus),
            created_by: created_by.into(),
            created_at: Some(Utc::now().to_rfc3339()),
        }
    }

    /// 条码是否属于该批次
    pub fn contains_sku(&self, barcode: &str) -> bool {
        self.skus.iter().any(|s| s == barcode)
    }
}

/// SKU 去重 (保持首次出现顺序)
pub fn dedup_skus(skus: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    skus.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_batch_dedups_skus_in_order() {
        let batch = Batch::new(
            "15-01-2025",
            vec![
                "111".to_string(),
                "222".to_string(),
                "111".to_string(),
                " ".to_string(),
                "333".to_string(),
            ],
            "alice",
        );
        assert_eq!(batch.skus, vec!["111", "222", "333"]);
        assert!(batch.id.is_some());
        assert!(batch.created_at.is_some());
        assert!(batch.contains_sku("222"));
        assert!(!batch.contains_sku("444"));
    }

    #[test]
    fn test_legacy_batch_without_id_parses() {
        let json = r#"{"date":"01-02-2025","skus":["1","1"],"created_by":"bob","extra":true}"#;
        let batch: Batch = serde_json::from_str(json).unwrap();
        assert!(batch.id.is_none());
        // 读取路径不去重, 原样保留
        assert_eq!(batch.skus.len(), 2);
    }
}
