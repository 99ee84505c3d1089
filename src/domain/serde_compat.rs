// ==========================================
// 入库追踪系统 - 历史 JSON 兼容工具
// ==========================================
// 职责: 兼容旧版数据文件中的字段格式
// 说明: 旧版 id 为可空整数, 新版统一为 UUID 字符串
// ==========================================

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

/// 反序列化实体 id
///
/// - 缺失 / null → None
/// - 整数 (旧版) → 十进制字符串
/// - 字符串 → 原样
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawId> = Option::deserialize(deserializer)?;
    Ok(raw.map(|id| match id {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        id: Option<String>,
    }

    #[test]
    fn test_accepts_legacy_numeric_id() {
        let h: Holder = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(h.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_accepts_null_and_missing() {
        let h: Holder = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert!(h.id.is_none());
        let h: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(h.id.is_none());
    }

    #[test]
    fn test_accepts_string_id() {
        let h: Holder = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(h.id.as_deref(), Some("abc"));
    }
}
