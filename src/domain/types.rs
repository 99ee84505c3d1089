// ==========================================
// 入库追踪系统 - 领域类型定义
// ==========================================
// 职责: 品类 (Subcategory)、箱型 (BoxSize) 等枚举
// 约束: 序列化格式与历史 JSON 文件保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 品类 (Subcategory)
// ==========================================
// 固定 20 个品类, 每个品类对应一个分仓比例
// 存储格式: 大写代码字符串 (如 "FLOWER", "NON-CANNABIS")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subcategory {
    #[serde(rename = "APPAREL")]
    Apparel,
    #[serde(rename = "CONCENTRATES")]
    Concentrates,
    #[serde(rename = "SHATTER")]
    Shatter,
    #[serde(rename = "WAX")]
    Wax,
    #[serde(rename = "CRUMBLE")]
    Crumble,
    #[serde(rename = "ROSIN")]
    Rosin,
    #[serde(rename = "KIEF")]
    Kief,
    #[serde(rename = "EDIBLES")]
    Edibles,
    #[serde(rename = "LOZENGE")]
    Lozenge,
    #[serde(rename = "GUMMIES")]
    Gummies,
    #[serde(rename = "CHOCOLATES")]
    Chocolates,
    #[serde(rename = "FLOWER")]
    Flower,
    #[serde(rename = "NON-CANNABIS")]
    NonCannabis,
    #[serde(rename = "ORAL")]
    Oral,
    #[serde(rename = "TINCTURE")]
    Tincture,
    #[serde(rename = "PREROLL")]
    Preroll,
    #[serde(rename = "PRE-PACK")]
    PrePack,
    #[serde(rename = "TOPICAL")]
    Topical,
    #[serde(rename = "BALM")]
    Balm,
    #[serde(rename = "VAPE")]
    Vape,
}

impl Subcategory {
    /// 全部品类 (界面下拉顺序)
    pub const ALL: [Subcategory; 20] = [
        Subcategory::Apparel,
        Subcategory::Concentrates,
        Subcategory::Shatter,
        Subcategory::Wax,
        Subcategory::Crumble,
        Subcategory::Rosin,
        Subcategory::Kief,
        Subcategory::Edibles,
        Subcategory::Lozenge,
        Subcategory::Gummies,
        Subcategory::Chocolates,
        Subcategory::Flower,
        Subcategory::NonCannabis,
        Subcategory::Oral,
        Subcategory::Tincture,
        Subcategory::Preroll,
        Subcategory::PrePack,
        Subcategory::Topical,
        Subcategory::Balm,
        Subcategory::Vape,
    ];

    /// 转换为存储代码
    pub fn as_str(&self) -> &'static str {
        match self {
            Subcategory::Apparel => "APPAREL",
            Subcategory::Concentrates => "CONCENTRATES",
            Subcategory::Shatter => "SHATTER",
            Subcategory::Wax => "WAX",
            Subcategory::Crumble => "CRUMBLE",
            Subcategory::Rosin => "ROSIN",
            Subcategory::Kief => "KIEF",
            Subcategory::Edibles => "EDIBLES",
            Subcategory::Lozenge => "LOZENGE",
            Subcategory::Gummies => "GUMMIES",
            Subcategory::Chocolates => "CHOCOLATES",
            Subcategory::Flower => "FLOWER",
            Subcategory::NonCannabis => "NON-CANNABIS",
            Subcategory::Oral => "ORAL",
            Subcategory::Tincture => "TINCTURE",
            Subcategory::Preroll => "PREROLL",
            Subcategory::PrePack => "PRE-PACK",
            Subcategory::Topical => "TOPICAL",
            Subcategory::Balm => "BALM",
            Subcategory::Vape => "VAPE",
        }
    }

    /// 从存储代码解析 (精确匹配, 区分大小写)
    pub fn from_code(code: &str) -> Option<Self> {
        Subcategory::ALL.iter().copied().find(|c| c.as_str() == code)
    }

    /// 分仓比例 (Ocala 侧占比)
    ///
    /// FTP 箱数 = trunc(箱数 - 箱数 × 比例)
    pub fn percentage(&self) -> f64 {
        match self {
            Subcategory::Apparel => 0.15,
            Subcategory::Concentrates
            | Subcategory::Shatter
            | Subcategory::Wax
            | Subcategory::Crumble
            | Subcategory::Rosin
            | Subcategory::Kief
            | Subcategory::Oral
            | Subcategory::Tincture => 0.58,
            Subcategory::Edibles
            | Subcategory::Lozenge
            | Subcategory::Gummies
            | Subcategory::Chocolates
            | Subcategory::Vape => 0.55,
            Subcategory::Flower | Subcategory::Topical | Subcategory::Balm => 0.53,
            Subcategory::NonCannabis | Subcategory::Preroll | Subcategory::PrePack => 0.56,
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 按代码查分仓比例; 未知代码返回 0.0 (不报错)
pub fn subcategory_percentage(code: &str) -> f64 {
    Subcategory::from_code(code)
        .map(|c| c.percentage())
        .unwrap_or(0.0)
}

// ==========================================
// 箱型 (BoxSize)
// ==========================================
// 存储格式: "LG" / "SM"; 备注载体记录为空字符串
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoxSize {
    #[default]
    #[serde(rename = "LG")]
    Large,
    #[serde(rename = "SM")]
    Small,
    #[serde(rename = "")]
    Unspecified,
}

impl BoxSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoxSize::Large => "LG",
            BoxSize::Small => "SM",
            BoxSize::Unspecified => "",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "LG" => Some(BoxSize::Large),
            "SM" => Some(BoxSize::Small),
            "" => Some(BoxSize::Unspecified),
            _ => None,
        }
    }
}

impl fmt::Display for BoxSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcategory_table_has_twenty_unique_codes() {
        let mut codes: Vec<&str> = Subcategory::ALL.iter().map(|c| c.as_str()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 20);
    }

    #[test]
    fn test_subcategory_percentages() {
        assert_eq!(subcategory_percentage("FLOWER"), 0.53);
        assert_eq!(subcategory_percentage("PREROLL"), 0.56);
        assert_eq!(subcategory_percentage("KIEF"), 0.58);
        assert_eq!(subcategory_percentage("GUMMIES"), 0.55);
        assert_eq!(subcategory_percentage("APPAREL"), 0.15);
        assert_eq!(subcategory_percentage("NON-CANNABIS"), 0.56);
        assert_eq!(subcategory_percentage("BALM"), 0.53);
    }

    #[test]
    fn test_unknown_subcategory_is_zero() {
        assert_eq!(subcategory_percentage(""), 0.0);
        assert_eq!(subcategory_percentage("flower"), 0.0);
        assert_eq!(subcategory_percentage("SEEDS"), 0.0);
    }

    #[test]
    fn test_subcategory_serde_uses_codes() {
        let json = serde_json::to_string(&Subcategory::PrePack).unwrap();
        assert_eq!(json, "\"PRE-PACK\"");
        let parsed: Subcategory = serde_json::from_str("\"NON-CANNABIS\"").unwrap();
        assert_eq!(parsed, Subcategory::NonCannabis);
    }

    #[test]
    fn test_box_size_codes() {
        assert_eq!(serde_json::to_string(&BoxSize::Small).unwrap(), "\"SM\"");
        let parsed: BoxSize = serde_json::from_str("\"\"").unwrap();
        assert_eq!(parsed, BoxSize::Unspecified);
        assert_eq!(BoxSize::from_str("LG"), Some(BoxSize::Large));
        assert_eq!(BoxSize::from_str("XL"), None);
    }
}
