// ==========================================
// 入库追踪系统 - 录入校验器
// ==========================================
// 职责: 原始字符串表单 → 已校验的数值字段
// 红线: 校验失败的记录不得写入存储
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::{BoxSize, Subcategory};

/// 日期键格式 (DD-MM-YYYY)
pub const DATE_KEY_FORMAT: &str = "%d-%m-%Y";

// ==========================================
// ValidationMode - 校验模式
// ==========================================

/// 校验模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValidationMode {
    /// 严格模式: 散箱个数多于箱数时拒绝
    #[default]
    Strict,
    /// 宽松模式: 记录警告后放行 (整箱数允许为负)
    Lenient,
}

// ==========================================
// InboundRecordForm - 录入表单 (原始输入)
// ==========================================

/// 界面提交的原始表单, 全部为字符串
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboundRecordForm {
    pub barcode: String,
    pub identifier: String,
    pub units_per_case: String,
    pub box_count: String,
    pub partial_case_1: String,
    pub partial_case_2: String,
    pub partial_case_3: String,
    pub partial_case_4: String,
    pub subcategory: String,
    pub box_size: String,
    pub verified_total_unit_count: String,
    pub notes: String,
}

/// 校验通过的表单
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub barcode: String,
    pub identifier: String,
    pub units_per_case: i32,
    pub box_count: i32,
    pub partials: [i32; 4],
    pub subcategory: String,
    pub box_size: BoxSize,
    pub verified_total_unit_count: i32,
    pub notes: String,
}

// ==========================================
// InboundFormValidator - 录入校验器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct InboundFormValidator {
    mode: ValidationMode,
}

impl InboundFormValidator {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// 校验录入表单
    ///
    /// 规则:
    /// - 条码、品名必填
    /// - 每箱件数、箱数、复核件数必填, 须为非负整数
    /// - 散箱 1..4 可留空 (视为 0), 填写时须为非负整数
    /// - 品类必填; 未知品类放行 (分仓比例为 0) 并告警
    /// - 箱型留空视为 LG, 其他值只允许 LG / SM
    /// - 散箱个数多于箱数: Strict 拒绝, Lenient 告警放行
    /// - 派生件数须在 i32 范围内
    pub fn validate(&self, form: &InboundRecordForm) -> ApiResult<ValidatedForm> {
        let barcode = validate_barcode(&form.barcode)?;

        let identifier = form.identifier.trim();
        if identifier.is_empty() {
            return Err(ApiError::field("identifier", "必填"));
        }

        let units_per_case = parse_required_count("units_per_case", &form.units_per_case)?;
        let box_count = parse_required_count("box_count", &form.box_count)?;
        let verified_total_unit_count =
            parse_required_count("verified_total_unit_count", &form.verified_total_unit_count)?;

        let partials = [
            parse_optional_count("partial_case_1", &form.partial_case_1)?,
            parse_optional_count("partial_case_2", &form.partial_case_2)?,
            parse_optional_count("partial_case_3", &form.partial_case_3)?,
            parse_optional_count("partial_case_4", &form.partial_case_4)?,
        ];

        let subcategory = form.subcategory.trim();
        if subcategory.is_empty() {
            return Err(ApiError::field("subcategory", "必填"));
        }
        if Subcategory::from_code(subcategory).is_none() {
            tracing::warn!(subcategory, "未知品类, 分仓比例按 0 计算");
        }

        let box_size = match form.box_size.trim() {
            "" => BoxSize::Large,
            raw => match BoxSize::from_str(raw) {
                Some(size) => size,
                None => {
                    return Err(ApiError::field(
                        "box_size",
                        format!("只允许 LG 或 SM, 实际为 {}", raw),
                    ))
                }
            },
        };

        let partial_count = partials.iter().filter(|&&p| p > 0).count() as i32;
        if partial_count > box_count {
            match self.mode {
                ValidationMode::Strict => {
                    return Err(ApiError::ValidationError(format!(
                        "散箱个数({})多于箱数({})",
                        partial_count, box_count
                    )));
                }
                ValidationMode::Lenient => {
                    tracing::warn!(
                        barcode = %barcode,
                        partial_count,
                        box_count,
                        "Lenient模式: 散箱个数多于箱数, 整箱数将为负"
                    );
                }
            }
        }

        check_unit_totals(units_per_case, box_count, partial_count, &partials)?;

        Ok(ValidatedForm {
            barcode,
            identifier: identifier.to_string(),
            units_per_case,
            box_count,
            partials,
            subcategory: subcategory.to_string(),
            box_size,
            verified_total_unit_count,
            notes: form.notes.clone(),
        })
    }
}

// ==========================================
// 字段校验辅助函数
// ==========================================

/// 校验日期键 (非空, DD-MM-YYYY)
pub fn validate_date_key(date: &str) -> ApiResult<NaiveDate> {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return Err(ApiError::field("date", "必填"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_KEY_FORMAT).map_err(|e| {
        ApiError::field("date", format!("须为 DD-MM-YYYY 格式, 实际为 {}: {}", trimmed, e))
    })
}

/// 规范化日期键 (两位日/月, 四位年)
pub fn normalize_date_key(date: &str) -> ApiResult<String> {
    Ok(validate_date_key(date)?.format(DATE_KEY_FORMAT).to_string())
}

/// 校验条码 (非空, 去除首尾空白)
pub fn validate_barcode(barcode: &str) -> ApiResult<String> {
    let trimmed = barcode.trim();
    if trimmed.is_empty() {
        return Err(ApiError::field("barcode", "必填"));
    }
    Ok(trimmed.to_string())
}

fn parse_required_count(field: &str, raw: &str) -> ApiResult<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::field(field, "必填"));
    }
    parse_count(field, trimmed)
}

fn parse_optional_count(field: &str, raw: &str) -> ApiResult<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    parse_count(field, trimmed)
}

fn parse_count(field: &str, trimmed: &str) -> ApiResult<i32> {
    let value: i32 = trimmed
        .parse()
        .map_err(|_| ApiError::field(field, format!("须为整数, 实际为 {}", trimmed)))?;
    if value < 0 {
        return Err(ApiError::field(field, format!("不能为负数, 实际为 {}", value)));
    }
    Ok(value)
}

/// 分仓计算中的件数运算不得溢出
///
/// FTP 件数介于 0 与 箱数 × 每箱件数 之间, 因此只需检查两端
fn check_unit_totals(
    units_per_case: i32,
    box_count: i32,
    partial_count: i32,
    partials: &[i32; 4],
) -> ApiResult<()> {
    let overflow = || {
        ApiError::field(
            "units_per_case",
            format!(
                "件数超出范围: 每箱件数 {} × 箱数 {}",
                units_per_case, box_count
            ),
        )
    };

    let partial_units = partials
        .iter()
        .try_fold(0i32, |acc, &p| acc.checked_add(p))
        .ok_or_else(overflow)?;
    let box_units = box_count
        .checked_mul(units_per_case)
        .ok_or_else(overflow)?;
    let total_units = (box_count - partial_count)
        .checked_mul(units_per_case)
        .and_then(|units| units.checked_add(partial_units))
        .ok_or_else(overflow)?;
    total_units.checked_sub(box_units).ok_or_else(overflow)?;
    Ok(())
}
