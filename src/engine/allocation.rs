// ==========================================
// 入库追踪系统 - 分仓计算引擎
// ==========================================
// 职责: 箱数/散箱/品类 → 总件数 + FTP/Ocala 分仓
// 输入: 每箱件数、箱数、散箱 1..4、品类代码
// 输出: AllocationResult (纯函数, 无副作用)
// 红线: FTP 箱数使用浮点乘积截断 (非四舍五入), 影响账面总数
// ==========================================

use crate::domain::types::subcategory_percentage;
use crate::domain::InboundRecord;
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ==========================================
// AllocationInput - 计算输入
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationInput {
    pub units_per_case: i32,
    pub box_count: i32,
    pub partials: [i32; 4],
    pub subcategory: String,
}

// ==========================================
// AllocationResult - 计算输出
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub total_partial_cases: i32, // 散箱个数 (0-4)
    pub full_boxes: i32,          // 整箱数, 散箱多于箱数时为负 (不截断)
    pub total_unit_count: i32,
    pub percentage: f64,          // 品类比例, 未知品类为 0.0
    pub ftp_cases: i32,
    pub ftp_units: i32,
    pub ocala_cases: i32,
    pub ocala_units: i32,
}

impl AllocationResult {
    /// 写入记录的派生字段
    pub fn apply_to(&self, record: &mut InboundRecord) {
        record.total_unit_count = self.total_unit_count;
        record.ftp_cases = self.ftp_cases;
        record.ocala_cases = self.ocala_cases;
        record.ftp_units = self.ftp_units;
        record.ocala_units = self.ocala_units;
    }
}

// ==========================================
// AllocationCalculator - 分仓计算器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationCalculator;

impl AllocationCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 计算分仓
    ///
    /// 步骤:
    /// 1) 散箱个数 = partials 中 > 0 的个数
    /// 2) 整箱数 = 箱数 - 散箱个数
    /// 3) 总件数 = 整箱数 × 每箱件数 + Σ散箱件数
    /// 4) 比例 = 品类表查询, 未知品类 → 0.0
    /// 5) FTP 箱数 = trunc(箱数 - 箱数 × 比例)
    /// 6) Ocala 箱数 = 箱数 - FTP 箱数; FTP 件数 = FTP 箱数 × 每箱件数;
    ///    Ocala 件数 = 总件数 - FTP 件数
    #[instrument(skip(self), fields(subcategory = %input.subcategory))]
    pub fn calculate(&self, input: &AllocationInput) -> AllocationResult {
        let total_partial_cases = input.partials.iter().filter(|&&p| p > 0).count() as i32;
        let full_boxes = input.box_count - total_partial_cases;
        let partial_units: i32 = input.partials.iter().sum();
        let total_unit_count = full_boxes * input.units_per_case + partial_units;

        let percentage = subcategory_percentage(&input.subcategory);
        let box_count = input.box_count as f64;
        // `as` 向零截断, 与历史数据的取整方式一致
        let ftp_cases = (box_count - box_count * percentage) as i32;

        let ocala_cases = input.box_count - ftp_cases;
        let ftp_units = ftp_cases * input.units_per_case;
        let ocala_units = total_unit_count - ftp_units;

        AllocationResult {
            total_partial_cases,
            full_boxes,
            total_unit_count,
            percentage,
            ftp_cases,
            ftp_units,
            ocala_cases,
            ocala_units,
        }
    }

    /// 以记录自身字段重新计算并回写派生字段
    pub fn recompute(&self, record: &mut InboundRecord) -> AllocationResult {
        let result = self.calculate(&AllocationInput {
            units_per_case: record.units_per_case,
            box_count: record.box_count,
            partials: record.partials(),
            subcategory: record.subcategory.clone(),
        });
        result.apply_to(record);
        result
    }
}
