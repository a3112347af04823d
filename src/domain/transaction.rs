// ==========================================
// Smart Supply - 销售流水领域模型
// ==========================================
// 用途: 导入管道中间产物（原始表格 → 行解析 → 此结构）
// 生命周期: 仅在单次导入流程内
// ==========================================

use crate::domain::types::RequiredColumn;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Transaction - 已校验的销售流水
// ==========================================
// 不变量: 所有数值字段解析成功，日期通过 D/M/YYYY 回环校验
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub row_number: usize, // 原始文件行号（1 起，表头为第 1 行）
    pub sku: String, // 产品 ID / SKU（非空）
    pub name: String, // 产品名称
    pub date: NaiveDate, // 销售日期（UTC 日历日）
    pub units_sold: f64, // 销售数量（不校验正负）
    pub coverage_weeks: f64, // 库存覆盖目标（周）
    pub current_stock: f64, // 当前库存
    pub lead_time_days: f64, // 补货提前期（天）
    pub replenishment_frequency: String, // 补货频率（自由文本）
}

// ==========================================
// RowDiagnostic - 行级诊断
// ==========================================
// 行级错误不升级为致命错误，只排除该行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowDiagnostic {
    InvalidNumber {
        row_number: usize,
        column: RequiredColumn,
        value: String,
    },
    EmptySku {
        row_number: usize,
    },
    InvalidDate {
        row_number: usize,
        value: String,
    },
}

impl RowDiagnostic {
    pub fn row_number(&self) -> usize {
        match self {
            RowDiagnostic::InvalidNumber { row_number, .. }
            | RowDiagnostic::EmptySku { row_number }
            | RowDiagnostic::InvalidDate { row_number, .. } => *row_number,
        }
    }
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowDiagnostic::InvalidNumber {
                row_number,
                column,
                value,
            } => write!(
                f,
                "Row {}, Column \"{}\": Value \"{}\" is not a valid number",
                row_number,
                column.header(),
                value
            ),
            RowDiagnostic::EmptySku { row_number } => {
                write!(f, "Row {}: \"SKU\" must not be empty", row_number)
            }
            RowDiagnostic::InvalidDate { row_number, value } => write!(
                f,
                "Row {}: invalid date format for \"{}\". Expected DD/MM/YYYY",
                row_number, value
            ),
        }
    }
}

/// 合并行级诊断为一条多行消息（无诊断时返回 None）
pub fn combine_diagnostics(diagnostics: &[RowDiagnostic]) -> Option<String> {
    if diagnostics.is_empty() {
        return None;
    }
    let lines: Vec<String> = diagnostics.iter().map(|d| format!("- {}", d)).collect();
    Some(format!("Problems parsing data:\n{}", lines.join("\n")))
}
