// ==========================================
// Smart Supply - 领域类型定义
// ==========================================
// 职责: 必需列、文件类型、周期数等基础值类型
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ==========================================
// 必需列 (Required Column)
// ==========================================
// 列名精确匹配（区分大小写），与列顺序无关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequiredColumn {
    Sku, // 产品 ID / SKU
    Name, // 名称
    Date, // 日期
    UnitsSold, // 销售数量
    CoverageWeeks, // 库存覆盖周数
    CurrentStock, // 当前库存
    LeadTimeDays, // 补货提前期（天）
    ReplenishmentFrequency, // 补货频率
}

impl RequiredColumn {
    /// 全部必需列（固定声明顺序，缺失列报告按此顺序输出）
    pub const ALL: [RequiredColumn; 8] = [
        RequiredColumn::Sku,
        RequiredColumn::Name,
        RequiredColumn::Date,
        RequiredColumn::UnitsSold,
        RequiredColumn::CoverageWeeks,
        RequiredColumn::CurrentStock,
        RequiredColumn::LeadTimeDays,
        RequiredColumn::ReplenishmentFrequency,
    ];

    /// 数值列
    pub const NUMERIC: [RequiredColumn; 4] = [
        RequiredColumn::UnitsSold,
        RequiredColumn::CoverageWeeks,
        RequiredColumn::CurrentStock,
        RequiredColumn::LeadTimeDays,
    ];

    /// 源文件中的列名
    pub fn header(&self) -> &'static str {
        match self {
            RequiredColumn::Sku => "ID_Producto / SKU",
            RequiredColumn::Name => "Nombre",
            RequiredColumn::Date => "Fecha",
            RequiredColumn::UnitsSold => "Unidades_Vendidas",
            RequiredColumn::CoverageWeeks => "Semanas_Cobertura_Stock",
            RequiredColumn::CurrentStock => "Stock_Actual",
            RequiredColumn::LeadTimeDays => "Lead_Time_Dias",
            RequiredColumn::ReplenishmentFrequency => "Frecuencia_Reposicion",
        }
    }

    pub fn is_numeric(&self) -> bool {
        Self::NUMERIC.contains(self)
    }
}

impl fmt::Display for RequiredColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

// ==========================================
// 文件类型 (File Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileKind {
    DelimitedText, // .csv
    Workbook, // .xlsx / .xls
}

impl FileKind {
    /// 根据文件名扩展名判断类型（不区分大小写）
    pub fn from_file_name(file_name: &str) -> ImportResult<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(FileKind::DelimitedText),
            "xlsx" | "xls" => Ok(FileKind::Workbook),
            _ => Err(ImportError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::DelimitedText => write!(f, "DELIMITED_TEXT"),
            FileKind::Workbook => write!(f, "WORKBOOK"),
        }
    }
}

// ==========================================
// 周期数 (Period Count)
// ==========================================
// 取值范围 [2, 20]，由调用方选定
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PeriodCount(u32);

impl PeriodCount {
    pub const MIN: u32 = 2;
    pub const MAX: u32 = 20;

    /// 严格构造，越界返回错误
    pub fn new(value: u32) -> ImportResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ImportError::InvalidPeriodCount(value))
        }
    }

    /// 宽松构造：小于 2 取 2，大于 20 取 20（周期选择器的行为）
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u32)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u32> for PeriodCount {
    type Error = ImportError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        PeriodCount::new(value)
    }
}

impl From<PeriodCount> for u32 {
    fn from(value: PeriodCount) -> Self {
        value.0
    }
}

impl fmt::Display for PeriodCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
