// ==========================================
// Smart Supply - 流水行解析器实现
// ==========================================
// 阶段 2: 原始行 → Transaction + 行级诊断
// 规则: 单行失败只排除该行，其余行继续解析
// ==========================================

use crate::domain::transaction::{combine_diagnostics, RowDiagnostic, Transaction};
use crate::domain::types::RequiredColumn;
use crate::importer::header_validator::HeaderMap;
use crate::importer::raw_grid::{CellValue, RawGrid};
use crate::importer::sales_importer_trait::TransactionParser as TransactionParserTrait;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// 日期年份下限/上限
const MIN_YEAR: i32 = 1970;
const MAX_YEAR: i32 = 3000;

/// 解析结果：成功流水 + 行级诊断
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTransactions {
    pub transactions: Vec<Transaction>,
    pub diagnostics: Vec<RowDiagnostic>,
}

impl ParsedTransactions {
    /// 合并后的诊断消息（无诊断时为 None）
    pub fn message(&self) -> Option<String> {
        combine_diagnostics(&self.diagnostics)
    }
}

pub struct TransactionParser;

impl TransactionParserTrait for TransactionParser {
    fn parse_transactions(&self, grid: &RawGrid, header_map: &HeaderMap) -> ParsedTransactions {
        let mut parsed = ParsedTransactions::default();

        for (row_number, row) in grid.data_rows() {
            // 跳过完全空白的行
            if row.iter().all(CellValue::is_empty) {
                continue;
            }

            match self.parse_row(row, row_number, header_map) {
                Ok(transaction) => parsed.transactions.push(transaction),
                Err(mut diagnostics) => {
                    for diagnostic in &diagnostics {
                        warn!(row_number, diagnostic = %diagnostic, "流水行解析失败");
                    }
                    parsed.diagnostics.append(&mut diagnostics);
                }
            }
        }

        debug!(
            success = parsed.transactions.len(),
            failed = parsed.diagnostics.len(),
            "流水解析完成"
        );
        parsed
    }
}

impl TransactionParser {
    /// 解析单行；任一字段失败则返回该行全部诊断
    fn parse_row(
        &self,
        row: &[CellValue],
        row_number: usize,
        header_map: &HeaderMap,
    ) -> Result<Transaction, Vec<RowDiagnostic>> {
        let cell = |column: RequiredColumn| RawGrid::cell(row, header_map.index_of(column));
        let mut diagnostics = Vec::new();

        // 数值列（按声明顺序）
        let mut numbers = [0.0f64; RequiredColumn::NUMERIC.len()];
        for (slot, column) in RequiredColumn::NUMERIC.iter().enumerate() {
            let value = cell(*column);
            match parse_number(value) {
                Some(n) => numbers[slot] = n,
                None => diagnostics.push(RowDiagnostic::InvalidNumber {
                    row_number,
                    column: *column,
                    value: value.trimmed_text(),
                }),
            }
        }
        let [units_sold, coverage_weeks, current_stock, lead_time_days] = numbers;

        let sku = cell(RequiredColumn::Sku).trimmed_text();
        if sku.is_empty() {
            diagnostics.push(RowDiagnostic::EmptySku { row_number });
        }

        let date_text = cell(RequiredColumn::Date).trimmed_text();
        let date = parse_sales_date(&date_text);
        if date.is_none() {
            diagnostics.push(RowDiagnostic::InvalidDate {
                row_number,
                value: date_text,
            });
        }

        match date {
            Some(date) if diagnostics.is_empty() => Ok(Transaction {
                row_number,
                sku,
                name: cell(RequiredColumn::Name).trimmed_text(),
                date,
                units_sold,
                coverage_weeks,
                current_stock,
                lead_time_days,
                replenishment_frequency: cell(RequiredColumn::ReplenishmentFrequency)
                    .trimmed_text(),
            }),
            _ => Err(diagnostics),
        }
    }
}

/// 解析数值单元格；空值或 NaN 视为失败
///
/// 文本按整串 f64 解析：带尾随字符（"12abc"）或逗号小数（"1,5"）一律拒绝；
/// "inf"/"1e999" 可通过，由补货计算的有限值检查拦截
pub fn parse_number(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Number(n) => *n,
        _ => {
            let text = cell.trimmed_text();
            if text.is_empty() {
                return None;
            }
            text.parse::<f64>().ok()?
        }
    };

    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// 解析日期（D/M/YYYY 或 D-M-YYYY，1~2 位日/月，4 位年）
///
/// 日历合法性通过回环构造校验（31/02/2024 会被拒绝）
pub fn parse_sales_date(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split(&['/', '-'][..]).collect();
    if parts.len() != 3 {
        return None;
    }

    let is_digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !is_digits(parts[0], 1, 2) || !is_digits(parts[1], 1, 2) || !is_digits(parts[2], 4, 4) {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year)
        || !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
    {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}
