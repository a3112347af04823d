// ==========================================
// Smart Supply - 文件解析器实现
// ==========================================
// 阶段 0: 文件字节 → 原始表格（第 0 行为表头）
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::domain::types::FileKind;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::raw_grid::{CellValue, RawGrid};
use crate::importer::sales_importer_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::io::Cursor;
use tracing::debug;

// ==========================================
// CSV Parser 实现
// ==========================================
// 使用标准 CSV 解析（支持引号转义），不把首行当表头处理
pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl FileParser for CsvParser {
    fn parse_to_grid(&self, bytes: &[u8]) -> ImportResult<RawGrid> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .delimiter(self.delimiter)
            .from_reader(trim_ascii_whitespace(bytes));

        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        let mut header_line: Option<u64> = None;

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            match header_line {
                None => header_line = Some(line),
                Some(first_line) => {
                    // 空行由 csv 跳过，这里补空行占位，保证行号与物理行一致
                    let expected_index = line.saturating_sub(first_line) as usize;
                    while rows.len() < expected_index {
                        rows.push(Vec::new());
                    }
                }
            }

            rows.push(record.iter().map(CellValue::from).collect());
        }

        if rows.len() < 2 {
            return Err(ImportError::NotEnoughRows { kind: "CSV" });
        }

        debug!(rows = rows.len(), "CSV 解析完成");
        Ok(RawGrid::new(rows))
    }
}

/// 去掉整个文件首尾的空白（首尾仅含空格的行不成为数据行）
fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |idx| idx + 1);
    &bytes[start..end]
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 只读取第一个工作表
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_grid(&self, bytes: &[u8]) -> ImportResult<RawGrid> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(ImportError::NoSheets)?;

        let range = workbook.worksheet_range(&sheet_name)?;

        let rows: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        if rows.len() < 2 {
            return Err(ImportError::NotEnoughRows { kind: "Excel" });
        }

        debug!(sheet = %sheet_name, rows = rows.len(), "Excel 解析完成");
        Ok(RawGrid::new(rows))
    }
}

/// 单元格转换: 日期单元格渲染为 DD/MM/YYYY，其余保持文本/数值
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => CellValue::Text(value.format("%d/%m/%Y").to_string()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => {
            let date_part = s.get(..10).unwrap_or(s.as_str());
            match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
                Ok(date) => CellValue::Text(date.format("%d/%m/%Y").to_string()),
                Err(_) => CellValue::from(s.as_str()),
            }
        }
        Data::DurationIso(s) => CellValue::from(s.as_str()),
    }
}

// ==========================================
// 通用文件解析器（根据文件类型选择）
// ==========================================
pub struct UniversalFileParser {
    csv: CsvParser,
    excel: ExcelParser,
}

impl UniversalFileParser {
    pub fn new(delimiter: u8) -> Self {
        Self {
            csv: CsvParser::new(delimiter),
            excel: ExcelParser,
        }
    }

    pub fn parse(&self, kind: FileKind, bytes: &[u8]) -> ImportResult<RawGrid> {
        match kind {
            FileKind::DelimitedText => self.csv.parse_to_grid(bytes),
            FileKind::Workbook => self.excel.parse_to_grid(bytes),
        }
    }

    /// 按文件名扩展名选择解析器
    pub fn parse_named(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawGrid> {
        let kind = FileKind::from_file_name(file_name)?;
        self.parse(kind, bytes)
    }
}

impl Default for UniversalFileParser {
    fn default() -> Self {
        Self::new(b',')
    }
}
