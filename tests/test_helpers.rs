// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供销售流水文件构建、临时文件写入、Mock 配置
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use smart_supply::config::PipelineConfigReader;
use smart_supply::domain::types::{PeriodCount, RequiredColumn};
use smart_supply::importer::ImportResult;
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ==========================================
// 销售流水行构建器
// ==========================================

#[derive(Debug, Clone)]
pub struct SalesRowBuilder {
    sku: String,
    name: String,
    date: String,
    units_sold: String,
    coverage_weeks: String,
    current_stock: String,
    lead_time_days: String,
    frequency: String,
}

impl SalesRowBuilder {
    pub fn new(sku: &str, date: &str, units_sold: f64) -> Self {
        Self {
            sku: sku.to_string(),
            name: format!("Producto {}", sku),
            date: date.to_string(),
            units_sold: units_sold.to_string(),
            coverage_weeks: "2".to_string(),
            current_stock: "5".to_string(),
            lead_time_days: "7".to_string(),
            frequency: "Semanal".to_string(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn units_raw(mut self, units: &str) -> Self {
        self.units_sold = units.to_string();
        self
    }

    pub fn coverage(mut self, weeks: f64) -> Self {
        self.coverage_weeks = weeks.to_string();
        self
    }

    pub fn stock(mut self, stock: f64) -> Self {
        self.current_stock = stock.to_string();
        self
    }

    pub fn stock_raw(mut self, stock: &str) -> Self {
        self.current_stock = stock.to_string();
        self
    }

    /// 按 RequiredColumn 声明顺序输出单元格
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.sku.clone(),
            self.name.clone(),
            self.date.clone(),
            self.units_sold.clone(),
            self.coverage_weeks.clone(),
            self.current_stock.clone(),
            self.lead_time_days.clone(),
            self.frequency.clone(),
        ]
    }
}

/// 标准表头（声明顺序）
pub fn standard_headers() -> Vec<String> {
    RequiredColumn::ALL
        .iter()
        .map(|c| c.header().to_string())
        .collect()
}

/// 构建 CSV 文本（含需要时的引号转义）
pub fn build_csv(headers: &[String], rows: &[SalesRowBuilder]) -> String {
    let mut lines = vec![join_csv_line(headers)];
    lines.extend(rows.iter().map(|r| join_csv_line(&r.cells())));
    lines.join("\n") + "\n"
}

fn join_csv_line(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| {
            if c.contains(',') || c.contains('"') {
                format!("\"{}\"", c.replace('"', "\"\""))
            } else {
                c.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// 构建 .xlsx 字节；Fecha 列写为日期单元格（输入 DD/MM/YYYY）
pub fn build_xlsx(rows: &[SalesRowBuilder]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let sheet = workbook.add_worksheet();

    for (col, header) in standard_headers().iter().enumerate() {
        sheet.write_string(0, col as u16, header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        for (col, cell) in row.cells().iter().enumerate() {
            let col = col as u16;
            if col == RequiredColumn::Date as u16 {
                let parts: Vec<&str> = cell.split('/').collect();
                let date = ExcelDateTime::from_ymd(
                    parts[2].parse()?,
                    parts[1].parse()?,
                    parts[0].parse()?,
                )?;
                sheet.write_datetime_with_format(r, col, &date, &date_format)?;
            } else if let Ok(number) = cell.parse::<f64>() {
                sheet.write_number(r, col, number)?;
            } else {
                sheet.write_string(r, col, cell)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// 写入临时目录中的文件
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - PathBuf: 文件路径
pub fn write_temp_file(
    file_name: &str,
    bytes: &[u8],
) -> Result<(TempDir, PathBuf), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(file_name);
    std::fs::write(&path, bytes)?;
    Ok((dir, path))
}

pub fn periods(n: u32) -> PeriodCount {
    PeriodCount::new(n).unwrap()
}

// ==========================================
// Mock 配置
// ==========================================

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub num_periods: u32,
    pub delimiter: u8,
    pub file_name: String,
    pub sheet_name: String,
    pub output_dir: PathBuf,
}

impl MockConfig {
    pub fn with_output_dir(dir: &Path) -> Self {
        Self {
            num_periods: 4,
            delimiter: b',',
            file_name: "Test_Report.xlsx".to_string(),
            sheet_name: "Test Sheet".to_string(),
            output_dir: dir.to_path_buf(),
        }
    }
}

#[async_trait]
impl PipelineConfigReader for MockConfig {
    async fn get_default_num_periods(&self) -> ImportResult<PeriodCount> {
        PeriodCount::new(self.num_periods)
    }

    async fn get_csv_delimiter(&self) -> ImportResult<u8> {
        Ok(self.delimiter)
    }

    async fn get_report_file_name(&self) -> ImportResult<String> {
        Ok(self.file_name.clone())
    }

    async fn get_report_sheet_name(&self) -> ImportResult<String> {
        Ok(self.sheet_name.clone())
    }

    async fn get_report_output_dir(&self) -> ImportResult<PathBuf> {
        Ok(self.output_dir.clone())
    }
}
