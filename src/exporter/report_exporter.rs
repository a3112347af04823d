// ==========================================
// Smart Supply - 补货报表导出
// ==========================================
// 职责: ProductResult 列表 → .xlsx 报表（一行一个产品）
// 规则: 输入为空时不生成文件
// ==========================================

use crate::domain::product::ProductResult;
use crate::exporter::error::ExportResult;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub const DEFAULT_SHEET_NAME: &str = "Replenishment Report";
pub const DEFAULT_FILE_NAME: &str = "Smart_Supply_Replenishment_Report.xlsx";

const HEADER_FILL: u32 = 0xE0E0E0;

// ==========================================
// ReportExporter - 报表导出器
// ==========================================
#[derive(Debug, Clone)]
pub struct ReportExporter {
    sheet_name: String,
    file_name: String,
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new(DEFAULT_SHEET_NAME, DEFAULT_FILE_NAME)
    }
}

impl ReportExporter {
    pub fn new(sheet_name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 报表列名；周期列按周号降序排列（最旧在前，W1 = 最近周期）
    pub fn column_headers(num_periods: usize) -> Vec<String> {
        let mut headers = vec![
            "SKU".to_string(),
            "Name".to_string(),
            "Current Month Sales".to_string(),
        ];
        headers.extend((1..=num_periods).rev().map(|week| format!("Sales W{}", week)));
        headers.extend(
            [
                "Weekly Average Sales",
                "Coverage Weeks",
                "Current Stock",
                "Ideal Stock",
                "Units To Replenish",
                "Replenishment Frequency",
                "Lead Time (Days)",
                "Status",
            ]
            .iter()
            .map(|h| h.to_string()),
        );
        headers
    }

    /// 生成报表字节
    ///
    /// # 返回
    /// - Ok(None): 输入为空
    /// - Ok(Some(bytes)): .xlsx 内容
    #[instrument(skip(self, results), fields(count = results.len()))]
    pub fn build_report(&self, results: &[ProductResult]) -> ExportResult<Option<Vec<u8>>> {
        if results.is_empty() {
            debug!("无结果，跳过报表生成");
            return Ok(None);
        }

        let num_periods = results
            .iter()
            .map(|r| r.product.period_sales.len())
            .max()
            .unwrap_or(0);

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        let header_format = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(HEADER_FILL));

        for (col, header) in Self::column_headers(num_periods).iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }

        for (idx, result) in results.iter().enumerate() {
            write_result_row(worksheet, idx as u32 + 1, result, num_periods)?;
        }

        let bytes = workbook.save_to_buffer()?;
        debug!(size = bytes.len(), "报表生成完成");
        Ok(Some(bytes))
    }

    /// 生成报表并写入 `<dir>/<file_name>`
    ///
    /// # 返回
    /// - Ok(None): 输入为空，不写文件
    /// - Ok(Some(path)): 报表文件路径
    pub async fn export_to_dir<P: AsRef<Path>>(
        &self,
        results: &[ProductResult],
        dir: P,
    ) -> ExportResult<Option<PathBuf>> {
        let Some(bytes) = self.build_report(results)? else {
            return Ok(None);
        };

        tokio::fs::create_dir_all(dir.as_ref()).await?;
        let path = dir.as_ref().join(&self.file_name);
        tokio::fs::write(&path, bytes).await?;

        info!(path = %path.display(), rows = results.len(), "补货报表已导出");
        Ok(Some(path))
    }
}

fn write_result_row(
    worksheet: &mut Worksheet,
    row: u32,
    result: &ProductResult,
    num_periods: usize,
) -> ExportResult<()> {
    let p = &result.product;
    let mut col: u16 = 0;

    worksheet.write_string(row, col, &p.sku)?;
    col += 1;
    worksheet.write_string(row, col, &p.name)?;
    col += 1;
    write_value(worksheet, row, col, p.current_month_sales)?;
    col += 1;

    // W{N} … W1: 最旧周期在前
    for index in (0..num_periods).rev() {
        let value = p.period_sales.get(index).copied().unwrap_or(0.0);
        write_value(worksheet, row, col, value)?;
        col += 1;
    }

    for value in [
        result.weekly_average,
        p.coverage_weeks,
        p.current_stock,
        result.ideal_stock,
        result.units_to_replenish,
    ] {
        write_value(worksheet, row, col, value)?;
        col += 1;
    }

    worksheet.write_string(row, col, &p.replenishment_frequency)?;
    col += 1;
    write_value(worksheet, row, col, p.lead_time_days)?;
    col += 1;
    worksheet.write_string(row, col, result.status_text())?;

    Ok(())
}

// 非有限值无法作为数字单元格存储，按文本写出
fn write_value(worksheet: &mut Worksheet, row: u32, col: u16, value: f64) -> ExportResult<()> {
    if value.is_finite() {
        worksheet.write_number(row, col, value)?;
    } else {
        worksheet.write_string(row, col, value.to_string())?;
    }
    Ok(())
}
