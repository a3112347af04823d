// ==========================================
// Smart Supply - 销售流水导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 文件解析 → 表头校验 → 行解析 → 周期聚合 → 补货计算
// ==========================================

use crate::domain::outcome::PipelineOutcome;
use crate::domain::types::PeriodCount;
use crate::importer::error::ImportResult;
use crate::importer::header_validator::HeaderMap;
use crate::importer::raw_grid::{CellValue, RawGrid};
use crate::importer::transaction_parser::ParsedTransactions;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// SalesImporter Trait
// ==========================================
// 用途: 导入主接口（一次调用 = 一次独立运行）
// 实现者: SalesImporterImpl
#[async_trait]
pub trait SalesImporter: Send + Sync {
    /// 从磁盘文件导入并计算补货建议
    ///
    /// # 参数
    /// - file_path: 文件路径（.csv / .xlsx / .xls）
    /// - num_periods: 周期数（2~20）
    ///
    /// # 返回
    /// - Ok(PipelineOutcome): 产品结果 + 行级诊断
    /// - Err: 致命错误（文件不可读、格式不支持、缺表头、无有效流水）
    async fn import_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        num_periods: PeriodCount,
    ) -> ImportResult<PipelineOutcome>;

    /// 从内存字节导入（上传场景）
    ///
    /// # 参数
    /// - file_name: 原始文件名（用于判断类型）
    /// - bytes: 文件内容
    /// - num_periods: 周期数
    fn import_bytes(
        &self,
        file_name: &str,
        bytes: &[u8],
        num_periods: PeriodCount,
    ) -> ImportResult<PipelineOutcome>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件内容为原始表格（行 0 = 表头）
    ///
    /// # 返回
    /// - Err: 格式错误、无工作表、少于 2 行
    fn parse_to_grid(&self, bytes: &[u8]) -> ImportResult<RawGrid>;
}

// ==========================================
// HeaderValidator Trait
// ==========================================
// 用途: 表头校验接口（阶段 1）
// 实现者: HeaderValidatorImpl
pub trait HeaderValidator: Send + Sync {
    /// 校验必需列并生成列下标映射
    ///
    /// # 返回
    /// - Err(MissingHeaders): 按声明顺序列出全部缺失列
    fn validate_headers(&self, header_row: &[CellValue]) -> ImportResult<HeaderMap>;
}

// ==========================================
// TransactionParser Trait
// ==========================================
// 用途: 行解析接口（阶段 2）
// 实现者: TransactionParserImpl
pub trait TransactionParser: Send + Sync {
    /// 解析全部数据行（部分失败语义，不因单行失败中止）
    fn parse_transactions(&self, grid: &RawGrid, header_map: &HeaderMap) -> ParsedTransactions;
}
