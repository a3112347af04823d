// ==========================================
// Smart Supply - 管道配置读取 Trait
// ==========================================
// 职责: 定义导入 / 导出所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::PeriodCount;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::PathBuf;

// ==========================================
// PipelineConfigReader Trait
// ==========================================
// 用途: 导入管道与报表导出读取配置
// 实现者: ConfigManager（内存 key-value）
#[async_trait]
pub trait PipelineConfigReader: Send + Sync {
    // ===== 导入配置 =====

    /// 获取默认周期数
    ///
    /// # 默认值
    /// - 8（越界值夹到 [2, 20]）
    async fn get_default_num_periods(&self) -> ImportResult<PeriodCount>;

    /// 获取 CSV 分隔符
    ///
    /// # 默认值
    /// - ','
    ///
    /// # 错误
    /// - 配置值不是单个 ASCII 字符
    async fn get_csv_delimiter(&self) -> ImportResult<u8>;

    // ===== 导出配置 =====

    /// 获取报表文件名
    ///
    /// # 默认值
    /// - Smart_Supply_Replenishment_Report.xlsx
    async fn get_report_file_name(&self) -> ImportResult<String>;

    /// 获取报表工作表名
    ///
    /// # 默认值
    /// - Replenishment Report
    async fn get_report_sheet_name(&self) -> ImportResult<String>;

    /// 获取报表输出目录
    ///
    /// # 默认值
    /// - 用户下载目录；不可用时为当前目录
    async fn get_report_output_dir(&self) -> ImportResult<PathBuf>;
}
