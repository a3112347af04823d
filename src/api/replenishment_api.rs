// ==========================================
// Smart Supply - 补货 API
// ==========================================
// 职责: 对外两个入口
// - 处理: 文件 + 周期数 → 产品结果 + 可选诊断消息
// - 导出: 产品结果 → 报表文件
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::PipelineConfigReader;
use crate::domain::outcome::PipelineOutcome;
use crate::domain::product::ProductResult;
use crate::domain::types::PeriodCount;
use crate::engine::{FilterSummary, ResultFilter};
use crate::exporter::ReportExporter;
use crate::importer::{SalesImporter, SalesImporterImpl};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 处理响应（界面渲染用）
///
/// 致命错误时 results 为空、error 为错误消息；
/// 否则 error 为行级诊断消息（可能为 None）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub results: Vec<ProductResult>,
    pub error: Option<String>,
}

impl ProcessResponse {
    pub fn from_result(result: ApiResult<PipelineOutcome>) -> Self {
        match result {
            Ok(outcome) => {
                let error = outcome.combined_message();
                Self {
                    results: outcome.results,
                    error,
                }
            }
            Err(err) => Self {
                results: Vec::new(),
                error: Some(err.to_string()),
            },
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.results.is_empty() && self.error.is_some()
    }
}

// ==========================================
// ReplenishmentApi
// ==========================================
pub struct ReplenishmentApi<C>
where
    C: PipelineConfigReader,
{
    config: C,
    importer: SalesImporterImpl,
}

impl<C> ReplenishmentApi<C>
where
    C: PipelineConfigReader,
{
    /// 按配置创建（CSV 分隔符在此读取）
    pub async fn new(config: C) -> ApiResult<Self> {
        let importer = SalesImporterImpl::from_config(&config).await?;
        Ok(Self { config, importer })
    }

    /// 解析周期数；None 时取配置默认值
    async fn resolve_periods(&self, num_periods: Option<u32>) -> ApiResult<PeriodCount> {
        match num_periods {
            Some(n) => Ok(PeriodCount::new(n)?),
            None => Ok(self.config.get_default_num_periods().await?),
        }
    }

    // ==========================================
    // 处理入口
    // ==========================================

    /// 处理磁盘文件
    pub async fn import_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        num_periods: Option<u32>,
    ) -> ApiResult<PipelineOutcome> {
        let periods = self.resolve_periods(num_periods).await?;
        Ok(self.importer.import_file(file_path, periods).await?)
    }

    /// 处理上传内容
    pub async fn import_upload(
        &self,
        file_name: &str,
        bytes: &[u8],
        num_periods: Option<u32>,
    ) -> ApiResult<PipelineOutcome> {
        let periods = self.resolve_periods(num_periods).await?;
        Ok(self.importer.import_bytes(file_name, bytes, periods)?)
    }

    /// 处理磁盘文件，返回界面响应
    pub async fn process_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        num_periods: Option<u32>,
    ) -> ProcessResponse {
        ProcessResponse::from_result(self.import_file(file_path, num_periods).await)
    }

    /// 处理上传内容，返回界面响应
    pub async fn process_upload(
        &self,
        file_name: &str,
        bytes: &[u8],
        num_periods: Option<u32>,
    ) -> ProcessResponse {
        ProcessResponse::from_result(self.import_upload(file_name, bytes, num_periods).await)
    }

    /// 按关键字筛选结果
    pub fn filter_results(
        &self,
        results: &[ProductResult],
        sku_search: &str,
        name_search: &str,
    ) -> (Vec<ProductResult>, FilterSummary) {
        ResultFilter::new(sku_search, name_search).apply(results)
    }

    // ==========================================
    // 导出入口
    // ==========================================

    async fn exporter(&self) -> ApiResult<ReportExporter> {
        let sheet_name = self.config.get_report_sheet_name().await?;
        let file_name = self.config.get_report_file_name().await?;
        Ok(ReportExporter::new(sheet_name, file_name))
    }

    /// 生成报表字节（输入为空时返回 None）
    pub async fn build_report(&self, results: &[ProductResult]) -> ApiResult<Option<Vec<u8>>> {
        Ok(self.exporter().await?.build_report(results)?)
    }

    /// 导出报表到配置的输出目录（输入为空时不写文件）
    pub async fn export_results(&self, results: &[ProductResult]) -> ApiResult<Option<PathBuf>> {
        let dir = self.config.get_report_output_dir().await?;
        self.export_results_to(results, dir).await
    }

    /// 导出报表到指定目录
    pub async fn export_results_to<P: AsRef<Path>>(
        &self,
        results: &[ProductResult],
        dir: P,
    ) -> ApiResult<Option<PathBuf>> {
        if results.is_empty() {
            warn!("没有可导出的结果");
            return Ok(None);
        }

        let exporter = self.exporter().await?;
        let path = exporter
            .export_to_dir(results, dir)
            .await
            .map_err(ApiError::from)?;

        if let Some(path) = &path {
            info!(path = %path.display(), "报表导出完成");
        }
        Ok(path)
    }
}
