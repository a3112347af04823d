// ==========================================
// Smart Supply - 销售流水导入器实现
// ==========================================
// 职责: 整合导入管道，从文件到补货建议
// 流程: 解析 → 表头校验 → 行解析 → 周期聚合 → 补货计算
// ==========================================
// 红线: 每次调用是独立运行，不共享可变状态
// ==========================================

use crate::config::PipelineConfigReader;
use crate::domain::outcome::PipelineOutcome;
use crate::domain::types::{FileKind, PeriodCount};
use crate::engine::{PeriodAggregator, ReplenishmentCalculator};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::header_validator::HeaderValidator as HeaderValidatorImpl;
use crate::importer::sales_importer_trait::{HeaderValidator, SalesImporter, TransactionParser};
use crate::importer::transaction_parser::TransactionParser as TransactionParserImpl;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// SalesImporterImpl - 销售流水导入器实现
// ==========================================
pub struct SalesImporterImpl {
    // 导入组件
    file_parser: UniversalFileParser,
    header_validator: Box<dyn HeaderValidator>,
    transaction_parser: Box<dyn TransactionParser>,

    // 计算引擎
    aggregator: PeriodAggregator,
    calculator: ReplenishmentCalculator,
}

impl SalesImporterImpl {
    /// 创建新的 SalesImporter 实例
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - header_validator: 表头校验器
    /// - transaction_parser: 流水行解析器
    /// - aggregator: 周期聚合引擎
    /// - calculator: 补货计算引擎
    pub fn new(
        file_parser: UniversalFileParser,
        header_validator: Box<dyn HeaderValidator>,
        transaction_parser: Box<dyn TransactionParser>,
        aggregator: PeriodAggregator,
        calculator: ReplenishmentCalculator,
    ) -> Self {
        Self {
            file_parser,
            header_validator,
            transaction_parser,
            aggregator,
            calculator,
        }
    }

    /// 使用默认组件（逗号分隔）
    pub fn with_defaults() -> Self {
        Self::with_delimiter(b',')
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self::new(
            UniversalFileParser::new(delimiter),
            Box::new(HeaderValidatorImpl),
            Box::new(TransactionParserImpl),
            PeriodAggregator::new(),
            ReplenishmentCalculator::new(),
        )
    }

    /// 按配置创建（读取 CSV 分隔符）
    pub async fn from_config<C>(config: &C) -> ImportResult<Self>
    where
        C: PipelineConfigReader + ?Sized,
    {
        let delimiter = config.get_csv_delimiter().await?;
        Ok(Self::with_delimiter(delimiter))
    }

    /// 执行一次完整运行；致命错误记录后原样返回
    #[instrument(
        skip(self, run_id, bytes, num_periods),
        fields(run_id = %run_id, num_periods = %num_periods)
    )]
    fn run(
        &self,
        run_id: String,
        file_name: &str,
        bytes: &[u8],
        num_periods: PeriodCount,
    ) -> ImportResult<PipelineOutcome> {
        let start_time = Instant::now();
        info!(file_name = %file_name, size = bytes.len(), "开始处理销售流水");

        let result = self.run_stages(run_id, file_name, bytes, num_periods);

        match &result {
            Ok(outcome) => info!(
                products = outcome.results.len(),
                failed_products = outcome.failed().count(),
                row_diagnostics = outcome.diagnostics.len(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "销售流水处理完成"
            ),
            Err(e) => error!(error = %e, "销售流水处理失败"),
        }
        result
    }

    fn run_stages(
        &self,
        run_id: String,
        file_name: &str,
        bytes: &[u8],
        num_periods: PeriodCount,
    ) -> ImportResult<PipelineOutcome> {
        // === 步骤 1: 解析文件 ===
        let kind = FileKind::from_file_name(file_name)?;
        debug!(kind = %kind, "步骤 1: 解析文件");
        let grid = self.file_parser.parse(kind, bytes)?;

        // === 步骤 2: 表头校验 ===
        debug!(rows = grid.len(), "步骤 2: 表头校验");
        let header = grid
            .header()
            .ok_or_else(|| ImportError::InternalError("grid has no header row".to_string()))?;
        let header_map = self.header_validator.validate_headers(header)?;

        // === 步骤 3: 行解析 ===
        debug!("步骤 3: 行解析");
        let parsed = self
            .transaction_parser
            .parse_transactions(&grid, &header_map);

        if parsed.transactions.is_empty() {
            return Err(ImportError::NoValidTransactions(parsed.message()));
        }

        // === 步骤 4: 周期聚合 ===
        debug!(transactions = parsed.transactions.len(), "步骤 4: 周期聚合");
        let aggregation = self.aggregator.aggregate(&parsed.transactions, num_periods);
        let anchor_date = aggregation.anchor_date();

        // === 步骤 5: 补货计算 ===
        debug!(products = aggregation.products.len(), "步骤 5: 补货计算");
        let results = self.calculator.calculate_batch(aggregation.products);

        Ok(PipelineOutcome {
            run_id,
            num_periods: num_periods.get(),
            anchor_date,
            windows: aggregation.windows,
            results,
            diagnostics: parsed.diagnostics,
            aggregation_error: aggregation.error,
        })
    }
}

impl Default for SalesImporterImpl {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait::async_trait]
impl SalesImporter for SalesImporterImpl {
    async fn import_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
        num_periods: PeriodCount,
    ) -> ImportResult<PipelineOutcome> {
        let run_id = Uuid::new_v4().to_string();
        let path = file_path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            error!(run_id = %run_id, path = %path.display(), error = %e, "文件读取失败");
            ImportError::from(e)
        })?;

        self.run(run_id, &file_name, &bytes, num_periods)
    }

    fn import_bytes(
        &self,
        file_name: &str,
        bytes: &[u8],
        num_periods: PeriodCount,
    ) -> ImportResult<PipelineOutcome> {
        self.run(Uuid::new_v4().to_string(), file_name, bytes, num_periods)
    }
}
