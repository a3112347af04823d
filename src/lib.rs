// ==========================================
// Smart Supply - 核心库
// ==========================================
// 系统定位: 销售流水 → 周期聚合 → 补货建议 → 报表
// 流程: 文件解析 → 表头校验 → 行解析 → 周期聚合 → 补货计算 → 导出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 文件读取与行解析
pub mod importer;

// 引擎层 - 聚合与计算
pub mod engine;

// 导出层 - 报表
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 对外入口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FileKind, PeriodCount, RequiredColumn};

// 领域实体
pub use domain::{
    PeriodWindow, PipelineOutcome, ProductAggregate, ProductResult, RowDiagnostic, Transaction,
};

// 导入
pub use importer::{ImportError, ImportResult, SalesImporter, SalesImporterImpl};

// 引擎
pub use engine::{PeriodAggregator, ReplenishmentCalculator, ResultFilter};

// 导出
pub use exporter::{ExportError, ReportExporter};

// 配置
pub use config::{ConfigManager, PipelineConfigReader};

// API
pub use api::{ApiError, ProcessResponse, ReplenishmentApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Smart Supply";
