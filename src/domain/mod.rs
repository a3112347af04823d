// ==========================================
// Smart Supply - 领域模型层
// ==========================================
// 职责: 定义流水、产品聚合、计算结果等实体与类型
// 红线: 不含文件读取逻辑,不含计算逻辑
// ==========================================

pub mod outcome;
pub mod product;
pub mod transaction;
pub mod types;

// 重导出核心类型
pub use outcome::PipelineOutcome;
pub use product::{PeriodWindow, ProductAggregate, ProductResult};
pub use transaction::{combine_diagnostics, RowDiagnostic, Transaction};
pub use types::{FileKind, PeriodCount, RequiredColumn};
