// ==========================================
// Smart Supply - 引擎层
// ==========================================
// 职责: 周期聚合、补货计算、结果筛选
// 红线: 引擎不读文件、不写文件，只做纯计算
// ==========================================

pub mod period_aggregator;
pub mod replenishment;
pub mod result_filter;

// 重导出核心引擎
pub use period_aggregator::{AggregationOutcome, PeriodAggregator};
pub use replenishment::{CalculationError, ReplenishmentCalculator, ReplenishmentFigures};
pub use result_filter::{FilterSummary, ResultFilter};
