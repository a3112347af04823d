// ==========================================
// Smart Supply - API 层
// ==========================================
// 职责: 提供处理 / 导出入口，供界面调用
// ==========================================

pub mod error;
pub mod replenishment_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use replenishment_api::{ProcessResponse, ReplenishmentApi};
