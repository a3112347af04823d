// ==========================================
// Smart Supply - 导出层
// ==========================================
// 职责: 将补货计算结果写为 .xlsx 报表
// ==========================================

pub mod error;
pub mod report_exporter;

pub use error::{ExportError, ExportResult};
pub use report_exporter::ReportExporter;
