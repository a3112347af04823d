// ==========================================
// Smart Supply - 导入层
// ==========================================
// 职责: 读取销售流水文件，生成已校验流水并驱动计算
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod header_validator;
pub mod raw_grid;
pub mod sales_importer_impl;
pub mod sales_importer_trait;
pub mod transaction_parser;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use header_validator::HeaderMap;
pub use header_validator::HeaderValidator as HeaderValidatorImpl;
pub use raw_grid::{CellValue, RawGrid};
pub use sales_importer_impl::SalesImporterImpl;
pub use transaction_parser::ParsedTransactions;
pub use transaction_parser::TransactionParser as TransactionParserImpl;

// 重导出 Trait 接口
pub use sales_importer_trait::{FileParser, HeaderValidator, SalesImporter, TransactionParser};
