// ==========================================
// Smart Supply - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 此处仅包含致命（文件级）错误；行级诊断见 RowDiagnostic
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file type: {0}. Please upload a .csv or .xlsx file.")]
    UnsupportedFormat(String),

    #[error("Failed to read file: {0}")]
    FileReadError(String),

    #[error("Failed to parse Excel file: {0}")]
    ExcelParseError(String),

    #[error("Failed to parse CSV file: {0}")]
    CsvParseError(String),

    #[error("The Excel file contains no sheets.")]
    NoSheets,

    #[error("The {kind} file must contain at least one header row and one data row.")]
    NotEnoughRows { kind: &'static str },

    // ===== 表头错误 =====
    #[error("Required headers not found in file: {}.", .0.join(", "))]
    MissingHeaders(Vec<String>),

    // ===== 数据错误 =====
    #[error("{}", .0.as_deref().unwrap_or("No valid transactions were found in the file."))]
    NoValidTransactions(Option<String>),

    // ===== 参数错误 =====
    #[error("Invalid period count {0}: expected a value between 2 and 20")]
    InvalidPeriodCount(u32),

    // ===== 配置错误 =====
    #[error("Invalid config value (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 通用错误 =====
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
