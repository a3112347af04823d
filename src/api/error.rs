// ==========================================
// Smart Supply - API 层错误类型
// ==========================================
// 职责: 将导入 / 导出错误转换为面向用户的消息
// ==========================================

use crate::exporter::error::ExportError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API 层错误类型
/// 显示文本即界面展示的致命错误消息
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ==========================================
    // 管道错误
    // ==========================================
    #[error("{0}")]
    ImportError(String),

    #[error("{0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::InvalidPeriodCount(_) => ApiError::InvalidInput(err.to_string()),
            ImportError::ConfigValueError { .. } => ApiError::ConfigError(err.to_string()),
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            ImportError::Other(e) => ApiError::Other(e),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Other(e) => ApiError::Other(e),
            other => ApiError::ExportError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
