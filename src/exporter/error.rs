// ==========================================
// Smart Supply - 报表导出错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to build spreadsheet: {0}")]
    SpreadsheetError(String),

    #[error("Failed to write report file: {0}")]
    FileWriteError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::SpreadsheetError(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::FileWriteError(err.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
