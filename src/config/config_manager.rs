// ==========================================
// Smart Supply - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 内存 key-value（可从 JSON 对象加载），不落盘
// ==========================================

use crate::config::pipeline_config_trait::PipelineConfigReader;
use crate::domain::types::PeriodCount;
use crate::importer::error::{ImportError, ImportResult};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

// ==========================================
// 默认值
// ==========================================
pub const DEFAULT_NUM_PERIODS: u32 = 8;
pub const DEFAULT_CSV_DELIMITER: &str = ",";
pub const DEFAULT_REPORT_FILE_NAME: &str = "Smart_Supply_Replenishment_Report.xlsx";
pub const DEFAULT_REPORT_SHEET_NAME: &str = "Replenishment Report";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl ConfigManager {
    /// 创建空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象创建
    ///
    /// 标量值转为字符串；null 视为未配置
    pub fn from_json_str(json_text: &str) -> ImportResult<Self> {
        let map: serde_json::Map<String, Value> =
            serde_json::from_str(json_text).context("Failed to parse configuration JSON")?;

        let manager = Self::new();
        for (key, value) in map {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                other => other.to_string(),
            };
            manager.set_config_value(&key, &text)?;
        }
        Ok(manager)
    }

    /// 从 JSON 文件加载
    pub async fn load_json_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        let manager = Self::from_json_str(&text)?;
        debug!(path = %path.as_ref().display(), "配置文件加载完成");
        Ok(manager)
    }

    /// 写入配置值（覆盖已有值）
    pub fn set_config_value(&self, key: &str, value: &str) -> ImportResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| ImportError::InternalError(format!("锁获取失败: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> ImportResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| ImportError::InternalError(format!("锁获取失败: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ImportResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 获取全部配置的快照（JSON，键有序）
    pub fn get_config_snapshot(&self) -> ImportResult<String> {
        let values = self
            .values
            .lock()
            .map_err(|e| ImportError::InternalError(format!("锁获取失败: {}", e)))?;

        let ordered: std::collections::BTreeMap<&String, &String> = values.iter().collect();
        Ok(json!(ordered).to_string())
    }
}

// ==========================================
// PipelineConfigReader Trait 实现
// ==========================================
#[async_trait]
impl PipelineConfigReader for ConfigManager {
    // ===== 导入配置 =====

    async fn get_default_num_periods(&self) -> ImportResult<PeriodCount> {
        let default = DEFAULT_NUM_PERIODS.to_string();
        let value = self.get_config_or_default(config_keys::DEFAULT_NUM_PERIODS, &default)?;

        match value.trim().parse::<i64>() {
            Ok(n) => Ok(PeriodCount::clamped(n)),
            Err(_) => {
                warn!(
                    config_key = config_keys::DEFAULT_NUM_PERIODS,
                    raw_value = %value,
                    "周期数配置格式错误，使用默认值"
                );
                PeriodCount::new(DEFAULT_NUM_PERIODS)
            }
        }
    }

    async fn get_csv_delimiter(&self) -> ImportResult<u8> {
        let value = self.get_config_or_default(config_keys::CSV_DELIMITER, DEFAULT_CSV_DELIMITER)?;

        match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(ImportError::ConfigValueError {
                key: config_keys::CSV_DELIMITER.to_string(),
                value,
                message: "delimiter must be a single ASCII character".to_string(),
            }),
        }
    }

    // ===== 导出配置 =====

    async fn get_report_file_name(&self) -> ImportResult<String> {
        let value =
            self.get_config_or_default(config_keys::REPORT_FILE_NAME, DEFAULT_REPORT_FILE_NAME)?;
        if value.trim().is_empty() {
            return Ok(DEFAULT_REPORT_FILE_NAME.to_string());
        }
        Ok(value)
    }

    async fn get_report_sheet_name(&self) -> ImportResult<String> {
        let value =
            self.get_config_or_default(config_keys::REPORT_SHEET_NAME, DEFAULT_REPORT_SHEET_NAME)?;
        if value.trim().is_empty() {
            return Ok(DEFAULT_REPORT_SHEET_NAME.to_string());
        }
        Ok(value)
    }

    async fn get_report_output_dir(&self) -> ImportResult<PathBuf> {
        match self.get_config_value(config_keys::REPORT_OUTPUT_DIR)? {
            Some(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
            _ => Ok(default_output_dir()),
        }
    }
}

/// 用户下载目录；不可用时退回当前目录
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 导入
    pub const DEFAULT_NUM_PERIODS: &str = "default_num_periods";
    pub const CSV_DELIMITER: &str = "csv_delimiter";

    // 导出
    pub const REPORT_FILE_NAME: &str = "report_file_name";
    pub const REPORT_SHEET_NAME: &str = "report_sheet_name";
    pub const REPORT_OUTPUT_DIR: &str = "report_output_dir";
}
