// ==========================================
// Smart Supply - 配置层
// ==========================================
// 职责: 系统配置管理（内存 key-value，可从 JSON 加载）
// ==========================================

pub mod config_manager;
pub mod pipeline_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_output_dir, ConfigManager};
pub use pipeline_config_trait::PipelineConfigReader;
