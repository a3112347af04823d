// ==========================================
// Smart Supply - 单次运行结果
// ==========================================
// 用途: 导入管道最终产物，供界面渲染 / 报表导出
// ==========================================

use crate::domain::product::{PeriodWindow, ProductResult};
use crate::domain::transaction::{combine_diagnostics, RowDiagnostic};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub run_id: String, // 运行 ID（日志追踪用）
    pub num_periods: u32, // 周期数
    pub anchor_date: Option<NaiveDate>, // 全文件最晚流水日期（所有产品共用）
    pub windows: Vec<PeriodWindow>, // 周期窗口（index 0 = 最近）
    pub results: Vec<ProductResult>, // 每个 SKU 一行，顺序同首次出现
    pub diagnostics: Vec<RowDiagnostic>, // 行级诊断
    pub aggregation_error: Option<String>, // 聚合级错误（预留，当前不填充）
}

impl PipelineOutcome {
    /// 合并行级消息与聚合级消息（空行分隔）
    pub fn combined_message(&self) -> Option<String> {
        let parts: Vec<String> = [
            combine_diagnostics(&self.diagnostics),
            self.aggregation_error.clone(),
        ]
        .into_iter()
        .flatten()
        .filter(|m| !m.is_empty())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    /// 计算成功的产品（保持原顺序）
    pub fn succeeded(&self) -> impl Iterator<Item = &ProductResult> {
        self.results.iter().filter(|r| r.is_ok())
    }

    /// 计算失败的产品（保持原顺序）
    pub fn failed(&self) -> impl Iterator<Item = &ProductResult> {
        self.results.iter().filter(|r| !r.is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> PipelineOutcome {
        PipelineOutcome {
            run_id: "run".to_string(),
            num_periods: 4,
            anchor_date: None,
            windows: Vec::new(),
            results: Vec::new(),
            diagnostics: Vec::new(),
            aggregation_error: None,
        }
    }

    #[test]
    fn test_combined_message_empty() {
        assert_eq!(outcome().combined_message(), None);
    }

    #[test]
    fn test_combined_message_joins_tiers() {
        let mut o = outcome();
        o.diagnostics.push(RowDiagnostic::EmptySku { row_number: 2 });
        assert_eq!(
            o.combined_message().unwrap(),
            "Problems parsing data:\n- Row 2: \"SKU\" must not be empty"
        );

        o.aggregation_error = Some("aggregation".to_string());
        assert!(o.combined_message().unwrap().ends_with("\n\naggregation"));
    }
}
