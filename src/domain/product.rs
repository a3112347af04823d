// ==========================================
// Smart Supply - 产品聚合领域模型
// ==========================================
// 用途: 聚合引擎写入，补货引擎只读并附加计算字段
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// PeriodWindow - 7 天销售窗口
// ==========================================
// index 0 = 最近一周；窗口连续、互不重叠、各 7 天
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub index: usize,
    pub start: DateTime<Utc>, // 起始日 00:00:00.000
    pub end: DateTime<Utc>, // 结束日 23:59:59.999
}

impl PeriodWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }
}

// ==========================================
// ProductAggregate - 产品聚合
// ==========================================
// 主数据字段（名称/覆盖周数/库存/提前期/频率）取该 SKU 首条流水
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAggregate {
    pub row_number: usize, // 首条流水的行号
    pub sku: String, // 聚合键
    pub name: String, // 产品名称
    pub current_month_sales: f64, // 本月至今销量
    pub replenishment_frequency: String, // 补货频率
    pub period_sales: Vec<f64>, // 各周期销量（index 0 = 最近）
    pub coverage_weeks: f64, // 库存覆盖周数
    pub current_stock: f64, // 当前库存
    pub lead_time_days: f64, // 提前期（天）
    pub averaging_divisor: f64, // 平均除数 [1, num_periods]
}

impl ProductAggregate {
    /// 错误消息中标识产品的文本：SKU 为空时退回行号
    pub fn error_label(&self) -> String {
        if self.sku.is_empty() {
            format!("at row {}", self.row_number)
        } else {
            self.sku.clone()
        }
    }

    /// 产品级错误消息前缀
    pub fn error_prefix(&self) -> String {
        format!("Error for SKU {}: ", self.error_label())
    }
}

// ==========================================
// ProductResult - 补货计算结果
// ==========================================
// error 存在时三项计算值均为 0，产品仍占一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResult {
    #[serde(flatten)]
    pub product: ProductAggregate,
    pub weekly_average: f64, // 周均销量（四舍五入）
    pub ideal_stock: f64, // 理想库存（四舍五入）
    pub units_to_replenish: f64, // 应补货数量（≥ 0，四舍五入）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProductResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// 状态列文本: "OK" 或去掉 "Error for SKU …: " 前缀的错误原因
    pub fn status_text(&self) -> String {
        match &self.error {
            None => "OK".to_string(),
            Some(error) => {
                let prefix = self.product.error_prefix();
                error
                    .strip_prefix(prefix.as_str())
                    .unwrap_or(error.as_str())
                    .to_string()
            }
        }
    }
}
