// ==========================================
// Smart Supply - 周期聚合引擎
// ==========================================
// 职责: 按 SKU 把流水聚合为 N 个连续 7 天窗口 + 本月至今销量
// 输入: 全部已校验流水 + 周期数
// 输出: ProductAggregate 列表（每个 SKU 一条）
// ==========================================
// 红线: 窗口锚点 = 全文件最晚流水日期（所有产品共用，不按产品漂移）
// ==========================================

use crate::domain::product::{PeriodWindow, ProductAggregate};
use crate::domain::transaction::Transaction;
use crate::domain::types::PeriodCount;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::HashMap;
use tracing::{debug, instrument};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const WEEK_MS: i64 = 7 * DAY_MS;

// ==========================================
// AggregationOutcome - 聚合结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationOutcome {
    pub anchor: Option<DateTime<Utc>>, // 最晚流水日 23:59:59.999
    pub windows: Vec<PeriodWindow>,
    pub products: Vec<ProductAggregate>,
    pub error: Option<String>, // 聚合级错误通道（预留，当前版本始终为 None）
}

impl AggregationOutcome {
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        self.anchor.map(|a| a.date_naive())
    }
}

// ==========================================
// PeriodAggregator - 周期聚合引擎
// ==========================================
#[derive(Debug, Default)]
pub struct PeriodAggregator;

impl PeriodAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 聚合全部流水
    ///
    /// 无流水时返回空结果（不是错误）
    #[instrument(
        skip(self, transactions),
        fields(count = transactions.len(), num_periods = %num_periods)
    )]
    pub fn aggregate(
        &self,
        transactions: &[Transaction],
        num_periods: PeriodCount,
    ) -> AggregationOutcome {
        let Some(latest_date) = transactions.iter().map(|t| t.date).max() else {
            return AggregationOutcome::default();
        };

        let anchor = end_of_day(latest_date);
        let windows = build_windows(latest_date, num_periods);

        // 按 SKU 分组，保持首次出现顺序
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&Transaction>> = HashMap::new();
        for t in transactions {
            groups
                .entry(t.sku.as_str())
                .or_insert_with(|| {
                    order.push(t.sku.as_str());
                    Vec::new()
                })
                .push(t);
        }

        let products: Vec<ProductAggregate> = order
            .iter()
            .filter_map(|sku| groups.get(sku))
            .filter_map(|group| {
                self.aggregate_product(group, &windows, latest_date, anchor, num_periods)
            })
            .collect();

        debug!(
            anchor = %latest_date,
            products = products.len(),
            "周期聚合完成"
        );

        AggregationOutcome {
            anchor: Some(anchor),
            windows,
            products,
            error: None,
        }
    }

    /// 单个 SKU 聚合；首条流水提供主数据字段
    fn aggregate_product(
        &self,
        group: &[&Transaction],
        windows: &[PeriodWindow],
        latest_date: NaiveDate,
        anchor: DateTime<Utc>,
        num_periods: PeriodCount,
    ) -> Option<ProductAggregate> {
        let first = group.first()?;

        let mut period_sales = vec![0.0; num_periods.as_usize()];
        let mut current_month_sales = 0.0;

        for t in group {
            let instant = start_of_day(t.date);

            // 窗口互不重叠，命中第一个即停止
            if let Some(window) = windows.iter().find(|w| w.contains(instant)) {
                period_sales[window.index] += t.units_sold;
            }

            if t.date.year() == latest_date.year() && t.date.month() == latest_date.month() {
                current_month_sales += t.units_sold;
            }
        }

        let first_sale = group.iter().map(|t| t.date).min()?;

        Some(ProductAggregate {
            row_number: first.row_number,
            sku: first.sku.clone(),
            name: first.name.clone(),
            current_month_sales,
            replenishment_frequency: first.replenishment_frequency.clone(),
            period_sales,
            coverage_weeks: first.coverage_weeks,
            current_stock: first.current_stock,
            lead_time_days: first.lead_time_days,
            averaging_divisor: averaging_divisor(first_sale, anchor, num_periods),
        })
    }
}

/// 构建 N 个窗口: 第 i 个窗口结束于 latest - 7i 天，覆盖 7 个日历日
pub fn build_windows(latest_date: NaiveDate, num_periods: PeriodCount) -> Vec<PeriodWindow> {
    (0..num_periods.as_usize())
        .map(|index| {
            let end_date = latest_date - Duration::days(7 * index as i64);
            let start_date = end_date - Duration::days(6);
            PeriodWindow {
                index,
                start: start_of_day(start_date),
                end: end_of_day(end_date),
            }
        })
        .collect()
}

/// 平均除数: 产品首销到锚点的周数（向上取整，跨度 +1ms），夹在 [1, N]
///
/// 新品只按其实际存在的周数求平均，避免被零填充的历史稀释
pub fn averaging_divisor(
    first_sale: NaiveDate,
    anchor: DateTime<Utc>,
    num_periods: PeriodCount,
) -> f64 {
    let age_ms = (anchor - start_of_day(first_sale)).num_milliseconds().max(0);
    // ceil((age_ms + 1) / WEEK_MS)
    let age_weeks = (age_ms + WEEK_MS) / WEEK_MS;
    age_weeks.clamp(1, num_periods.get() as i64) as f64
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::milliseconds(DAY_MS - 1)
}
