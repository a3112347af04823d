// ==========================================
// Smart Supply - 补货计算引擎
// ==========================================
// 职责: 按覆盖周数计算周均销量 / 理想库存 / 应补货数量
// 红线: 单个产品计算失败只影响该产品，不丢弃任何产品
// ==========================================

use crate::domain::product::{ProductAggregate, ProductResult};
use crate::domain::types::RequiredColumn;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// 产品级计算错误（只作用于单个产品）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Invalid input for {field}: \"{value}\" is not a valid number.")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("Per-period sales contain non-numeric values.")]
    NonNumericPeriodSales,

    #[error("The computed period divisor ({0}) is not valid.")]
    InvalidDivisor(f64),
}

/// 计算结果（已四舍五入）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplenishmentFigures {
    pub weekly_average: f64,
    pub ideal_stock: f64,
    pub units_to_replenish: f64,
}

// ==========================================
// ReplenishmentCalculator - 补货计算引擎
// ==========================================
#[derive(Debug, Default)]
pub struct ReplenishmentCalculator;

impl ReplenishmentCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 批量计算；输出与输入一一对应、顺序不变
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub fn calculate_batch(&self, products: Vec<ProductAggregate>) -> Vec<ProductResult> {
        let results: Vec<ProductResult> =
            products.into_iter().map(|p| self.calculate(p)).collect();

        debug!(
            failed = results.iter().filter(|r| !r.is_ok()).count(),
            "补货计算完成"
        );
        results
    }

    /// 单个产品计算；失败时三项计算值置 0 并附带错误
    pub fn calculate(&self, mut product: ProductAggregate) -> ProductResult {
        match self.compute(&product) {
            Ok(figures) => ProductResult {
                product,
                weekly_average: figures.weekly_average,
                ideal_stock: figures.ideal_stock,
                units_to_replenish: figures.units_to_replenish,
                error: None,
            },
            Err(reason) => {
                warn!(sku = %product.sku, reason = %reason, "产品补货计算失败");
                let error = format!("{}{}", product.error_prefix(), reason);

                if product.current_month_sales.is_nan() {
                    product.current_month_sales = 0.0;
                }
                if product.averaging_divisor.is_nan() || product.averaging_divisor == 0.0 {
                    product.averaging_divisor = 1.0;
                }

                ProductResult {
                    product,
                    weekly_average: 0.0,
                    ideal_stock: 0.0,
                    units_to_replenish: 0.0,
                    error: Some(error),
                }
            }
        }
    }

    /// 校验输入并计算
    ///
    /// - weekly_average = sum(period_sales) / averaging_divisor
    /// - ideal_stock = weekly_average * coverage_weeks
    /// - units_to_replenish = max(0, ideal_stock - current_stock)
    pub fn compute(
        &self,
        product: &ProductAggregate,
    ) -> Result<ReplenishmentFigures, CalculationError> {
        let checks = [
            (RequiredColumn::CoverageWeeks.header(), product.coverage_weeks),
            (RequiredColumn::CurrentStock.header(), product.current_stock),
            (RequiredColumn::LeadTimeDays.header(), product.lead_time_days),
            ("Averaging divisor", product.averaging_divisor),
        ];
        for (field, value) in checks {
            if !value.is_finite() {
                return Err(CalculationError::InvalidInput { field, value });
            }
        }

        if product.period_sales.iter().any(|v| !v.is_finite()) {
            return Err(CalculationError::NonNumericPeriodSales);
        }

        if product.averaging_divisor <= 0.0 {
            return Err(CalculationError::InvalidDivisor(product.averaging_divisor));
        }

        let total: f64 = product.period_sales.iter().sum();
        let weekly_average = total / product.averaging_divisor;
        let ideal_stock = weekly_average * product.coverage_weeks;
        let units_to_replenish = (ideal_stock - product.current_stock).max(0.0);

        Ok(ReplenishmentFigures {
            weekly_average: round_half_up(weekly_average),
            ideal_stock: round_half_up(ideal_stock),
            units_to_replenish: round_half_up(units_to_replenish),
        })
    }
}

/// 四舍五入（.5 向正无穷方向）
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sku: &str, sales: Vec<f64>, divisor: f64) -> ProductAggregate {
        ProductAggregate {
            row_number: 2,
            sku: sku.to_string(),
            name: "Cafe".to_string(),
            current_month_sales: 10.0,
            replenishment_frequency: "Semanal".to_string(),
            period_sales: sales,
            coverage_weeks: 2.0,
            current_stock: 5.0,
            lead_time_days: 7.0,
            averaging_divisor: divisor,
        }
    }

    #[test]
    fn test_single_week_new_product() {
        let result = ReplenishmentCalculator::new()
            .calculate(product("A", vec![10.0, 0.0, 0.0, 0.0], 1.0));

        assert!(result.is_ok());
        assert_eq!(result.weekly_average, 10.0);
        assert_eq!(result.ideal_stock, 20.0);
        assert_eq!(result.units_to_replenish, 15.0);
    }

    #[test]
    fn test_replenish_never_negative() {
        let mut p = product("A", vec![1.0, 1.0], 2.0);
        p.current_stock = 500.0;
        let result = ReplenishmentCalculator::new().calculate(p);
        assert_eq!(result.units_to_replenish, 0.0);
        assert_eq!(result.ideal_stock, 2.0);
    }

    #[test]
    fn test_negative_sales_clamp_replenishment_to_zero() {
        let result = ReplenishmentCalculator::new().calculate(product("A", vec![-9.0, 0.0], 2.0));
        assert_eq!(result.weekly_average, round_half_up(-4.5));
        assert_eq!(result.units_to_replenish, 0.0);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);

        // 7 / 2 = 3.5 → 4；理想库存 3.5 * 2 = 7；补货 7 - 5 = 2
        let result = ReplenishmentCalculator::new().calculate(product("A", vec![4.0, 3.0], 2.0));
        assert_eq!(result.weekly_average, 4.0);
        assert_eq!(result.ideal_stock, 7.0);
        assert_eq!(result.units_to_replenish, 2.0);
    }

    #[test]
    fn test_non_finite_stock_is_product_scoped_error() {
        let mut bad = product("BAD", vec![3.0, 3.0], 2.0);
        bad.current_stock = f64::INFINITY;
        let good = product("GOOD", vec![3.0, 3.0], 2.0);

        let results = ReplenishmentCalculator::new().calculate_batch(vec![bad, good]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].product.sku, "BAD");
        assert_eq!(results[0].weekly_average, 0.0);
        assert_eq!(results[0].ideal_stock, 0.0);
        assert_eq!(results[0].units_to_replenish, 0.0);
        assert_eq!(
            results[0].error.as_deref(),
            Some("Error for SKU BAD: Invalid input for Stock_Actual: \"inf\" is not a valid number.")
        );
        assert_eq!(results[0].product.current_stock, f64::INFINITY);

        assert!(results[1].is_ok());
        assert_eq!(results[1].weekly_average, 3.0);
    }

    #[test]
    fn test_non_numeric_period_sales() {
        let result =
            ReplenishmentCalculator::new().calculate(product("A", vec![1.0, f64::NAN], 2.0));
        assert_eq!(
            result.error.as_deref(),
            Some("Error for SKU A: Per-period sales contain non-numeric values.")
        );
        assert_eq!(result.status_text(), "Per-period sales contain non-numeric values.");
    }

    #[test]
    fn test_invalid_divisor_defaults_to_one() {
        let result = ReplenishmentCalculator::new().calculate(product("", vec![1.0, 1.0], 0.0));
        assert_eq!(
            result.error.as_deref(),
            Some("Error for SKU at row 2: The computed period divisor (0) is not valid.")
        );
        assert_eq!(result.product.averaging_divisor, 1.0);
        assert_eq!(result.product.current_month_sales, 10.0);
    }

    #[test]
    fn test_weekly_average_matches_sum_over_divisor() {
        let sales = vec![12.0, 9.0, 0.0, 4.0, 6.0];
        let result = ReplenishmentCalculator::new().calculate(product("A", sales.clone(), 3.0));
        let expected = sales.iter().sum::<f64>() / 3.0;
        assert!((result.weekly_average - expected).abs() <= 0.5);
    }
}
