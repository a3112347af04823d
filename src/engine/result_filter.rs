// ==========================================
// Smart Supply - 结果筛选
// ==========================================
// 职责: 按 SKU / 名称关键字筛选计算结果（导出前使用）
// 规则: 同一字段内多个关键字为 OR，字段之间为 AND
// ==========================================

use crate::domain::product::ProductResult;
use serde::{Deserialize, Serialize};

/// 筛选摘要（"显示 x / 共 y"）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub shown: usize,
    pub total: usize,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultFilter {
    sku_terms: Vec<String>,
    name_terms: Vec<String>,
}

impl ResultFilter {
    /// 关键字以逗号分隔；去空白、转小写、丢弃空项
    pub fn new(sku_search: &str, name_search: &str) -> Self {
        Self {
            sku_terms: split_terms(sku_search),
            name_terms: split_terms(name_search),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.sku_terms.is_empty() || !self.name_terms.is_empty()
    }

    pub fn matches(&self, result: &ProductResult) -> bool {
        field_matches(&self.sku_terms, &result.product.sku)
            && field_matches(&self.name_terms, &result.product.name)
    }

    /// 筛选（保持原顺序）
    pub fn apply(&self, results: &[ProductResult]) -> (Vec<ProductResult>, FilterSummary) {
        let filtered: Vec<ProductResult> = results
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        let summary = FilterSummary {
            shown: filtered.len(),
            total: results.len(),
            is_active: self.is_active(),
        };
        (filtered, summary)
    }
}

fn split_terms(search: &str) -> Vec<String> {
    search
        .split(',')
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

fn field_matches(terms: &[String], value: &str) -> bool {
    if terms.is_empty() {
        return true;
    }
    let value = value.to_lowercase();
    terms.iter().any(|term| value.contains(term.as_str()))
}
