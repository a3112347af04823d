// ==========================================
// Smart Supply - 表头校验器实现
// ==========================================
// 阶段 1: 校验必需列齐全，生成 列名 → 列下标 映射
// 规则: 列名去首尾空白后精确匹配；顺序无关；多余列忽略
// ==========================================

use crate::domain::types::RequiredColumn;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::raw_grid::CellValue;
use crate::importer::sales_importer_trait::HeaderValidator as HeaderValidatorTrait;

/// 必需列 → 列下标（每个文件构建一次，之后只读）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    indices: [usize; RequiredColumn::ALL.len()],
}

impl HeaderMap {
    pub fn index_of(&self, column: RequiredColumn) -> usize {
        self.indices[column as usize]
    }
}

pub struct HeaderValidator;

impl HeaderValidatorTrait for HeaderValidator {
    fn validate_headers(&self, header_row: &[CellValue]) -> ImportResult<HeaderMap> {
        let trimmed: Vec<String> = header_row.iter().map(|cell| cell.trimmed_text()).collect();

        let mut indices = [0usize; RequiredColumn::ALL.len()];
        let mut missing = Vec::new();

        // 按固定声明顺序检查，收集全部缺失列
        for column in RequiredColumn::ALL {
            match trimmed.iter().position(|h| h == column.header()) {
                Some(idx) => indices[column as usize] = idx,
                None => missing.push(column.header().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(ImportError::MissingHeaders(missing));
        }

        Ok(HeaderMap { indices })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<CellValue> {
        names.iter().map(|n| CellValue::from(*n)).collect()
    }

    const ALL_HEADERS: [&str; 8] = [
        "ID_Producto / SKU",
        "Nombre",
        "Fecha",
        "Unidades_Vendidas",
        "Semanas_Cobertura_Stock",
        "Stock_Actual",
        "Lead_Time_Dias",
        "Frecuencia_Reposicion",
    ];

    #[test]
    fn test_headers_any_order_with_extras() {
        let row = header(&[
            "Extra",
            "Frecuencia_Reposicion",
            " Fecha ",
            "Nombre",
            "ID_Producto / SKU",
            "Lead_Time_Dias",
            "Stock_Actual",
            "Semanas_Cobertura_Stock",
            "Unidades_Vendidas",
        ]);

        let map = HeaderValidator.validate_headers(&row).unwrap();
        assert_eq!(map.index_of(RequiredColumn::Sku), 4);
        assert_eq!(map.index_of(RequiredColumn::Date), 2);
        assert_eq!(map.index_of(RequiredColumn::ReplenishmentFrequency), 1);
        assert_eq!(map.index_of(RequiredColumn::UnitsSold), 8);
    }

    #[test]
    fn test_missing_single_header() {
        let names: Vec<&str> = ALL_HEADERS
            .iter()
            .copied()
            .filter(|h| *h != "Lead_Time_Dias")
            .collect();

        let err = HeaderValidator.validate_headers(&header(&names)).unwrap_err();
        match err {
            ImportError::MissingHeaders(missing) => {
                assert_eq!(missing, vec!["Lead_Time_Dias".to_string()])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_headers_reported_in_declared_order() {
        let row = header(&["Stock_Actual", "Nombre", "Unidades_Vendidas"]);
        let err = HeaderValidator.validate_headers(&row).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Required headers not found in file: ID_Producto / SKU, Fecha, \
             Semanas_Cobertura_Stock, Lead_Time_Dias, Frecuencia_Reposicion."
        );
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        let mut names = ALL_HEADERS.to_vec();
        names[1] = "nombre";
        let err = HeaderValidator.validate_headers(&header(&names)).unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingHeaders(ref m) if m == &vec!["Nombre".to_string()]
        ));
    }

    #[test]
    fn test_duplicate_header_uses_first_occurrence() {
        let mut names = ALL_HEADERS.to_vec();
        names.push("Nombre");
        let map = HeaderValidator.validate_headers(&header(&names)).unwrap();
        assert_eq!(map.index_of(RequiredColumn::Name), 1);
    }
}
