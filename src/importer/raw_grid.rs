// ==========================================
// Smart Supply - 原始表格结构
// ==========================================
// 用途: 文件解析产物（第 0 行为表头，仅用于列名查找）
// ==========================================

use std::fmt;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// 单元格原始值
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// 是否为空单元格（仅空白的文本不算空）
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 去除首尾空白后的文本；空单元格返回空串
    pub fn trimmed_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

/// 原始表格（行 0 = 表头）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGrid {
    rows: Vec<Vec<CellValue>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// 由字符串二维数组构建（测试/内存数据使用）
    pub fn from_strings<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|c| CellValue::from(c.as_ref())).collect())
                .collect(),
        }
    }

    pub fn header(&self) -> Option<&[CellValue]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// 数据行（不含表头），附带 1 起的行号（表头为第 1 行）
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[CellValue])> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, row)| (idx + 1, row.as_slice()))
    }

    /// 总行数（含表头）
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 读取单元格；越界返回 Empty
    pub fn cell(row: &[CellValue], col: usize) -> &CellValue {
        row.get(col).unwrap_or(&EMPTY_CELL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_detection() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text(String::new()).is_empty());
        assert!(CellValue::from("").is_empty());
        assert!(!CellValue::Text("   ".to_string()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_trimmed_text() {
        assert_eq!(CellValue::Text("  SKU1 ".to_string()).trimmed_text(), "SKU1");
        assert_eq!(CellValue::Number(10.0).trimmed_text(), "10");
        assert_eq!(CellValue::Number(2.5).trimmed_text(), "2.5");
        assert_eq!(CellValue::Empty.trimmed_text(), "");
    }

    #[test]
    fn test_data_rows_numbering() {
        let grid = RawGrid::from_strings(vec![vec!["h1", "h2"], vec!["a", "b"], vec!["c", ""]]);
        let rows: Vec<usize> = grid.data_rows().map(|(n, _)| n).collect();
        assert_eq!(rows, vec![2, 3]);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.header().unwrap().len(), 2);
    }

    #[test]
    fn test_cell_out_of_range_is_empty() {
        let row = vec![CellValue::from("x")];
        assert_eq!(RawGrid::cell(&row, 5), &CellValue::Empty);
    }
}
