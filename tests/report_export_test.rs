// ==========================================
// 补货报表导出测试
// ==========================================
// 测试目标: 管道结果 → .xlsx → 重新读取，可见列一致
// ==========================================

mod test_helpers;

use calamine::{open_workbook_auto, Data, Reader};
use smart_supply::api::ReplenishmentApi;
use smart_supply::exporter::ReportExporter;
use smart_supply::importer::{SalesImporter, SalesImporterImpl};
use smart_supply::logging;
use test_helpers::{build_csv, periods, standard_headers, MockConfig, SalesRowBuilder};

fn sample_csv() -> String {
    build_csv(
        &standard_headers(),
        &[
            SalesRowBuilder::new("CAF-001", "04/03/2024", 12.0).name("Cafe Molido"),
            SalesRowBuilder::new("CAF-001", "13/03/2024", 9.0).name("Cafe Molido"),
            SalesRowBuilder::new("TE-010", "13/03/2024", 5.0).name("Te Verde").stock_raw("inf"),
            SalesRowBuilder::new("CAF-002", "10/03/2024", 7.0).name("Cafe en Grano").coverage(3.0),
        ],
    )
}

fn cell_text(data: Option<&Data>) -> String {
    match data {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(f)) => f.to_string(),
        Some(Data::Int(i)) => i.to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[tokio::test]
async fn test_export_round_trip_preserves_visible_columns() {
    logging::init_test();

    let outcome = SalesImporterImpl::with_defaults()
        .import_bytes("ventas.csv", sample_csv().as_bytes(), periods(3))
        .unwrap();
    assert_eq!(outcome.results.len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let api = ReplenishmentApi::new(MockConfig::with_output_dir(dir.path()))
        .await
        .unwrap();
    let path = api.export_results(&outcome.results).await.unwrap().unwrap();
    assert_eq!(path, dir.path().join("Test_Report.xlsx"));

    let mut workbook = open_workbook_auto(&path).unwrap();
    let range = workbook.worksheet_range("Test Sheet").unwrap();

    let headers = ReportExporter::column_headers(3);
    assert_eq!(range.width(), headers.len());
    assert_eq!(range.height(), outcome.results.len() + 1);
    for (col, header) in headers.iter().enumerate() {
        assert_eq!(&cell_text(range.get_value((0, col as u32))), header);
    }

    let weekly_col = headers.iter().position(|h| h == "Weekly Average Sales").unwrap() as u32;
    let status_col = headers.iter().position(|h| h == "Status").unwrap() as u32;

    for (idx, result) in outcome.results.iter().enumerate() {
        let row = idx as u32 + 1;
        assert_eq!(cell_text(range.get_value((row, 0))), result.product.sku);
        assert_eq!(
            range.get_value((row, weekly_col)),
            Some(&Data::Float(result.weekly_average))
        );
        assert_eq!(cell_text(range.get_value((row, status_col))), result.status_text());
    }

    // 失败产品的状态列不带 "Error for SKU" 前缀
    let failed = cell_text(range.get_value((2, status_col)));
    assert_eq!(failed, "Invalid input for Stock_Actual: \"inf\" is not a valid number.");
}

#[tokio::test]
async fn test_export_filtered_results() {
    let outcome = SalesImporterImpl::with_defaults()
        .import_bytes("ventas.csv", sample_csv().as_bytes(), periods(2))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let api = ReplenishmentApi::new(MockConfig::with_output_dir(dir.path()))
        .await
        .unwrap();

    let (filtered, summary) = api.filter_results(&outcome.results, "caf", "grano, molido");
    assert_eq!(summary.total, 3);
    assert_eq!(summary.shown, 2);

    let bytes = api.build_report(&filtered).await.unwrap().unwrap();
    let mut workbook =
        calamine::open_workbook_auto_from_rs(std::io::Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range("Test Sheet").unwrap();

    assert_eq!(range.height(), 3);
    assert_eq!(cell_text(range.get_value((1, 0))), "CAF-001");
    assert_eq!(cell_text(range.get_value((2, 0))), "CAF-002");
}

#[tokio::test]
async fn test_empty_results_export_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let api = ReplenishmentApi::new(MockConfig::with_output_dir(dir.path()))
        .await
        .unwrap();

    assert!(api.export_results(&[]).await.unwrap().is_none());
    assert!(api.build_report(&[]).await.unwrap().is_none());
    assert!(!dir.path().join("Test_Report.xlsx").exists());
}
