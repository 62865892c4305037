// ==========================================
// 导入层集成测试
// ==========================================
// 职责: 验证 CSV 参考数据导入 → 优化运行 的数据通路,
//       以及坏行拒绝与报告行为
// ==========================================

mod test_helpers;

use std::fs;
use std::path::PathBuf;
use supply_chain_opt::domain::types::RunStatus;
use supply_chain_opt::engine::OptimizationRunner;
use supply_chain_opt::importer::{ImportError, ReferenceDataImporter};
use supply_chain_opt::repository::ReferenceDataRepository;
use test_helpers::*;

/// 写入一个临时 CSV 文件
fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_import_full_network_and_optimize() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let facilities = write_csv(
        &dir,
        "facilities.csv",
        "facility_id,facility_type,capacity_units,variable_cost_per_unit\n\
         P1,PLANT,100.0,1.0\n\
         W1,WAREHOUSE,,0.0\n",
    );
    let products = write_csv(&dir, "products.csv", "product_id\nSKU1\n");
    let lanes = write_csv(
        &dir,
        "lanes.csv",
        "origin_facility_id,destination_id,cost_per_unit\n\
         P1,W1,2.0\n\
         W1,C1,1.0\n",
    );
    let orders = write_csv(
        &dir,
        "orders.csv",
        "customer_id,product_id,quantity_ordered\nC1,SKU1,50.0\n",
    );

    let importer = ReferenceDataImporter::from_connection(conn.clone());
    assert_eq!(importer.import_facilities(&facilities).unwrap().imported_rows, 2);
    assert_eq!(importer.import_products(&products).unwrap().imported_rows, 1);
    assert_eq!(importer.import_lanes(&lanes).unwrap().imported_rows, 2);
    assert_eq!(importer.import_orders(&orders).unwrap().imported_rows, 1);

    // 导入的数据可直接驱动一次完整优化
    let runner = OptimizationRunner::from_connection(conn);
    let report = runner.execute("run-import");
    assert_eq!(report.status, RunStatus::Completed);
    assert!((report.total_cost.unwrap() - 200.0).abs() < 1e-6);
}

#[test]
fn test_bad_rows_are_rejected_with_reasons() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let facilities = write_csv(
        &dir,
        "facilities.csv",
        "facility_id,facility_type,capacity_units,variable_cost_per_unit\n\
         P1,PLANT,100.0,1.0\n\
         X1,DEPOT,50.0,1.0\n\
         ,PLANT,10.0,1.0\n",
    );
    let orders = write_csv(
        &dir,
        "orders.csv",
        "customer_id,product_id,quantity_ordered\n\
         C1,SKU1,50.0\n\
         C2,SKU1,-3.0\n",
    );

    let importer = ReferenceDataImporter::from_connection(conn.clone());

    let report = importer.import_facilities(&facilities).unwrap();
    assert_eq!(report.total_rows, 3);
    assert_eq!(report.imported_rows, 1);
    assert_eq!(report.rejected_rows.len(), 2);
    // 行号从数据首行(第2行)起算
    assert!(report.rejected_rows.iter().any(|(row, _)| *row == 3));

    let report = importer.import_orders(&orders).unwrap();
    assert_eq!(report.imported_rows, 1);
    assert_eq!(report.rejected_rows.len(), 1);

    // 好行已入库
    let repo = ReferenceDataRepository::from_connection(conn);
    assert_eq!(repo.load_facilities().unwrap().len(), 1);
    assert_eq!(repo.load_orders().unwrap().len(), 1);
}

#[test]
fn test_missing_file_is_file_not_found() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    let importer = ReferenceDataImporter::from_connection(conn);

    let err = importer
        .import_products(std::path::Path::new("/nonexistent/products.csv"))
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_non_csv_extension_is_unsupported() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared_connection(&db_path).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "products.xlsx", "product_id\nSKU1\n");

    let importer = ReferenceDataImporter::from_connection(conn);
    let err = importer.import_products(&path).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}
