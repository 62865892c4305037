// ==========================================
// 供应链网络优化系统 - 参考数据导入器
// ==========================================
// 职责: 从 CSV 文件导入四张参考表
// 约束: 逐行校验; 坏行跳过并记录原因, 好行单事务入库
// 幂等: 键表 (facilities/products) 用 INSERT OR REPLACE,
//       追加表 (lanes/orders) 重复导入会产生重复行, 由调用方决定是否清表
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use rusqlite::{params, Connection};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

// ==========================================
// CSV 行结构
// ==========================================

#[derive(Debug, Deserialize)]
struct FacilityRow {
    facility_id: String,
    facility_type: String,
    capacity_units: Option<f64>,
    variable_cost_per_unit: f64,
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    product_id: String,
}

#[derive(Debug, Deserialize)]
struct LaneRow {
    origin_facility_id: String,
    destination_id: String,
    cost_per_unit: f64,
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    customer_id: String,
    product_id: String,
    quantity_ordered: f64,
}

// ==========================================
// ImportReport - 导入报告
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported_rows: usize,
    /// 被拒绝的行: (行号, 原因)
    pub rejected_rows: Vec<(usize, String)>,
}

// ==========================================
// ReferenceDataImporter - 参考数据导入器
// ==========================================
pub struct ReferenceDataImporter {
    conn: Arc<Mutex<Connection>>,
}

impl ReferenceDataImporter {
    /// 从已有连接创建导入器
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 导入设施表
    pub fn import_facilities(&self, file_path: &Path) -> ImportResult<ImportReport> {
        let rows = read_csv::<FacilityRow>(file_path)?;
        let mut report = ImportReport {
            total_rows: rows.len(),
            imported_rows: 0,
            rejected_rows: Vec::new(),
        };

        let conn = self.lock_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;

        for (row_no, row) in rows.into_iter().enumerate() {
            let row_no = row_no + 2; // 表头占第 1 行
            let row = match row {
                Ok(r) => r,
                Err(reason) => {
                    report.rejected_rows.push((row_no, reason));
                    continue;
                }
            };
            if let Err(reason) = validate_facility(&row) {
                report.rejected_rows.push((row_no, reason));
                continue;
            }
            tx.execute(
                r#"
                INSERT OR REPLACE INTO facilities (
                    facility_id, facility_type, capacity_units, variable_cost_per_unit
                ) VALUES (?1, ?2, ?3, ?4)
                "#,
                params![
                    row.facility_id,
                    row.facility_type.to_uppercase(),
                    row.capacity_units,
                    row.variable_cost_per_unit,
                ],
            )
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;
            report.imported_rows += 1;
        }

        tx.commit()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;
        log_report("facilities", &report);
        Ok(report)
    }

    /// 导入产品表
    pub fn import_products(&self, file_path: &Path) -> ImportResult<ImportReport> {
        let rows = read_csv::<ProductRow>(file_path)?;
        let mut report = ImportReport {
            total_rows: rows.len(),
            imported_rows: 0,
            rejected_rows: Vec::new(),
        };

        let conn = self.lock_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;

        for (row_no, row) in rows.into_iter().enumerate() {
            let row_no = row_no + 2;
            let row = match row {
                Ok(r) => r,
                Err(reason) => {
                    report.rejected_rows.push((row_no, reason));
                    continue;
                }
            };
            if row.product_id.trim().is_empty() {
                report.rejected_rows.push((row_no, "product_id 为空".to_string()));
                continue;
            }
            tx.execute(
                "INSERT OR REPLACE INTO products (product_id) VALUES (?1)",
                params![row.product_id],
            )
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;
            report.imported_rows += 1;
        }

        tx.commit()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;
        log_report("products", &report);
        Ok(report)
    }

    /// 导入运输通道表
    pub fn import_lanes(&self, file_path: &Path) -> ImportResult<ImportReport> {
        let rows = read_csv::<LaneRow>(file_path)?;
        let mut report = ImportReport {
            total_rows: rows.len(),
            imported_rows: 0,
            rejected_rows: Vec::new(),
        };

        let conn = self.lock_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;

        for (row_no, row) in rows.into_iter().enumerate() {
            let row_no = row_no + 2;
            let row = match row {
                Ok(r) => r,
                Err(reason) => {
                    report.rejected_rows.push((row_no, reason));
                    continue;
                }
            };
            if row.cost_per_unit < 0.0 {
                report
                    .rejected_rows
                    .push((row_no, format!("cost_per_unit 为负: {}", row.cost_per_unit)));
                continue;
            }
            tx.execute(
                r#"
                INSERT INTO transportation_lanes (origin_facility_id, destination_id, cost_per_unit)
                VALUES (?1, ?2, ?3)
                "#,
                params![row.origin_facility_id, row.destination_id, row.cost_per_unit],
            )
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;
            report.imported_rows += 1;
        }

        tx.commit()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;
        log_report("transportation_lanes", &report);
        Ok(report)
    }

    /// 导入客户订单表
    pub fn import_orders(&self, file_path: &Path) -> ImportResult<ImportReport> {
        let rows = read_csv::<OrderRow>(file_path)?;
        let mut report = ImportReport {
            total_rows: rows.len(),
            imported_rows: 0,
            rejected_rows: Vec::new(),
        };

        let conn = self.lock_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;

        for (row_no, row) in rows.into_iter().enumerate() {
            let row_no = row_no + 2;
            let row = match row {
                Ok(r) => r,
                Err(reason) => {
                    report.rejected_rows.push((row_no, reason));
                    continue;
                }
            };
            if row.quantity_ordered < 0.0 {
                report.rejected_rows.push((
                    row_no,
                    format!("quantity_ordered 为负: {}", row.quantity_ordered),
                ));
                continue;
            }
            tx.execute(
                r#"
                INSERT INTO customer_orders (customer_id, product_id, quantity_ordered)
                VALUES (?1, ?2, ?3)
                "#,
                params![row.customer_id, row.product_id, row.quantity_ordered],
            )
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;
            report.imported_rows += 1;
        }

        tx.commit()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;
        log_report("customer_orders", &report);
        Ok(report)
    }

    fn lock_conn(&self) -> ImportResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| ImportError::DatabaseError(format!("锁获取失败: {}", e)))
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 读取 CSV 文件, 每行解析为 Ok(记录) 或 Err(原因)
fn read_csv<T: for<'de> Deserialize<'de>>(
    file_path: &Path,
) -> ImportResult<Vec<Result<T, String>>> {
    // 检查文件存在
    if !file_path.exists() {
        return Err(ImportError::FileNotFound(file_path.display().to_string()));
    }

    // 检查扩展名
    if let Some(ext) = file_path.extension() {
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(
                ext.to_string_lossy().to_string(),
            ));
        }
    }

    let file = File::open(file_path)
        .map_err(|e| ImportError::CsvParseError(e.to_string()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    Ok(reader
        .deserialize::<T>()
        .map(|r| r.map_err(|e| e.to_string()))
        .collect())
}

/// 设施行校验
fn validate_facility(row: &FacilityRow) -> Result<(), String> {
    if row.facility_id.trim().is_empty() {
        return Err("facility_id 为空".to_string());
    }
    match row.facility_type.to_uppercase().as_str() {
        "PLANT" | "WAREHOUSE" => {}
        other => return Err(format!("facility_type 无法识别: {}", other)),
    }
    if let Some(capacity) = row.capacity_units {
        if capacity < 0.0 {
            return Err(format!("capacity_units 为负: {}", capacity));
        }
    }
    Ok(())
}

fn log_report(table: &str, report: &ImportReport) {
    if report.rejected_rows.is_empty() {
        info!(
            table,
            total = report.total_rows,
            imported = report.imported_rows,
            "参考数据导入完成"
        );
    } else {
        warn!(
            table,
            total = report.total_rows,
            imported = report.imported_rows,
            rejected = report.rejected_rows.len(),
            "参考数据导入完成 (部分行被拒绝)"
        );
    }
}
