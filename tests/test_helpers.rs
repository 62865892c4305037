// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据播种等功能
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};
use supply_chain_opt::db;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = db::open_sqlite_connection(&db_path)?;
    db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开共享连接 (统一 PRAGMA)
pub fn open_shared_connection(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    let conn = db::open_sqlite_connection(db_path)?;
    Ok(Arc::new(Mutex::new(conn)))
}

// ==========================================
// 参考数据播种
// ==========================================

pub fn insert_facility(
    conn: &Connection,
    facility_id: &str,
    facility_type: &str,
    capacity_units: Option<f64>,
    variable_cost_per_unit: f64,
) {
    conn.execute(
        r#"
        INSERT INTO facilities (facility_id, facility_type, capacity_units, variable_cost_per_unit)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![facility_id, facility_type, capacity_units, variable_cost_per_unit],
    )
    .unwrap();
}

pub fn insert_product(conn: &Connection, product_id: &str) {
    conn.execute(
        "INSERT INTO products (product_id) VALUES (?1)",
        params![product_id],
    )
    .unwrap();
}

pub fn insert_lane(conn: &Connection, origin: &str, destination: &str, cost_per_unit: f64) {
    conn.execute(
        r#"
        INSERT INTO transportation_lanes (origin_facility_id, destination_id, cost_per_unit)
        VALUES (?1, ?2, ?3)
        "#,
        params![origin, destination, cost_per_unit],
    )
    .unwrap();
}

pub fn insert_order(conn: &Connection, customer_id: &str, product_id: &str, quantity: f64) {
    conn.execute(
        r#"
        INSERT INTO customer_orders (customer_id, product_id, quantity_ordered)
        VALUES (?1, ?2, ?3)
        "#,
        params![customer_id, product_id, quantity],
    )
    .unwrap();
}

// ==========================================
// 标准场景
// ==========================================

/// 场景A: 单工厂(产能100, 成本1) → 单仓库 → 单客户(需求50)
/// 通道: P1→W1 成本2, W1→C1 成本1
/// 预期: COMPLETED, 总成本 50*(1+2+1)=200
pub fn seed_scenario_a(conn: &Connection) {
    insert_facility(conn, "P1", "PLANT", Some(100.0), 1.0);
    insert_facility(conn, "W1", "WAREHOUSE", None, 0.0);
    insert_product(conn, "SKU1");
    insert_lane(conn, "P1", "W1", 2.0);
    insert_lane(conn, "W1", "C1", 1.0);
    insert_order(conn, "C1", "SKU1", 50.0);
}

/// 场景B: 与A相同但需求150, 超过产能 => 不可行
pub fn seed_scenario_b(conn: &Connection) {
    insert_facility(conn, "P1", "PLANT", Some(100.0), 1.0);
    insert_facility(conn, "W1", "WAREHOUSE", None, 0.0);
    insert_product(conn, "SKU1");
    insert_lane(conn, "P1", "W1", 2.0);
    insert_lane(conn, "W1", "C1", 1.0);
    insert_order(conn, "C1", "SKU1", 150.0);
}

/// 场景C: 两客户需求 30/20, 共用一仓库, 产能充足
pub fn seed_scenario_c(conn: &Connection) {
    insert_facility(conn, "P1", "PLANT", Some(100.0), 1.0);
    insert_facility(conn, "W1", "WAREHOUSE", None, 0.0);
    insert_product(conn, "SKU1");
    insert_lane(conn, "P1", "W1", 2.0);
    insert_lane(conn, "W1", "C1", 1.0);
    insert_lane(conn, "W1", "C2", 1.0);
    insert_order(conn, "C1", "SKU1", 30.0);
    insert_order(conn, "C2", "SKU1", 20.0);
}

/// 场景D: 存在严格更贵的备选路径 (经 W2), 最优流量为零
pub fn seed_scenario_d(conn: &Connection) {
    insert_facility(conn, "P1", "PLANT", Some(100.0), 1.0);
    insert_facility(conn, "W1", "WAREHOUSE", None, 0.0);
    insert_facility(conn, "W2", "WAREHOUSE", None, 0.0);
    insert_product(conn, "SKU1");
    insert_lane(conn, "P1", "W1", 2.0);
    insert_lane(conn, "W1", "C1", 1.0);
    insert_lane(conn, "P1", "W2", 5.0);
    insert_lane(conn, "W2", "C1", 5.0);
    insert_order(conn, "C1", "SKU1", 50.0);
}
