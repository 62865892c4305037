// ==========================================
// 供应链网络优化系统 - 演示数据生成器
// ==========================================
// 用法: cargo run --bin generate_test_data [db_path]
// 职责: 在目标数据库中播种一个小型演示网络
//       (2 工厂 / 2 仓库 / 3 产品 / 4 客户)
// ==========================================

use rusqlite::params;
use supply_chain_opt::config::app_config::get_default_db_path;
use supply_chain_opt::db;

fn main() {
    supply_chain_opt::logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    tracing::info!("目标数据库: {}", db_path);

    let conn = db::open_sqlite_connection(&db_path).expect("无法打开数据库");
    db::init_schema(&conn).expect("schema 初始化失败");

    // 设施
    let facilities: &[(&str, &str, Option<f64>, f64)] = &[
        ("PLANT_SH", "PLANT", Some(500.0), 1.2),
        ("PLANT_WH", "PLANT", Some(300.0), 0.9),
        ("WH_EAST", "WAREHOUSE", None, 0.0),
        ("WH_SOUTH", "WAREHOUSE", None, 0.0),
    ];
    for (id, facility_type, capacity, cost) in facilities {
        conn.execute(
            r#"
            INSERT OR REPLACE INTO facilities (
                facility_id, facility_type, capacity_units, variable_cost_per_unit
            ) VALUES (?1, ?2, ?3, ?4)
            "#,
            params![id, facility_type, capacity, cost],
        )
        .expect("设施写入失败");
    }

    // 产品
    for product_id in ["SKU_A", "SKU_B", "SKU_C"] {
        conn.execute(
            "INSERT OR REPLACE INTO products (product_id) VALUES (?1)",
            params![product_id],
        )
        .expect("产品写入失败");
    }

    // 运输通道
    let lanes: &[(&str, &str, f64)] = &[
        ("PLANT_SH", "WH_EAST", 2.0),
        ("PLANT_SH", "WH_SOUTH", 3.5),
        ("PLANT_WH", "WH_EAST", 2.8),
        ("PLANT_WH", "WH_SOUTH", 1.6),
        ("WH_EAST", "CUST_1", 1.0),
        ("WH_EAST", "CUST_2", 1.4),
        ("WH_SOUTH", "CUST_3", 0.8),
        ("WH_SOUTH", "CUST_4", 1.1),
        ("WH_EAST", "CUST_3", 2.6),
        ("WH_SOUTH", "CUST_2", 2.2),
    ];
    for (origin, destination, cost) in lanes {
        conn.execute(
            r#"
            INSERT INTO transportation_lanes (origin_facility_id, destination_id, cost_per_unit)
            VALUES (?1, ?2, ?3)
            "#,
            params![origin, destination, cost],
        )
        .expect("通道写入失败");
    }

    // 客户订单
    let orders: &[(&str, &str, f64)] = &[
        ("CUST_1", "SKU_A", 80.0),
        ("CUST_1", "SKU_B", 40.0),
        ("CUST_2", "SKU_A", 60.0),
        ("CUST_3", "SKU_B", 90.0),
        ("CUST_3", "SKU_C", 30.0),
        ("CUST_4", "SKU_C", 50.0),
        ("CUST_4", "SKU_A", 20.0),
    ];
    for (customer, product, quantity) in orders {
        conn.execute(
            r#"
            INSERT INTO customer_orders (customer_id, product_id, quantity_ordered)
            VALUES (?1, ?2, ?3)
            "#,
            params![customer, product, quantity],
        )
        .expect("订单写入失败");
    }

    tracing::info!("演示数据播种完成");
    tracing::info!("可执行: supply-chain-opt <run_id> 或启动 optimize-worker 消费队列");
}
