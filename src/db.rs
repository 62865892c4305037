// ==========================================
// 供应链网络优化系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免“部分模块外键开启/部分不开启”
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 统一 schema 初始化入口（参考表/运行表/结果表/分析视图/运行队列）
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
///
/// 说明：
/// - 版本号用于**提示/告警**（不做自动迁移），避免静默在旧库上运行导致隐性错误。
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// 初始化数据库 schema（幂等）
///
/// 表结构:
/// - 参考表: facilities / products / transportation_lanes / customer_orders
/// - 运行表: optimization_runs（先插入后更新，status 两次变更）
/// - 结果表: optimal_shipments / optimal_production（仅追加，外键到 run_id）
/// - 队列表: run_queue（持久化触发队列）
/// - 分析视图: cost_to_serve / service_level_by_customer / stockout_risk
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        INSERT OR IGNORE INTO schema_version (version) VALUES (1);

        CREATE TABLE IF NOT EXISTS facilities (
            facility_id TEXT PRIMARY KEY,
            facility_type TEXT NOT NULL CHECK (facility_type IN ('PLANT', 'WAREHOUSE')),
            capacity_units REAL,
            variable_cost_per_unit REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS products (
            product_id TEXT PRIMARY KEY
        );

        CREATE TABLE IF NOT EXISTS transportation_lanes (
            lane_id INTEGER PRIMARY KEY AUTOINCREMENT,
            origin_facility_id TEXT NOT NULL,
            destination_id TEXT NOT NULL,
            cost_per_unit REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS customer_orders (
            order_id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id TEXT NOT NULL,
            product_id TEXT NOT NULL,
            quantity_ordered REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS optimization_runs (
            run_id TEXT PRIMARY KEY,
            run_timestamp TEXT NOT NULL DEFAULT (datetime('now')),
            status TEXT NOT NULL CHECK (status IN ('RUNNING', 'COMPLETED', 'FAILED')),
            total_cost REAL
        );

        CREATE TABLE IF NOT EXISTS optimal_shipments (
            run_id TEXT NOT NULL REFERENCES optimization_runs(run_id),
            origin_facility_id TEXT NOT NULL,
            destination_id TEXT NOT NULL,
            product_id TEXT NOT NULL,
            quantity_shipped REAL NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_optimal_shipments_run ON optimal_shipments(run_id);

        CREATE TABLE IF NOT EXISTS optimal_production (
            run_id TEXT NOT NULL REFERENCES optimization_runs(run_id),
            facility_id TEXT NOT NULL,
            product_id TEXT NOT NULL,
            quantity_produced REAL NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_optimal_production_run ON optimal_production(run_id);

        CREATE TABLE IF NOT EXISTS run_queue (
            queue_id INTEGER PRIMARY KEY AUTOINCREMENT,
            run_id TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'PENDING' CHECK (status IN ('PENDING', 'CLAIMED', 'DONE')),
            enqueued_at TEXT NOT NULL DEFAULT (datetime('now')),
            claimed_at TEXT,
            claimed_by TEXT,
            attempts INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_run_queue_status ON run_queue(status, enqueued_at);

        CREATE VIEW IF NOT EXISTS cost_to_serve AS
        SELECT s.run_id,
               s.destination_id AS customer_id,
               s.product_id,
               SUM(s.quantity_shipped * l.cost_per_unit) AS transport_cost
        FROM optimal_shipments s
        JOIN transportation_lanes l ON l.lane_id = (
            SELECT lane_id FROM transportation_lanes
            WHERE origin_facility_id = s.origin_facility_id
              AND destination_id = s.destination_id
            ORDER BY lane_id
            LIMIT 1
        )
        GROUP BY s.run_id, s.destination_id, s.product_id;

        CREATE VIEW IF NOT EXISTS service_level_by_customer AS
        SELECT r.run_id,
               d.customer_id,
               d.product_id,
               d.quantity_demanded,
               COALESCE(s.quantity_shipped, 0.0) AS quantity_delivered
        FROM optimization_runs r
        CROSS JOIN (
            SELECT customer_id, product_id, SUM(quantity_ordered) AS quantity_demanded
            FROM customer_orders
            GROUP BY customer_id, product_id
        ) d
        LEFT JOIN (
            SELECT run_id, destination_id, product_id, SUM(quantity_shipped) AS quantity_shipped
            FROM optimal_shipments
            GROUP BY run_id, destination_id, product_id
        ) s ON s.run_id = r.run_id
           AND s.destination_id = d.customer_id
           AND s.product_id = d.product_id
        WHERE r.status = 'COMPLETED';

        CREATE VIEW IF NOT EXISTS stockout_risk AS
        SELECT d.product_id,
               d.total_demand,
               COALESCE(c.total_capacity, 0.0) AS total_capacity,
               d.total_demand - COALESCE(c.total_capacity, 0.0) AS shortfall
        FROM (
            SELECT product_id, SUM(quantity_ordered) AS total_demand
            FROM customer_orders
            GROUP BY product_id
        ) d
        CROSS JOIN (
            SELECT SUM(capacity_units) AS total_capacity
            FROM facilities
            WHERE facility_type = 'PLANT'
        ) c
        WHERE d.total_demand > COALESCE(c.total_capacity, 0.0);
        "#,
    )?;
    Ok(())
}
