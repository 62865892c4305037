// ==========================================
// 供应链网络优化系统 - 参考数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 读取 facilities / products / transportation_lanes / customer_orders
// 约束: 查询固定排序, 保证模型构建的确定性
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::network::{CustomerOrder, Facility, Product, TransportationLane};
use crate::domain::types::FacilityType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// ReferenceDataRepository - 参考数据仓储
// ==========================================
/// 参考数据仓储
/// 职责: 四张参考表的只读访问
/// 红线: 不含业务逻辑，只负责数据访问
pub struct ReferenceDataRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ReferenceDataRepository {
    /// 创建新的 ReferenceDataRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 加载所有设施 (按 facility_id 升序)
    pub fn load_facilities(&self) -> RepositoryResult<Vec<Facility>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT facility_id, facility_type, capacity_units, variable_cost_per_unit
            FROM facilities
            ORDER BY facility_id ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<f64>>(2)?,
                    row.get::<_, f64>(3)?,
                ))
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        // 未知设施类型按坏数据处理, 不静默吞掉
        rows.into_iter()
            .map(|(facility_id, type_str, capacity_units, variable_cost_per_unit)| {
                let facility_type = FacilityType::from_str(&type_str).ok_or_else(|| {
                    RepositoryError::FieldValueError {
                        field: "facility_type".to_string(),
                        message: format!("facility_id={} 的设施类型无法识别: {}", facility_id, type_str),
                    }
                })?;
                Ok(Facility {
                    facility_id,
                    facility_type,
                    capacity_units,
                    variable_cost_per_unit,
                })
            })
            .collect()
    }

    /// 加载所有产品 (按 product_id 升序)
    pub fn load_products(&self) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT product_id FROM products ORDER BY product_id ASC")?;

        let products = stmt
            .query_map([], |row| {
                Ok(Product {
                    product_id: row.get(0)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(products)
    }

    /// 加载所有运输通道 (按 lane_id 升序, 即表内插入顺序)
    ///
    /// # 说明
    /// - 重复 (origin, destination) 行保留原样, 成本查找由上层取第一条
    pub fn load_lanes(&self) -> RepositoryResult<Vec<TransportationLane>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT lane_id, origin_facility_id, destination_id, cost_per_unit
            FROM transportation_lanes
            ORDER BY lane_id ASC
            "#,
        )?;

        let lanes = stmt
            .query_map([], |row| {
                Ok(TransportationLane {
                    lane_id: row.get(0)?,
                    origin_facility_id: row.get(1)?,
                    destination_id: row.get(2)?,
                    cost_per_unit: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(lanes)
    }

    /// 加载所有客户订单 (按 order_id 升序)
    pub fn load_orders(&self) -> RepositoryResult<Vec<CustomerOrder>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT order_id, customer_id, product_id, quantity_ordered
            FROM customer_orders
            ORDER BY order_id ASC
            "#,
        )?;

        let orders = stmt
            .query_map([], |row| {
                Ok(CustomerOrder {
                    order_id: row.get(0)?,
                    customer_id: row.get(1)?,
                    product_id: row.get(2)?,
                    quantity_ordered: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(orders)
    }
}
