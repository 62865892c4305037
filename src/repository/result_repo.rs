// ==========================================
// 供应链网络优化系统 - 最优结果仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: optimal_shipments / optimal_production 的追加写与查询
// 约束: 结果落库与 COMPLETED 状态更新在同一事务内, 全有或全无
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::run::{OptimalProduction, OptimalShipment};
use crate::domain::types::RunStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// OptimalResultRepository - 最优结果仓储
// ==========================================
pub struct OptimalResultRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OptimalResultRepository {
    /// 创建新的 OptimalResultRepository 实例
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

    /// 单事务落库: 运输结果行 + 生产结果行 + COMPLETED 状态与总成本
    ///
    /// # 参数
    /// - run_id: 运行ID
    /// - shipments: 运输结果行 (已过重要性阈值)
    /// - production: 生产结果行 (已过重要性阈值)
    /// - total_cost: 求解器报告的目标函数值
    ///
    /// # 返回
    /// - Ok((usize, usize)): (运输行数, 生产行数)
    ///
    /// # 说明
    /// - 事务保证: 结果行只在 COMPLETED 即将写入时出现, 且相对求解变量集不残缺
    /// - 事务任一步失败则整体回滚, 运行记录保持 RUNNING 由上层转 FAILED
    pub fn persist_completed(
        &self,
        run_id: &str,
        shipments: &[OptimalShipment],
        production: &[OptimalProduction],
        total_cost: f64,
    ) -> RepositoryResult<(usize, usize)> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut shipment_count = 0;
        for s in shipments {
            tx.execute(
                r#"
                INSERT INTO optimal_shipments (
                    run_id, origin_facility_id, destination_id, product_id, quantity_shipped
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    s.run_id,
                    s.origin_facility_id,
                    s.destination_id,
                    s.product_id,
                    s.quantity_shipped,
                ],
            )?;
            shipment_count += 1;
        }

        let mut production_count = 0;
        for p in production {
            tx.execute(
                r#"
                INSERT INTO optimal_production (
                    run_id, facility_id, product_id, quantity_produced
                ) VALUES (?1, ?2, ?3, ?4)
                "#,
                params![p.run_id, p.facility_id, p.product_id, p.quantity_produced],
            )?;
            production_count += 1;
        }

        let updated = tx.execute(
            "UPDATE optimization_runs SET status = ?1, total_cost = ?2 WHERE run_id = ?3",
            params![RunStatus::Completed.to_db_str(), total_cost, run_id],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "OptimizationRun".to_string(),
                id: run_id.to_string(),
            });
        }

        tx.commit()?;
        Ok((shipment_count, production_count))
    }

    /// 查询运行的所有运输结果行
    pub fn find_shipments_by_run(&self, run_id: &str) -> RepositoryResult<Vec<OptimalShipment>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT run_id, origin_facility_id, destination_id, product_id, quantity_shipped
            FROM optimal_shipments
            WHERE run_id = ?1
            ORDER BY origin_facility_id ASC, destination_id ASC, product_id ASC
            "#,
        )?;

        let shipments = stmt
            .query_map(params![run_id], |row| {
                Ok(OptimalShipment {
                    run_id: row.get(0)?,
                    origin_facility_id: row.get(1)?,
                    destination_id: row.get(2)?,
                    product_id: row.get(3)?,
                    quantity_shipped: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(shipments)
    }

    /// 查询运行的所有生产结果行
    pub fn find_production_by_run(&self, run_id: &str) -> RepositoryResult<Vec<OptimalProduction>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT run_id, facility_id, product_id, quantity_produced
            FROM optimal_production
            WHERE run_id = ?1
            ORDER BY facility_id ASC, product_id ASC
            "#,
        )?;

        let production = stmt
            .query_map(params![run_id], |row| {
                Ok(OptimalProduction {
                    run_id: row.get(0)?,
                    facility_id: row.get(1)?,
                    product_id: row.get(2)?,
                    quantity_produced: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(production)
    }
}
