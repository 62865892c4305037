// ==========================================
// 供应链网络优化系统 - 优化运行仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: optimization_runs 表的插入与终态更新
// 模式: 先插入 (RUNNING), 后更新一次 (COMPLETED/FAILED), 从不删除
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::run::OptimizationRun;
use crate::domain::types::RunStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// OptimizationRunRepository - 优化运行仓储
// ==========================================
pub struct OptimizationRunRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OptimizationRunRepository {
    /// 创建新的 OptimizationRunRepository 实例
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

    /// 插入运行记录, 初始状态 RUNNING
    ///
    /// # 说明
    /// - run_id 重复时返回 UniqueConstraintViolation, 已有记录不被触碰
    pub fn insert_running(&self, run_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO optimization_runs (run_id, status) VALUES (?1, ?2)",
            params![run_id, RunStatus::Running.to_db_str()],
        )?;
        Ok(())
    }

    /// 将运行标记为 FAILED (total_cost 保持为空)
    ///
    /// # 返回
    /// - Ok(true): 记录存在且已更新
    /// - Ok(false): 记录不存在
    pub fn mark_failed(&self, run_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let updated = conn.execute(
            "UPDATE optimization_runs SET status = ?1, total_cost = NULL WHERE run_id = ?2",
            params![RunStatus::Failed.to_db_str(), run_id],
        )?;
        Ok(updated > 0)
    }

    /// 按 run_id 查询运行记录
    pub fn find_by_id(&self, run_id: &str) -> RepositoryResult<Option<OptimizationRun>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT run_id, run_timestamp, status, total_cost
            FROM optimization_runs
            WHERE run_id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![run_id], |row| {
            Ok(OptimizationRun {
                run_id: row.get(0)?,
                run_timestamp: parse_timestamp(&row.get::<_, String>(1)?),
                status: RunStatus::from_str(&row.get::<_, String>(2)?)
                    .unwrap_or(RunStatus::Failed),
                total_cost: row.get(3)?,
            })
        });

        match result {
            Ok(run) => Ok(Some(run)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 解析 datetime('now') 产生的时间戳
fn parse_timestamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| NaiveDateTime::default())
}
