// ==========================================
// 供应链网络优化系统 - 运行队列仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: run_queue 表的入队/认领/完成/滞留回收
// 语义: 至少一次执行 (认领后进程消失的任务可被回收重投)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// QueueTask - 队列任务
// ==========================================
#[derive(Debug, Clone)]
pub struct QueueTask {
    pub queue_id: i64,      // 队列项ID
    pub run_id: String,     // 关联运行
    pub attempts: i32,      // 已尝试次数 (认领即计数)
}

// ==========================================
// RunQueueRepository - 运行队列仓储
// ==========================================
pub struct RunQueueRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RunQueueRepository {
    /// 创建新的 RunQueueRepository 实例
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

    /// 入队一个运行任务
    ///
    /// # 返回
    /// - Ok(i64): 队列项ID
    pub fn enqueue(&self, run_id: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO run_queue (run_id, status) VALUES (?1, 'PENDING')",
            params![run_id],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 认领最早的 PENDING 任务 (认领即置 CLAIMED 并计数)
    ///
    /// # 参数
    /// - worker_id: 工作单元标识
    ///
    /// # 返回
    /// - Ok(Some(QueueTask)): 认领成功
    /// - Ok(None): 队列为空
    ///
    /// # 说明
    /// - 事务内 SELECT + UPDATE, 多工作单元并发认领互不重复
    pub fn claim_next(&self, worker_id: &str) -> RepositoryResult<Option<QueueTask>> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let candidate: Option<(i64, String, i32)> = tx
            .query_row(
                r#"
                SELECT queue_id, run_id, attempts
                FROM run_queue
                WHERE status = 'PENDING'
                ORDER BY enqueued_at ASC, queue_id ASC
                LIMIT 1
                "#,
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let task = match candidate {
            Some((queue_id, run_id, attempts)) => {
                tx.execute(
                    r#"
                    UPDATE run_queue
                    SET status = 'CLAIMED',
                        claimed_at = datetime('now'),
                        claimed_by = ?1,
                        attempts = attempts + 1
                    WHERE queue_id = ?2
                    "#,
                    params![worker_id, queue_id],
                )?;
                Some(QueueTask {
                    queue_id,
                    run_id,
                    attempts: attempts + 1,
                })
            }
            None => None,
        };

        tx.commit()?;
        Ok(task)
    }

    /// 将任务标记为 DONE
    pub fn mark_done(&self, queue_id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let updated = conn.execute(
            "UPDATE run_queue SET status = 'DONE' WHERE queue_id = ?1",
            params![queue_id],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "QueueTask".to_string(),
                id: queue_id.to_string(),
            });
        }
        Ok(())
    }

    /// 回收滞留的 CLAIMED 任务 (认领时间早于给定秒数)
    ///
    /// # 返回
    /// - Ok(usize): 重投为 PENDING 的任务数
    pub fn requeue_stale(&self, older_than_secs: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count = conn.execute(
            r#"
            UPDATE run_queue
            SET status = 'PENDING', claimed_at = NULL, claimed_by = NULL
            WHERE status = 'CLAIMED'
              AND claimed_at < datetime('now', '-' || ?1 || ' seconds')
            "#,
            params![older_than_secs],
        )?;
        Ok(count)
    }

    /// 统计 PENDING 任务数
    pub fn pending_count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM run_queue WHERE status = 'PENDING'",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
