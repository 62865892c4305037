// ==========================================
// 供应链网络优化系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约定: 单连接 Arc<Mutex<Connection>> 注入各仓储,
//       不依赖进程级全局句柄
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{AnalyticsApi, ResultApi, TriggerApi};
use crate::db;
use crate::engine::OptimizationRunner;
use crate::repository::{
    AnalyticsViewRepository, OptimalResultRepository, OptimizationRunRepository,
    RunQueueRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 结果查询API
    pub result_api: Arc<ResultApi>,

    /// 分析视图API
    pub analytics_api: Arc<AnalyticsApi>,

    /// 运行触发API
    pub trigger_api: Arc<TriggerApi>,

    /// 运行编排器（供单次运行入口与队列工作单元使用）
    pub runner: Arc<OptimizationRunner>,

    /// 运行队列仓储（供队列工作单元使用）
    pub queue_repo: Arc<RunQueueRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 说明
    /// - 打开连接并应用统一 PRAGMA, 幂等初始化 schema
    pub fn new(db_path: String) -> Result<Self, Box<dyn std::error::Error>> {
        let conn = db::open_sqlite_connection(&db_path)?;
        db::init_schema(&conn)?;

        // schema 版本仅提示/告警, 不做自动迁移
        if let Some(version) = db::read_schema_version(&conn)? {
            if version != db::CURRENT_SCHEMA_VERSION {
                tracing::warn!(
                    version,
                    expected = db::CURRENT_SCHEMA_VERSION,
                    "schema 版本与当前代码不一致"
                );
            }
        }

        let conn = Arc::new(Mutex::new(conn));

        let run_repo = Arc::new(OptimizationRunRepository::from_connection(conn.clone()));
        let result_repo = Arc::new(OptimalResultRepository::from_connection(conn.clone()));
        let analytics_repo = Arc::new(AnalyticsViewRepository::from_connection(conn.clone()));
        let queue_repo = Arc::new(RunQueueRepository::from_connection(conn.clone()));

        Ok(Self {
            db_path,
            result_api: Arc::new(ResultApi::new(run_repo, result_repo)),
            analytics_api: Arc::new(AnalyticsApi::new(analytics_repo)),
            trigger_api: Arc::new(TriggerApi::new(queue_repo.clone())),
            runner: Arc::new(OptimizationRunner::from_connection(conn)),
            queue_repo,
        })
    }
}
