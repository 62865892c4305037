// ==========================================
// 供应链网络优化系统 - 应用配置
// ==========================================
// 职责: 数据库路径与工作单元轮询间隔的解析
// 约定: 环境变量优先, 其次用户数据目录, 最后当前目录回退
// ==========================================

use std::path::PathBuf;

/// 默认工作单元轮询间隔（毫秒）
pub const DEFAULT_WORKER_POLL_MS: u64 = 500;

/// 默认滞留任务回收阈值（秒）
pub const DEFAULT_STALE_CLAIM_SECS: i64 = 600;

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 数据库文件路径
    pub db_path: String,
    /// 工作单元队列轮询间隔（毫秒）
    pub worker_poll_ms: u64,
    /// 滞留 CLAIMED 任务回收阈值（秒）
    pub stale_claim_secs: i64,
}

impl AppConfig {
    /// 从环境变量解析配置
    ///
    /// # 环境变量
    /// - SCO_DB_PATH: 数据库路径（默认: 用户数据目录/supply-chain-opt/supply_chain_opt.db）
    /// - SCO_WORKER_POLL_MS: 队列轮询间隔毫秒（默认: 500）
    /// - SCO_STALE_CLAIM_SECS: 滞留任务回收阈值秒（默认: 600）
    pub fn from_env() -> Self {
        Self {
            db_path: get_default_db_path(),
            worker_poll_ms: std::env::var("SCO_WORKER_POLL_MS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_WORKER_POLL_MS),
            stale_claim_secs: std::env::var("SCO_STALE_CLAIM_SECS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_STALE_CLAIM_SECS),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 获取默认数据库路径
///
/// # 路径策略
/// - 环境变量 SCO_DB_PATH 显式指定时优先（便于调试/测试/CI）
/// - 其次用户数据目录/supply-chain-opt/supply_chain_opt.db
/// - 拿不到用户数据目录时回退 ./supply_chain_opt.db
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var("SCO_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./supply_chain_opt.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("supply-chain-opt");
        // 目录创建失败时继续用当前目录回退
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("supply_chain_opt.db");
        }
    }

    path.to_string_lossy().into_owned()
}
