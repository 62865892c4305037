// ==========================================
// 供应链网络优化系统 - 队列工作单元入口
// ==========================================
// 用法: optimize-worker
// 职责: 持续消费持久化运行队列; 多个工作单元可作为
//       独立 OS 进程并发运行于同一数据库
// ==========================================

use std::time::Duration;
use supply_chain_opt::app::AppState;
use supply_chain_opt::config::AppConfig;
use supply_chain_opt::logging;
use supply_chain_opt::worker::QueueWorker;

fn main() {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 队列工作单元", supply_chain_opt::APP_NAME);
    tracing::info!("系统版本: {}", supply_chain_opt::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env();
    tracing::info!("使用数据库: {}", config.db_path);

    let app_state = AppState::new(config.db_path).expect("无法初始化AppState");

    let worker = QueueWorker::new(
        app_state.runner.clone(),
        app_state.queue_repo.clone(),
        Duration::from_millis(config.worker_poll_ms),
        config.stale_claim_secs,
    );
    tracing::info!(worker_id = %worker.worker_id(), "工作单元就绪");

    worker.run_forever();
}
