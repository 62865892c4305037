// ==========================================
// 供应链网络优化系统 - 单次运行入口
// ==========================================
// 技术栈: Rust + SQLite + 线性规划 (good_lp/microlp)
// 用法: supply-chain-opt [run_id]
//       run_id 缺省时生成 UUID v4
// 语义: 发射后不管; 运行结果只通过 optimization_runs 状态对外,
//       本进程退出码不承载业务结果
// ==========================================

use supply_chain_opt::app::AppState;
use supply_chain_opt::config::AppConfig;
use supply_chain_opt::logging;
use uuid::Uuid;

fn main() {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 单次运行入口", supply_chain_opt::APP_NAME);
    tracing::info!("系统版本: {}", supply_chain_opt::VERSION);
    tracing::info!("==================================================");

    // 运行ID: 调用方提供, 缺省时生成
    let run_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    // 获取数据库路径
    let config = AppConfig::from_env();
    tracing::info!("使用数据库: {}", config.db_path);

    // 创建AppState
    let app_state = AppState::new(config.db_path).expect("无法初始化AppState");

    // 执行运行; 所有阶段错误在编排器内部收敛为 FAILED 状态
    let report = app_state.runner.execute(&run_id);
    tracing::info!(
        run_id = %report.run_id,
        status = %report.status,
        total_cost = report.total_cost,
        "运行结束"
    );
}
