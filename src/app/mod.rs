// ==========================================
// 供应链网络优化系统 - 应用层
// ==========================================
// 职责: 装配仓储与 API, 管理共享连接
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
