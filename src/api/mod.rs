// ==========================================
// 供应链网络优化系统 - API 层
// ==========================================
// 职责: 面向外部协作方的业务接口
// - 触发接口: 入队一次运行 (发射后不管, 结果只通过运行状态对外)
// - 结果接口: 按 run_id 查询运行详情与结果行
// - 分析接口: 白名单视图原样读取
// ==========================================

pub mod analytics_api;
pub mod error;
pub mod result_api;
pub mod trigger_api;

// 重导出核心 API
pub use analytics_api::AnalyticsApi;
pub use error::{ApiError, ApiResult};
pub use result_api::{OptimizationResultView, ResultApi, RunDetails};
pub use trigger_api::TriggerApi;
