// ==========================================
// 供应链网络优化系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod analytics_repo;
pub mod error;
pub mod queue_repo;
pub mod reference_repo;
pub mod result_repo;
pub mod run_repo;

// 重导出核心仓储
pub use analytics_repo::{AnalyticsViewRepository, ALLOWED_VIEWS};
pub use error::{RepositoryError, RepositoryResult};
pub use queue_repo::{QueueTask, RunQueueRepository};
pub use reference_repo::ReferenceDataRepository;
pub use result_repo::OptimalResultRepository;
pub use run_repo::OptimizationRunRepository;
