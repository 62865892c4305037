// ==========================================
// 供应链网络优化系统 - 引擎层
// ==========================================
// 职责: 模型构建 / 目标组装 / 求解 / 结果物化 / 运行编排
// 红线: Engine 不拼 SQL, 所有约束必须携带可诊断标签
// ==========================================

pub mod error;
pub mod loader;
pub mod materializer;
pub mod model;
pub mod objective;
pub mod orchestrator;
pub mod solver;

// 重导出核心引擎
pub use error::{OptimizeError, OptimizeResult};
pub use loader::DataLoader;
pub use materializer::{ResultMaterializer, MATERIALITY_THRESHOLD};
pub use model::{LabeledConstraint, ModelBuilder, NetworkModel, ProductionKey, ShipmentKey};
pub use objective::ObjectiveComposer;
pub use orchestrator::{OptimizationRunner, RunReport};
pub use solver::{SolveOrchestrator, SolveOutcome};
