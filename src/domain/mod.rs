// ==========================================
// 供应链网络优化系统 - 领域层
// ==========================================
// 职责: 定义网络实体与运行实体, 不含数据访问
// ==========================================

pub mod network;
pub mod run;
pub mod types;

// 重导出核心实体
pub use network::{CustomerOrder, Facility, Product, ReferenceData, TransportationLane};
pub use run::{OptimalProduction, OptimalShipment, OptimizationRun};
pub use types::{FacilityType, RunStatus, SolveStatus};
