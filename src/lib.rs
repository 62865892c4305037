// ==========================================
// 供应链网络优化系统 - 核心库
// ==========================================
// 依据: Network_Optimizer_Design_v0.2.md - 系统宪法
// 技术栈: Rust + SQLite + 线性规划 (good_lp/microlp)
// 系统定位: 网络流决策支持系统 (结果只读, 人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 模型构建与求解
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/schema 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配与共享状态
pub mod app;

// 队列消费者 - 运行任务的独立工作单元
pub mod worker;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FacilityType, RunStatus, SolveStatus};

// 领域实体
pub use domain::{
    CustomerOrder, Facility, OptimalProduction, OptimalShipment, OptimizationRun, Product,
    TransportationLane,
};

// 引擎
pub use engine::{
    DataLoader, ModelBuilder, ObjectiveComposer, OptimizationRunner, ResultMaterializer,
    RunReport, SolveOrchestrator, SolveOutcome,
};

// API
pub use api::{AnalyticsApi, ResultApi, TriggerApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "供应链网络优化系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

// ==========================================
// 预编译检查
// ==========================================
