// ==========================================
// 供应链网络优化系统 - 领域类型定义
// ==========================================
// 依据: Network_Optimizer_Design_v0.2.md - 2.1 实体与状态
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 设施类型 (Facility Type)
// ==========================================
// 红线: 只有 Plant 持有产能与生产变量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityType {
    Plant,     // 工厂 (生产节点)
    Warehouse, // 仓库 (中转节点)
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityType::Plant => write!(f, "PLANT"),
            FacilityType::Warehouse => write!(f, "WAREHOUSE"),
        }
    }
}

impl FacilityType {
    /// 从字符串解析设施类型
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PLANT" => Some(FacilityType::Plant),
            "WAREHOUSE" => Some(FacilityType::Warehouse),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            FacilityType::Plant => "PLANT",
            FacilityType::Warehouse => "WAREHOUSE",
        }
    }
}

// ==========================================
// 运行状态 (Run Status)
// ==========================================
// 状态机: RUNNING -> COMPLETED | FAILED
// 红线: 控制器返回后不允许残留 RUNNING
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Running,   // 执行中
    Completed, // 已完成 (total_cost 非空)
    Failed,    // 已失败 (total_cost 为空)
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Running => write!(f, "RUNNING"),
            RunStatus::Completed => write!(f, "COMPLETED"),
            RunStatus::Failed => write!(f, "FAILED"),
        }
    }
}

impl RunStatus {
    /// 从字符串解析运行状态
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "RUNNING" => Some(RunStatus::Running),
            "COMPLETED" => Some(RunStatus::Completed),
            "FAILED" => Some(RunStatus::Failed),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "RUNNING",
            RunStatus::Completed => "COMPLETED",
            RunStatus::Failed => "FAILED",
        }
    }

    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

// ==========================================
// 求解状态 (Solve Status)
// ==========================================
// 求解器终态的内部归类, 仅 Optimal 允许进入结果落库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    Optimal,    // 最优解
    Infeasible, // 不可行 (如需求超过总产能)
    Unbounded,  // 无界
    Other,      // 其他非最优终态
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::Unbounded => write!(f, "UNBOUNDED"),
            SolveStatus::Other => write!(f, "OTHER"),
        }
    }
}
