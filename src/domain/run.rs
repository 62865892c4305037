// ==========================================
// 供应链网络优化系统 - 运行领域模型
// ==========================================
// 依据: Network_Optimizer_Design_v0.2.md - 2.3 运行与结果
// 红线: 结果行仅追加, 不可反向修改
// ==========================================

use crate::domain::types::RunStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// OptimizationRun - 优化运行
// ==========================================
// 生命周期: 创建时插入 RUNNING, 终态时更新一次, 从不删除
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRun {
    pub run_id: String,             // 运行ID (调用方提供或生成, 全局唯一)
    pub run_timestamp: NaiveDateTime, // 创建时间
    pub status: RunStatus,          // 运行状态
    pub total_cost: Option<f64>,    // 总成本 (仅 COMPLETED 非空)
}

impl OptimizationRun {
    /// 不变式检查: total_cost 非空 当且仅当 status = COMPLETED
    pub fn is_consistent(&self) -> bool {
        match self.status {
            RunStatus::Completed => self.total_cost.is_some(),
            _ => self.total_cost.is_none(),
        }
    }
}

// ==========================================
// OptimalShipment - 最优运输量结果行
// ==========================================
// 每个超过重要性阈值的运输变量一行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimalShipment {
    pub run_id: String,             // 关联运行
    pub origin_facility_id: String, // 起点设施
    pub destination_id: String,     // 终点
    pub product_id: String,         // 产品
    pub quantity_shipped: f64,      // 运输量
}

// ==========================================
// OptimalProduction - 最优生产量结果行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimalProduction {
    pub run_id: String,        // 关联运行
    pub facility_id: String,   // 工厂
    pub product_id: String,    // 产品
    pub quantity_produced: f64, // 生产量
}
