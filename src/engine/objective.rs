// ==========================================
// 供应链网络优化系统 - 目标函数组装器
// ==========================================
// 职责: 最小化目标 = Σ 生产变量 × 设施单位可变成本
//                 + Σ 运输变量 × 通道单位运输成本
// 约束: 运输成本按 (起点, 终点) 在通道表中首条匹配生效;
//       查找缺失 => ConfigurationError (防御性不变式, 按构建规则不应发生)
// ==========================================

use crate::domain::network::ReferenceData;
use crate::engine::error::{OptimizeError, OptimizeResult};
use crate::engine::model::NetworkModel;
use good_lp::Expression;
use std::collections::BTreeMap;

// ==========================================
// ObjectiveComposer - 目标函数组装器
// ==========================================
pub struct ObjectiveComposer;

impl ObjectiveComposer {
    /// 组装最小化目标函数
    ///
    /// # 参数
    /// - model: 已构建的网络流模型
    /// - data: 参考数据快照 (成本查找来源)
    ///
    /// # 返回
    /// - Ok(Expression): 总成本表达式
    /// - Err(Configuration): 某变量缺少成本条目, 指向参考数据质量问题
    pub fn compose(model: &NetworkModel, data: &ReferenceData) -> OptimizeResult<Expression> {
        // 设施成本表
        let facility_costs: BTreeMap<&str, f64> = data
            .facilities
            .iter()
            .map(|f| (f.facility_id.as_str(), f.variable_cost_per_unit))
            .collect();

        // 通道成本表: lane_id 升序扫描, 首条 (起点, 终点) 匹配生效
        let mut lane_costs: BTreeMap<(&str, &str), f64> = BTreeMap::new();
        for lane in &data.lanes {
            lane_costs
                .entry((lane.origin_facility_id.as_str(), lane.destination_id.as_str()))
                .or_insert(lane.cost_per_unit);
        }

        let mut objective = Expression::from(0.0);

        // 生产成本
        for ((facility_id, product_id), var) in &model.production_vars {
            let cost = facility_costs.get(facility_id.as_str()).ok_or_else(|| {
                OptimizeError::Configuration(format!(
                    "生产变量缺少设施成本: facility_id={}, product_id={}",
                    facility_id, product_id
                ))
            })?;
            objective += *cost * *var;
        }

        // 运输成本
        for ((origin, destination, product_id), var) in &model.shipment_vars {
            let cost = lane_costs
                .get(&(origin.as_str(), destination.as_str()))
                .ok_or_else(|| {
                    OptimizeError::Configuration(format!(
                        "运输变量缺少通道成本: {} -> {} (product_id={})",
                        origin, destination, product_id
                    ))
                })?;
            objective += *cost * *var;
        }

        Ok(objective)
    }
}
