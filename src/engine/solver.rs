// ==========================================
// 供应链网络优化系统 - 求解编排器
// ==========================================
// 职责: 把装配好的变量/约束/目标交给数值求解器, 归类终态
// 契约: 求解器是不透明黑盒; 给定模型的最优目标值确定,
//       简并情形下变量取值不保证唯一
// 终态: 仅 OPTIMAL 进入结果提取, 其余一律走 FAILED 路线
// ==========================================

use crate::domain::types::SolveStatus;
use crate::engine::model::{NetworkModel, ProductionKey, ShipmentKey};
use good_lp::{default_solver, Expression, ResolutionError, Solution, SolverModel};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

// ==========================================
// SolveOutcome - 求解结果
// ==========================================
#[derive(Debug)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// 最优目标函数值 (仅 OPTIMAL 非空)
    pub objective_value: Option<f64>,
    /// 生产变量取值 (仅 OPTIMAL 非空)
    pub production_values: BTreeMap<ProductionKey, f64>,
    /// 运输变量取值 (仅 OPTIMAL 非空)
    pub shipment_values: BTreeMap<ShipmentKey, f64>,
}

impl SolveOutcome {
    fn non_optimal(status: SolveStatus) -> Self {
        Self {
            status,
            objective_value: None,
            production_values: BTreeMap::new(),
            shipment_values: BTreeMap::new(),
        }
    }
}

// ==========================================
// SolveOrchestrator - 求解编排器
// ==========================================
pub struct SolveOrchestrator;

impl SolveOrchestrator {
    /// 最小化求解
    ///
    /// # 参数
    /// - model: 网络流模型 (变量与约束被本次求解消耗)
    /// - objective: 最小化目标表达式
    pub fn solve(model: NetworkModel, objective: Expression) -> SolveOutcome {
        let NetworkModel {
            variables,
            production_vars,
            shipment_vars,
            constraints,
            ..
        } = model;

        info!(
            production_vars_count = production_vars.len(),
            shipment_vars_count = shipment_vars.len(),
            constraints_count = constraints.len(),
            "开始求解"
        );

        // 目标表达式留一份副本, 用于回读最优目标值
        let objective_snapshot = objective.clone();

        let mut problem = variables.minimise(objective).using(default_solver);
        for labeled in constraints {
            debug!(label = %labeled.label, "注册约束");
            problem = problem.with(labeled.constraint);
        }

        match problem.solve() {
            Ok(solution) => {
                let production_values: BTreeMap<ProductionKey, f64> = production_vars
                    .iter()
                    .map(|(key, var)| (key.clone(), solution.value(*var)))
                    .collect();
                let shipment_values: BTreeMap<ShipmentKey, f64> = shipment_vars
                    .iter()
                    .map(|(key, var)| (key.clone(), solution.value(*var)))
                    .collect();
                let objective_value = solution.eval(&objective_snapshot);

                info!(objective_value, "求得最优解");

                SolveOutcome {
                    status: SolveStatus::Optimal,
                    objective_value: Some(objective_value),
                    production_values,
                    shipment_values,
                }
            }
            Err(ResolutionError::Infeasible) => {
                // 预期业务结果 (如需求超过总产能), 不是程序错误
                warn!("模型不可行");
                SolveOutcome::non_optimal(SolveStatus::Infeasible)
            }
            Err(ResolutionError::Unbounded) => {
                warn!("模型无界");
                SolveOutcome::non_optimal(SolveStatus::Unbounded)
            }
            Err(e) => {
                warn!(error = %e, "求解器返回其他非最优终态");
                SolveOutcome::non_optimal(SolveStatus::Other)
            }
        }
    }
}
