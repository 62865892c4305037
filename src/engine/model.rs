// ==========================================
// 供应链网络优化系统 - 模型构建器
// ==========================================
// 依据: Network_Optimizer_Design_v0.2.md - 4.2 变量与约束体系
// 职责: 纯函数式地从参考数据推导决策变量与约束, 无副作用无 I/O
// 红线: 缺失 (通道, 产品) 组合按零流量处理, 是稀疏建模规则,
//       绝不展开为全设施对的稠密模型
// ==========================================

use crate::domain::network::ReferenceData;
use good_lp::{constraint, variable, variables, Constraint, Expression, ProblemVariables, Variable};
use std::collections::BTreeMap;

/// 生产变量键: (工厂ID, 产品ID)
pub type ProductionKey = (String, String);

/// 运输变量键: (起点设施ID, 终点ID, 产品ID)
pub type ShipmentKey = (String, String, String);

// ==========================================
// LabeledConstraint - 带诊断标签的约束
// ==========================================
// 标签格式:
// - flow_balance_{warehouse}_{product}
// - prod_balance_{plant}_{product}
// - demand_{customer}_{product}
pub struct LabeledConstraint {
    pub label: String,
    pub constraint: Constraint,
}

// ==========================================
// NetworkModel - 一次运行的网络流模型
// ==========================================
pub struct NetworkModel {
    pub variables: ProblemVariables,
    pub production_vars: BTreeMap<ProductionKey, Variable>,
    pub shipment_vars: BTreeMap<ShipmentKey, Variable>,
    pub constraints: Vec<LabeledConstraint>,
    pub demand: BTreeMap<(String, String), f64>,
}

// ==========================================
// ModelBuilder - 模型构建器
// ==========================================
pub struct ModelBuilder;

impl ModelBuilder {
    /// 从参考数据构建变量与约束
    ///
    /// # 变量构建
    /// - 生产变量: 工厂 × 产品 全叉积, 界 [0, capacity_units]。
    ///   不会生产的组合在最优解中自然为零, 以换取构建逻辑的简单正确
    /// - 运输变量: 通道行 × 产品, 界 [0, +inf)。
    ///   稀疏性跟随通道表, 不做全设施对叉积;
    ///   重复 (起点, 终点) 通道行共享同一变量
    ///
    /// # 边界策略
    /// - 产品总产能为零且需求为正 => 模型不可行,
    ///   由求解器报非最优状态, 不是本层错误
    pub fn build(data: &ReferenceData) -> NetworkModel {
        let mut vars = variables!();

        // ==========================================
        // 生产变量
        // ==========================================
        let mut production_vars: BTreeMap<ProductionKey, Variable> = BTreeMap::new();
        for plant in data.plants() {
            for product in &data.products {
                let var = vars.add(
                    variable()
                        .min(0.0)
                        .max(plant.production_upper_bound())
                        .name(format!("prod_{}_{}", plant.facility_id, product.product_id)),
                );
                production_vars.insert(
                    (plant.facility_id.clone(), product.product_id.clone()),
                    var,
                );
            }
        }

        // ==========================================
        // 运输变量
        // ==========================================
        let mut shipment_vars: BTreeMap<ShipmentKey, Variable> = BTreeMap::new();
        for lane in &data.lanes {
            for product in &data.products {
                let key = (
                    lane.origin_facility_id.clone(),
                    lane.destination_id.clone(),
                    product.product_id.clone(),
                );
                if shipment_vars.contains_key(&key) {
                    continue;
                }
                let var = vars.add(variable().min(0.0).name(format!(
                    "ship_{}_{}_{}",
                    lane.origin_facility_id, lane.destination_id, product.product_id
                )));
                shipment_vars.insert(key, var);
            }
        }

        // ==========================================
        // 需求聚合: (客户, 产品) 求和
        // ==========================================
        let demand = aggregate_demand(data);
        let customers = data.customer_ids();

        let mut constraints = Vec::new();

        // ==========================================
        // 流平衡约束: 每 (仓库, 产品), 入流 == 出流
        // ==========================================
        for warehouse in data.warehouses() {
            for product in &data.products {
                let inflow = data.facilities.iter().fold(
                    Expression::from(0.0),
                    |acc, origin| {
                        match shipment_vars.get(&(
                            origin.facility_id.clone(),
                            warehouse.facility_id.clone(),
                            product.product_id.clone(),
                        )) {
                            Some(var) => acc + *var,
                            None => acc, // 无通道 => 零流量
                        }
                    },
                );
                let outflow = customers.iter().fold(Expression::from(0.0), |acc, customer| {
                    match shipment_vars.get(&(
                        warehouse.facility_id.clone(),
                        customer.clone(),
                        product.product_id.clone(),
                    )) {
                        Some(var) => acc + *var,
                        None => acc,
                    }
                });
                constraints.push(LabeledConstraint {
                    label: format!(
                        "flow_balance_{}_{}",
                        warehouse.facility_id, product.product_id
                    ),
                    constraint: constraint::eq(inflow, outflow),
                });
            }
        }

        // ==========================================
        // 产量平衡约束: 每 (工厂, 产品), 生产量 == 对所有仓库的出货量
        // ==========================================
        for plant in data.plants() {
            for product in &data.products {
                let produced = match production_vars
                    .get(&(plant.facility_id.clone(), product.product_id.clone()))
                {
                    Some(var) => Expression::from(*var),
                    None => Expression::from(0.0),
                };
                let shipped_out = data.warehouses().fold(
                    Expression::from(0.0),
                    |acc, warehouse| {
                        match shipment_vars.get(&(
                            plant.facility_id.clone(),
                            warehouse.facility_id.clone(),
                            product.product_id.clone(),
                        )) {
                            Some(var) => acc + *var,
                            None => acc,
                        }
                    },
                );
                constraints.push(LabeledConstraint {
                    label: format!(
                        "prod_balance_{}_{}",
                        plant.facility_id, product.product_id
                    ),
                    constraint: constraint::eq(produced, shipped_out),
                });
            }
        }

        // ==========================================
        // 需求约束: 每正需求 (客户, 产品), 仓库入流 >= 需求量
        // 允许超额满足, 不要求恰好等于
        // ==========================================
        for ((customer, product_id), quantity) in &demand {
            if *quantity <= 0.0 {
                continue;
            }
            let inflow = data.warehouses().fold(Expression::from(0.0), |acc, warehouse| {
                match shipment_vars.get(&(
                    warehouse.facility_id.clone(),
                    customer.clone(),
                    product_id.clone(),
                )) {
                    Some(var) => acc + *var,
                    None => acc,
                }
            });
            constraints.push(LabeledConstraint {
                label: format!("demand_{}_{}", customer, product_id),
                constraint: constraint::geq(inflow, Expression::from(*quantity)),
            });
        }

        NetworkModel {
            variables: vars,
            production_vars,
            shipment_vars,
            constraints,
            demand,
        }
    }
}

/// 按 (customer_id, product_id) 求和聚合订单为需求
pub fn aggregate_demand(data: &ReferenceData) -> BTreeMap<(String, String), f64> {
    let mut demand: BTreeMap<(String, String), f64> = BTreeMap::new();
    for order in &data.orders {
        *demand
            .entry((order.customer_id.clone(), order.product_id.clone()))
            .or_insert(0.0) += order.quantity_ordered;
    }
    demand
}
