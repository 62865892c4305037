// ==========================================
// 供应链网络优化系统 - 网络领域模型
// ==========================================
// 依据: Network_Optimizer_Design_v0.2.md - 2. 数据模型
// 参考表实体: 设施 / 产品 / 运输通道 / 客户订单
// ==========================================

use crate::domain::types::FacilityType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// Facility - 设施
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub facility_id: String,            // 设施ID (唯一键)
    pub facility_type: FacilityType,    // 设施类型 (PLANT/WAREHOUSE)
    pub capacity_units: Option<f64>,    // 产能上限 (仅工厂, >= 0)
    pub variable_cost_per_unit: f64,    // 单位可变成本
}

impl Facility {
    /// 是否为工厂
    pub fn is_plant(&self) -> bool {
        self.facility_type == FacilityType::Plant
    }

    /// 是否为仓库
    pub fn is_warehouse(&self) -> bool {
        self.facility_type == FacilityType::Warehouse
    }

    /// 生产变量上界 (缺失产能按 0 处理, 结合正需求会在求解层报不可行)
    pub fn production_upper_bound(&self) -> f64 {
        self.capacity_units.unwrap_or(0.0)
    }
}

// ==========================================
// Product - 产品
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String, // 产品ID (唯一键)
}

// ==========================================
// TransportationLane - 运输通道
// ==========================================
// 通道是有向的; (origin, destination) 允许重复行,
// 成本查找按 lane_id 升序取第一条 (先到先得)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportationLane {
    pub lane_id: i64,               // 通道ID (表内插入顺序)
    pub origin_facility_id: String, // 起点设施
    pub destination_id: String,     // 终点 (设施或客户)
    pub cost_per_unit: f64,         // 单位运输成本 (>= 0)
}

// ==========================================
// CustomerOrder - 客户订单
// ==========================================
// 按 (customer_id, product_id) 求和聚合成需求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub order_id: i64,          // 订单ID
    pub customer_id: String,    // 客户ID
    pub product_id: String,     // 产品ID
    pub quantity_ordered: f64,  // 订购数量 (>= 0)
}

// ==========================================
// ReferenceData - 一次运行加载的参考数据快照
// ==========================================
// 每次运行加载独立副本, 运行间无共享可变状态
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub facilities: Vec<Facility>,
    pub products: Vec<Product>,
    pub lanes: Vec<TransportationLane>,
    pub orders: Vec<CustomerOrder>,
}

impl ReferenceData {
    /// 所有工厂
    pub fn plants(&self) -> impl Iterator<Item = &Facility> {
        self.facilities.iter().filter(|f| f.is_plant())
    }

    /// 所有仓库
    pub fn warehouses(&self) -> impl Iterator<Item = &Facility> {
        self.facilities.iter().filter(|f| f.is_warehouse())
    }

    /// 订单表中出现过的客户 (去重, 有序)
    pub fn customer_ids(&self) -> BTreeSet<String> {
        self.orders.iter().map(|o| o.customer_id.clone()).collect()
    }
}
