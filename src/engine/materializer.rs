// ==========================================
// 供应链网络优化系统 - 结果物化器
// ==========================================
// 职责: 把超过重要性阈值的求解变量取值映射为结果行
// 阈值: 严格大于 0.1 个单位; 以下视为数值噪声, 不产出结果行
// ==========================================

use crate::domain::run::{OptimalProduction, OptimalShipment};
use crate::engine::model::{ProductionKey, ShipmentKey};
use std::collections::BTreeMap;
use tracing::debug;

/// 重要性阈值 (绝对单位)
pub const MATERIALITY_THRESHOLD: f64 = 0.1;

// ==========================================
// ResultMaterializer - 结果物化器
// ==========================================
pub struct ResultMaterializer;

impl ResultMaterializer {
    /// 提取运输结果行 (> 阈值)
    pub fn extract_shipments(
        run_id: &str,
        shipment_values: &BTreeMap<ShipmentKey, f64>,
    ) -> Vec<OptimalShipment> {
        let rows: Vec<OptimalShipment> = shipment_values
            .iter()
            .filter(|(_, value)| **value > MATERIALITY_THRESHOLD)
            .map(|((origin, destination, product_id), value)| OptimalShipment {
                run_id: run_id.to_string(),
                origin_facility_id: origin.clone(),
                destination_id: destination.clone(),
                product_id: product_id.clone(),
                quantity_shipped: *value,
            })
            .collect();

        debug!(
            total = shipment_values.len(),
            material = rows.len(),
            "运输结果物化完成"
        );
        rows
    }

    /// 提取生产结果行 (> 阈值)
    pub fn extract_production(
        run_id: &str,
        production_values: &BTreeMap<ProductionKey, f64>,
    ) -> Vec<OptimalProduction> {
        let rows: Vec<OptimalProduction> = production_values
            .iter()
            .filter(|(_, value)| **value > MATERIALITY_THRESHOLD)
            .map(|((facility_id, product_id), value)| OptimalProduction {
                run_id: run_id.to_string(),
                facility_id: facility_id.clone(),
                product_id: product_id.clone(),
                quantity_produced: *value,
            })
            .collect();

        debug!(
            total = production_values.len(),
            material = rows.len(),
            "生产结果物化完成"
        );
        rows
    }
}
