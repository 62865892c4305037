// ==========================================
// 供应链网络优化系统 - 数据加载器
// ==========================================
// 职责: 通过仓储层读取四张参考表, 形成本次运行的独立数据快照
// 契约: 数据源不可达或必需表缺失/为空 => DataUnavailable,
//       不在本层重试, 交由运行编排器转 FAILED
// ==========================================

use crate::domain::network::ReferenceData;
use crate::engine::error::{OptimizeError, OptimizeResult};
use crate::repository::reference_repo::ReferenceDataRepository;
use std::sync::Arc;
use tracing::info;

// ==========================================
// DataLoader - 数据加载器
// ==========================================
pub struct DataLoader {
    reference_repo: Arc<ReferenceDataRepository>,
}

impl DataLoader {
    /// 创建新的数据加载器
    pub fn new(reference_repo: Arc<ReferenceDataRepository>) -> Self {
        Self { reference_repo }
    }

    /// 加载参考数据快照
    ///
    /// # 返回
    /// - Ok(ReferenceData): 四张表的内存副本
    /// - Err(DataUnavailable): 任一必需表不可达或为空
    pub fn load(&self) -> OptimizeResult<ReferenceData> {
        let facilities = self
            .reference_repo
            .load_facilities()
            .map_err(|e| OptimizeError::DataUnavailable(e.to_string()))?;
        let products = self
            .reference_repo
            .load_products()
            .map_err(|e| OptimizeError::DataUnavailable(e.to_string()))?;
        let lanes = self
            .reference_repo
            .load_lanes()
            .map_err(|e| OptimizeError::DataUnavailable(e.to_string()))?;
        let orders = self
            .reference_repo
            .load_orders()
            .map_err(|e| OptimizeError::DataUnavailable(e.to_string()))?;

        ensure_not_empty("facilities", facilities.len())?;
        ensure_not_empty("products", products.len())?;
        ensure_not_empty("transportation_lanes", lanes.len())?;
        ensure_not_empty("customer_orders", orders.len())?;

        info!(
            facilities_count = facilities.len(),
            products_count = products.len(),
            lanes_count = lanes.len(),
            orders_count = orders.len(),
            "参考数据加载完成"
        );

        Ok(ReferenceData {
            facilities,
            products,
            lanes,
            orders,
        })
    }
}

/// 必需表非空校验
fn ensure_not_empty(table: &str, count: usize) -> OptimizeResult<()> {
    if count == 0 {
        return Err(OptimizeError::DataUnavailable(format!(
            "必需表为空: {}",
            table
        )));
    }
    Ok(())
}
