// ==========================================
// 供应链网络优化系统 - 结果查询 API
// ==========================================
// 职责: 按 run_id 返回运行状态/成本/时间戳及全部结果行
// 契约: run_id 未知 => NotFound; 本层不做聚合加工
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::run::{OptimalProduction, OptimalShipment};
use crate::domain::types::RunStatus;
use crate::repository::result_repo::OptimalResultRepository;
use crate::repository::run_repo::OptimizationRunRepository;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ==========================================
// DTO
// ==========================================

/// 运行详情
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDetails {
    pub run_id: String,
    pub run_timestamp: NaiveDateTime,
    pub status: RunStatus,
    pub total_cost: Option<f64>,
}

/// 一次运行的完整查询结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResultView {
    pub run_details: RunDetails,
    pub shipments: Vec<OptimalShipment>,
    pub production: Vec<OptimalProduction>,
}

// ==========================================
// ResultApi - 结果查询 API
// ==========================================
pub struct ResultApi {
    run_repo: Arc<OptimizationRunRepository>,
    result_repo: Arc<OptimalResultRepository>,
}

impl ResultApi {
    /// 创建新的 ResultApi 实例
    pub fn new(
        run_repo: Arc<OptimizationRunRepository>,
        result_repo: Arc<OptimalResultRepository>,
    ) -> Self {
        Self {
            run_repo,
            result_repo,
        }
    }

    /// 查询一次运行的详情与结果行
    ///
    /// # 参数
    /// - run_id: 运行ID
    ///
    /// # 返回
    /// - Ok(OptimizationResultView): 运行详情 + 运输行 + 生产行
    /// - Err(NotFound): run_id 未知
    pub fn get_results(&self, run_id: &str) -> ApiResult<OptimizationResultView> {
        if run_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("运行ID不能为空".to_string()));
        }

        let run = self
            .run_repo
            .find_by_id(run_id)?
            .ok_or_else(|| ApiError::NotFound(format!("运行不存在: run_id={}", run_id)))?;

        let shipments = self.result_repo.find_shipments_by_run(run_id)?;
        let production = self.result_repo.find_production_by_run(run_id)?;

        Ok(OptimizationResultView {
            run_details: RunDetails {
                run_id: run.run_id,
                run_timestamp: run.run_timestamp,
                status: run.status,
                total_cost: run.total_cost,
            },
            shipments,
            production,
        })
    }
}
