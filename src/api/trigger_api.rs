// ==========================================
// 供应链网络优化系统 - 运行触发 API
// ==========================================
// 职责: 把一次运行请求入队到持久化队列, 由独立工作单元消费
// 语义: 发射后不管; 本接口只返回 run_id,
//       运行结果只通过 optimization_runs 状态对外
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::repository::queue_repo::RunQueueRepository;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// ==========================================
// TriggerApi - 运行触发 API
// ==========================================
pub struct TriggerApi {
    queue_repo: Arc<RunQueueRepository>,
}

impl TriggerApi {
    /// 创建新的 TriggerApi 实例
    pub fn new(queue_repo: Arc<RunQueueRepository>) -> Self {
        Self { queue_repo }
    }

    /// 触发一次优化运行 (入队)
    ///
    /// # 参数
    /// - run_id: 调用方提供的运行ID; 为 None 时生成 UUID v4
    ///
    /// # 返回
    /// - Ok(String): 本次运行的 run_id
    pub fn trigger_run(&self, run_id: Option<String>) -> ApiResult<String> {
        let run_id = match run_id {
            Some(id) if id.trim().is_empty() => {
                return Err(ApiError::InvalidInput("运行ID不能为空白".to_string()));
            }
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        };

        let queue_id = self.queue_repo.enqueue(&run_id)?;
        info!(run_id = %run_id, queue_id, "优化运行已入队");
        Ok(run_id)
    }
}
