// ==========================================
// 供应链网络优化系统 - 分析视图 API
// ==========================================
// 职责: 固定白名单内的分析视图查询, 行原样返回
// 契约: 视图名不在白名单内 => InvalidInput; 本层不做二次聚合
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::repository::analytics_repo::{AnalyticsViewRepository, ALLOWED_VIEWS};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

// ==========================================
// AnalyticsApi - 分析视图 API
// ==========================================
pub struct AnalyticsApi {
    analytics_repo: Arc<AnalyticsViewRepository>,
}

impl AnalyticsApi {
    /// 创建新的 AnalyticsApi 实例
    pub fn new(analytics_repo: Arc<AnalyticsViewRepository>) -> Self {
        Self { analytics_repo }
    }

    /// 读取白名单视图的所有行
    ///
    /// # 参数
    /// - view_name: 视图名 (cost_to_serve / service_level_by_customer / stockout_risk)
    ///
    /// # 返回
    /// - Ok(Vec<Value>): 视图行, 每行一个 JSON 对象
    /// - Err(InvalidInput): 视图名不在白名单内
    pub fn get_view(&self, view_name: &str) -> ApiResult<Vec<Value>> {
        if !AnalyticsViewRepository::is_allowed(view_name) {
            return Err(ApiError::InvalidInput(format!(
                "无效的分析视图名: {} (允许: {})",
                view_name,
                ALLOWED_VIEWS.join(", ")
            )));
        }

        let rows = self.analytics_repo.fetch_view_rows(view_name)?;
        debug!(view_name, rows_count = rows.len(), "分析视图查询完成");
        Ok(rows)
    }
}
