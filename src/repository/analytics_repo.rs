// ==========================================
// 供应链网络优化系统 - 分析视图仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 固定白名单分析视图的逐行读取, 不做二次聚合
// 约束: 视图名只允许白名单内取值, 杜绝拼接注入
// ==========================================

use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde_json::{Map, Number, Value};
use std::sync::{Arc, Mutex};

/// 分析视图白名单
///
/// 视图行原样返回, 本层不做额外聚合
pub const ALLOWED_VIEWS: &[&str] = &["cost_to_serve", "service_level_by_customer", "stockout_risk"];

// ==========================================
// AnalyticsViewRepository - 分析视图仓储
// ==========================================
pub struct AnalyticsViewRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AnalyticsViewRepository {
    /// 创建新的 AnalyticsViewRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 视图名是否在白名单内
    pub fn is_allowed(view_name: &str) -> bool {
        ALLOWED_VIEWS.contains(&view_name)
    }

    /// 读取白名单视图的所有行 (按列名组装为 JSON 对象)
    ///
    /// # 参数
    /// - view_name: 视图名 (必须在白名单内)
    ///
    /// # 返回
    /// - Ok(Vec<Value>): 视图行, 每行一个 JSON 对象
    /// - Err(ValidationError): 视图名不在白名单内
    pub fn fetch_view_rows(&self, view_name: &str) -> RepositoryResult<Vec<Value>> {
        if !Self::is_allowed(view_name) {
            return Err(RepositoryError::ValidationError(format!(
                "视图名不在白名单内: {}",
                view_name
            )));
        }

        let conn = self.get_conn()?;
        // 视图名来自白名单常量, 非用户拼接
        let mut stmt = conn.prepare(&format!("SELECT * FROM {}", view_name))?;
        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows = stmt.query([])?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut object = Map::new();
            for (idx, name) in column_names.iter().enumerate() {
                object.insert(name.clone(), value_ref_to_json(row.get_ref(idx)?));
            }
            result.push(Value::Object(object));
        }

        Ok(result)
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// SQLite 值到 JSON 值的映射
fn value_ref_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Number(i.into()),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(_) => Value::Null,
    }
}
