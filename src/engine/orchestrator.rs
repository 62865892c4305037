// ==========================================
// 供应链网络优化系统 - 运行编排器
// ==========================================
// 依据: Network_Optimizer_Design_v0.2.md - 4.6 运行生命周期
// 用途: 协调 加载 → 建模 → 目标 → 求解 → 物化落库 五个阶段
// 状态机: created → RUNNING → {COMPLETED, FAILED}
// 红线: 编排器返回后不允许残留 RUNNING; 阶段错误一律止于本层
// ==========================================

use crate::domain::types::{RunStatus, SolveStatus};
use crate::engine::error::{OptimizeError, OptimizeResult};
use crate::engine::loader::DataLoader;
use crate::engine::materializer::ResultMaterializer;
use crate::engine::model::ModelBuilder;
use crate::engine::objective::ObjectiveComposer;
use crate::engine::solver::SolveOrchestrator;
use crate::repository::reference_repo::ReferenceDataRepository;
use crate::repository::result_repo::OptimalResultRepository;
use crate::repository::run_repo::OptimizationRunRepository;
use rusqlite::Connection;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

// ==========================================
// RunReport - 运行报告
// ==========================================
// 触发方是"发射后不管", 运行结果只通过 optimization_runs 状态对外;
// 本报告供进程内调用方与日志使用
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: String,
    pub status: RunStatus,
    pub total_cost: Option<f64>,
    pub shipment_rows: usize,
    pub production_rows: usize,
    pub failure_reason: Option<String>,
}

/// 管线成功时的内部汇总
struct PipelineSuccess {
    total_cost: f64,
    shipment_rows: usize,
    production_rows: usize,
}

// ==========================================
// OptimizationRunner - 运行编排器
// ==========================================
pub struct OptimizationRunner {
    loader: DataLoader,
    run_repo: OptimizationRunRepository,
    result_repo: OptimalResultRepository,
}

impl OptimizationRunner {
    /// 从共享连接装配编排器
    ///
    /// # 参数
    /// - conn: 共享数据库连接 (显式注入, 不依赖进程级全局状态)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            loader: DataLoader::new(Arc::new(ReferenceDataRepository::from_connection(
                conn.clone(),
            ))),
            run_repo: OptimizationRunRepository::from_connection(conn.clone()),
            result_repo: OptimalResultRepository::from_connection(conn),
        }
    }

    /// 执行一次完整的优化运行
    ///
    /// # 参数
    /// - run_id: 运行ID (调用方提供, 期望全局唯一)
    ///
    /// # 返回
    /// 运行报告。任何阶段错误 (含 panic) 都在本层被吸收并转为
    /// FAILED 状态更新, 不向调用方抛出
    pub fn execute(&self, run_id: &str) -> RunReport {
        info!(run_id, "优化运行开始");

        // ==========================================
        // 入口: 插入运行记录, 状态 RUNNING
        // ==========================================
        // run_id 重复时不触碰已有记录, 本次调用直接以失败收场
        if let Err(e) = self.run_repo.insert_running(run_id) {
            error!(run_id, error = %e, "运行记录插入失败, 本次运行终止");
            return RunReport {
                run_id: run_id.to_string(),
                status: RunStatus::Failed,
                total_cost: None,
                shipment_rows: 0,
                production_rows: 0,
                failure_reason: Some(format!("运行记录插入失败: {}", e)),
            };
        }

        // ==========================================
        // 失败边界: 捕获管线内所有错误与 panic
        // ==========================================
        let outcome = catch_unwind(AssertUnwindSafe(|| self.run_pipeline(run_id)));

        match outcome {
            Ok(Ok(success)) => {
                info!(
                    run_id,
                    total_cost = success.total_cost,
                    shipment_rows = success.shipment_rows,
                    production_rows = success.production_rows,
                    "优化运行完成"
                );
                RunReport {
                    run_id: run_id.to_string(),
                    status: RunStatus::Completed,
                    total_cost: Some(success.total_cost),
                    shipment_rows: success.shipment_rows,
                    production_rows: success.production_rows,
                    failure_reason: None,
                }
            }
            Ok(Err(e)) => self.fail_run(run_id, e.to_string()),
            Err(payload) => self.fail_run(run_id, format!("管线 panic: {}", panic_message(payload))),
        }
    }

    /// 管线主体: 加载 → 建模 → 目标 → 求解 → 物化落库
    fn run_pipeline(&self, run_id: &str) -> OptimizeResult<PipelineSuccess> {
        // ==========================================
        // 步骤1: 数据加载
        // ==========================================
        debug!("步骤1: 加载参考数据");
        let data = self.loader.load()?;

        // ==========================================
        // 步骤2: 模型构建
        // ==========================================
        debug!("步骤2: 构建变量与约束");
        let model = ModelBuilder::build(&data);
        info!(
            production_vars_count = model.production_vars.len(),
            shipment_vars_count = model.shipment_vars.len(),
            constraints_count = model.constraints.len(),
            "模型构建完成"
        );

        // ==========================================
        // 步骤3: 目标函数组装
        // ==========================================
        debug!("步骤3: 组装目标函数");
        let objective = ObjectiveComposer::compose(&model, &data)?;

        // ==========================================
        // 步骤4: 求解
        // ==========================================
        debug!("步骤4: 调用求解器");
        let outcome = SolveOrchestrator::solve(model, objective);

        if outcome.status != SolveStatus::Optimal {
            return Err(OptimizeError::NotOptimal {
                status: outcome.status,
            });
        }
        let total_cost = outcome.objective_value.ok_or_else(|| {
            OptimizeError::Configuration("最优状态缺少目标函数值".to_string())
        })?;

        // ==========================================
        // 步骤5: 结果物化 + 单事务落库
        // ==========================================
        debug!("步骤5: 物化并落库结果");
        let shipments = ResultMaterializer::extract_shipments(run_id, &outcome.shipment_values);
        let production = ResultMaterializer::extract_production(run_id, &outcome.production_values);

        let (shipment_rows, production_rows) = self
            .result_repo
            .persist_completed(run_id, &shipments, &production, total_cost)
            .map_err(|e| OptimizeError::Persistence(e.to_string()))?;

        Ok(PipelineSuccess {
            total_cost,
            shipment_rows,
            production_rows,
        })
    }

    /// 失败收场: 尽力把运行标记为 FAILED
    ///
    /// # 说明
    /// - 最优解求出后落库失败也走本路径 (已求出的解被丢弃, 已知局限)
    /// - FAILED 标记本身也写失败时, 运行会残留非终态 (已知局限, 只告警不掩盖)
    fn fail_run(&self, run_id: &str, reason: String) -> RunReport {
        warn!(run_id, reason = %reason, "运行失败, 标记 FAILED");

        match self.run_repo.mark_failed(run_id) {
            Ok(true) => {}
            Ok(false) => error!(run_id, "FAILED 标记未命中任何运行记录"),
            Err(e) => {
                error!(run_id, error = %e, "FAILED 标记写入失败, 运行记录可能残留 RUNNING");
            }
        }

        RunReport {
            run_id: run_id.to_string(),
            status: RunStatus::Failed,
            total_cost: None,
            shipment_rows: 0,
            production_rows: 0,
            failure_reason: Some(reason),
        }
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 提取 panic 负载中的可读消息
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "未知 panic".to_string()
    }
}
