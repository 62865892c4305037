// ==========================================
// 供应链网络优化系统 - 队列工作单元
// ==========================================
// 职责: 消费持久化运行队列, 逐个执行优化运行
// 语义: 至少一次执行; 认领后进程消失的任务由滞留回收重投
// 约定: 每个任务一次完整管线调用, 任务间无共享可变状态
// ==========================================

use crate::engine::OptimizationRunner;
use crate::repository::RunQueueRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

// ==========================================
// QueueWorker - 队列工作单元
// ==========================================
pub struct QueueWorker {
    runner: Arc<OptimizationRunner>,
    queue_repo: Arc<RunQueueRepository>,
    worker_id: String,
    poll_interval: Duration,
    stale_claim_secs: i64,
}

impl QueueWorker {
    /// 创建新的队列工作单元
    ///
    /// # 参数
    /// - runner: 运行编排器
    /// - queue_repo: 运行队列仓储
    /// - poll_interval: 队列为空时的轮询间隔
    /// - stale_claim_secs: 滞留 CLAIMED 任务回收阈值（秒）
    pub fn new(
        runner: Arc<OptimizationRunner>,
        queue_repo: Arc<RunQueueRepository>,
        poll_interval: Duration,
        stale_claim_secs: i64,
    ) -> Self {
        Self {
            runner,
            queue_repo,
            worker_id: format!("worker-{}", Uuid::new_v4()),
            poll_interval,
            stale_claim_secs,
        }
    }

    /// 工作单元标识
    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// 处理一个任务 (若有)
    ///
    /// # 返回
    /// - Ok(true): 认领并执行了一个任务
    /// - Ok(false): 队列为空
    ///
    /// # 说明
    /// - 运行结果无论成败都把队列项标记 DONE;
    ///   运行自身的成败只通过 optimization_runs 状态对外
    pub fn process_one(&self) -> Result<bool, Box<dyn std::error::Error>> {
        let task = match self.queue_repo.claim_next(&self.worker_id)? {
            Some(task) => task,
            None => return Ok(false),
        };

        info!(
            worker_id = %self.worker_id,
            queue_id = task.queue_id,
            run_id = %task.run_id,
            attempts = task.attempts,
            "认领运行任务"
        );

        let report = self.runner.execute(&task.run_id);
        info!(
            queue_id = task.queue_id,
            run_id = %task.run_id,
            status = %report.status,
            "运行任务执行结束"
        );

        self.queue_repo.mark_done(task.queue_id)?;
        Ok(true)
    }

    /// 清空当前队列 (处理到空为止)
    ///
    /// # 返回
    /// - Ok(usize): 本轮处理的任务数
    pub fn drain(&self) -> Result<usize, Box<dyn std::error::Error>> {
        let mut processed = 0;
        while self.process_one()? {
            processed += 1;
        }
        Ok(processed)
    }

    /// 持续消费队列 (不返回)
    ///
    /// # 说明
    /// - 每轮先回收滞留任务, 再清空队列, 空闲时按轮询间隔休眠
    /// - 单个任务的错误只告警, 不终止工作单元
    pub fn run_forever(&self) -> ! {
        info!(worker_id = %self.worker_id, "队列工作单元启动");
        loop {
            match self.queue_repo.requeue_stale(self.stale_claim_secs) {
                Ok(0) => {}
                Ok(requeued) => warn!(requeued, "回收滞留任务"),
                Err(e) => error!(error = %e, "滞留任务回收失败"),
            }

            match self.drain() {
                Ok(0) => std::thread::sleep(self.poll_interval),
                Ok(processed) => info!(processed, "本轮队列处理完成"),
                Err(e) => {
                    error!(error = %e, "队列处理出错");
                    std::thread::sleep(self.poll_interval);
                }
            }
        }
    }
}
