// ==========================================
// 供应链网络优化系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 传播策略: 所有阶段错误在运行编排器边界被捕获并转为 FAILED,
//           不向编排器之外再抛出
// ==========================================

use crate::domain::types::SolveStatus;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum OptimizeError {
    /// 参考表不可达或缺失/为空 (不在本层重试)
    #[error("参考数据不可用: {0}")]
    DataUnavailable(String),

    /// 求解器非最优终态 (如需求超过总产能) —
    /// 属预期业务结果, 不是程序错误
    #[error("求解器未达最优: status={status}")]
    NotOptimal { status: SolveStatus },

    /// 模型构建内部不变式被破坏 (如成本查找缺失),
    /// 指向参考数据质量问题
    #[error("模型配置错误: {0}")]
    Configuration(String),

    /// 结果或状态写入失败
    #[error("结果持久化失败: {0}")]
    Persistence(String),
}

/// Result 类型别名
pub type OptimizeResult<T> = Result<T, OptimizeError>;
