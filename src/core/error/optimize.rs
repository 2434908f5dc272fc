//! 优化器错误类型
//!
//! 定义查询优化器相关的错误类型，包括：
//! - 规则前置条件违反（例如对同一扫描节点重复写入裁剪结果）
//! - 计划与存储层错误的传递

use thiserror::Error;

use super::{PlanError, StorageError};

/// 优化器错误类型
#[derive(Error, Debug, Clone)]
pub enum OptimizeError {
    /// 规则前置条件违反，说明调用方的规则顺序或重入存在问题
    #[error("前置条件违反: {0}")]
    PreconditionViolation(String),

    /// 计划结构错误
    #[error("计划错误: {0}")]
    Plan(#[from] PlanError),

    /// 存储层错误（例如扫描的表不存在）
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
}

/// 优化器结果类型
pub type OptimizeResult<T> = Result<T, OptimizeError>;
