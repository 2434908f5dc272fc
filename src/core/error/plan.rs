//! 计划错误类型
//!
//! 涵盖逻辑计划构建与遍历过程中的错误

use thiserror::Error;

use crate::query::planner::plan::NodeId;

/// 计划结果类型
pub type PlanResult<T> = Result<T, PlanError>;

/// 计划错误类型
#[derive(Error, Debug, Clone)]
pub enum PlanError {
    #[error("计划节点不存在: {0}")]
    NodeNotFound(NodeId),
    #[error("计划节点 {node} 类型不匹配: 期望 {expected}")]
    NodeTypeMismatch { node: NodeId, expected: &'static str },
    #[error("计划没有根节点")]
    MissingRoot,
}
