//! 查询模块
//!
//! - `planner` - 逻辑计划与谓词规约
//! - `optimizer` - 优化规则与规则驱动

pub mod optimizer;
pub mod planner;

pub use crate::core::{OptimizeError, OptimizeResult};
pub use optimizer::{ChunkPruningRule, OptContext, Optimizer, OptimizerRule};
pub use planner::{LogicalPlan, NodeId};
