//! 优化规则 trait 与优化上下文
//!
//! 规则直接在逻辑计划上原地修改。上下文提供规则需要的外部依赖，目前只有表管理器。

use std::sync::Arc;

use crate::core::error::OptimizeResult;
use crate::query::planner::plan::LogicalPlan;
use crate::storage::StorageManager;

/// 优化上下文
#[derive(Debug, Clone)]
pub struct OptContext {
    storage_manager: Arc<StorageManager>,
}

impl OptContext {
    pub fn new(storage_manager: Arc<StorageManager>) -> Self {
        Self { storage_manager }
    }

    pub fn storage_manager(&self) -> &Arc<StorageManager> {
        &self.storage_manager
    }
}

/// 优化规则 trait
///
/// # 返回
/// - `Ok(())`: 规则执行完毕，计划可能被修改
/// - `Err(e)`: 计划结构或调用顺序违反了规则的前置条件
pub trait OptimizerRule: std::fmt::Debug + Send + Sync {
    /// 规则名称
    fn name(&self) -> &'static str;

    /// 在整个计划上应用规则
    fn apply_to_plan(&self, plan: &mut LogicalPlan, ctx: &OptContext) -> OptimizeResult<()>;
}
