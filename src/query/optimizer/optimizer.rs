//! 优化器
//!
//! 按注册顺序在计划上依次执行每条规则一次

use log::{debug, info};

use crate::config::OptimizerConfig;
use crate::core::error::OptimizeResult;
use crate::query::planner::plan::LogicalPlan;

use super::rule::{OptContext, OptimizerRule};
use super::rules::ChunkPruningRule;

/// 优化器
#[derive(Debug, Default)]
pub struct Optimizer {
    rules: Vec<Box<dyn OptimizerRule>>,
}

impl Optimizer {
    /// 创建不含任何规则的优化器
    pub fn new() -> Self {
        Self::default()
    }

    /// 根据配置注册规则
    pub fn from_config(config: &OptimizerConfig) -> Self {
        let mut optimizer = Self::new();
        if config.enable_chunk_pruning {
            optimizer.add_rule(Box::new(ChunkPruningRule));
        }
        optimizer
    }

    pub fn add_rule(&mut self, rule: Box<dyn OptimizerRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// 优化计划
    pub fn optimize(&self, plan: &mut LogicalPlan, ctx: &OptContext) -> OptimizeResult<()> {
        for rule in &self.rules {
            debug!("应用优化规则 {}", rule.name());
            rule.apply_to_plan(plan, ctx)?;
        }
        info!("优化完成: 共应用 {} 条规则", self.rules.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageManager;
    use std::sync::Arc;

    #[test]
    fn test_from_config() {
        let enabled = Optimizer::from_config(&OptimizerConfig::default());
        assert_eq!(enabled.rule_names(), vec!["ChunkPruningRule"]);

        let disabled = Optimizer::from_config(&OptimizerConfig {
            enable_chunk_pruning: false,
        });
        assert!(disabled.rule_names().is_empty());
    }

    #[test]
    fn test_optimize_empty_plan_without_root_fails() {
        let optimizer = Optimizer::from_config(&OptimizerConfig::default());
        let ctx = OptContext::new(Arc::new(StorageManager::new()));
        let mut plan = LogicalPlan::new();
        assert!(optimizer.optimize(&mut plan, &ctx).is_err());

        let empty = Optimizer::new();
        assert!(empty.optimize(&mut plan, &ctx).is_ok());
    }
}
