//! 查询优化器模块
//!
//! ## 模块结构
//!
//! - `rule` - 优化规则 trait 与优化上下文
//! - `optimizer` - 按顺序执行规则的优化器
//! - `rules` - 具体的优化规则
//!
//! ## 使用示例
//!
//! ```rust
//! use chunkprune::config::OptimizerConfig;
//! use chunkprune::query::optimizer::{OptContext, Optimizer};
//! use chunkprune::query::planner::LogicalPlan;
//! use chunkprune::storage::StorageManager;
//! use std::sync::Arc;
//!
//! let ctx = OptContext::new(Arc::new(StorageManager::new()));
//! let optimizer = Optimizer::from_config(&OptimizerConfig::default());
//!
//! let mut plan = LogicalPlan::new();
//! let scan = plan.add_stored_table("t");
//! plan.set_root(scan).unwrap();
//! // 表 t 未登记，裁剪规则报告存储错误
//! assert!(optimizer.optimize(&mut plan, &ctx).is_err());
//! ```

pub mod optimizer;
pub mod rule;
pub mod rules;

pub use optimizer::Optimizer;
pub use rule::{OptContext, OptimizerRule};
pub use rules::{ChunkPruningPass, ChunkPruningRule, PruningReport};
