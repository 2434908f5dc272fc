//! 计划模块
//!
//! 逻辑计划的图结构，以及把谓词表达式规约为扫描谓词的工具

pub mod plan;
pub mod scan_predicate;

pub use plan::{LogicalPlan, NodeId, PlanNodeEnum, PlanNodeType, UpwardVisitation};
pub use scan_predicate::{PredicateParameter, ScanPredicate};
