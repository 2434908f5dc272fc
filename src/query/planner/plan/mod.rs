//! 逻辑计划模块
//!
//! - `nodes` - 计划节点载荷与类型标签
//! - `logical_plan` - 节点池形式的计划图与遍历原语

pub mod logical_plan;
pub mod nodes;

pub use logical_plan::{LogicalPlan, PlanNode, UpwardVisitation};
pub use nodes::{
    AggregateNode, AliasNode, JoinMode, JoinNode, NodeId, PlanNodeEnum, PlanNodeType,
    PredicateNode, ProjectionNode, SetOperationMode, SortNode, StoredTableNode,
};
