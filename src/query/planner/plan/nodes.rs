//! 计划节点定义
//!
//! 逻辑计划中各类节点的载荷。节点之间的连接关系由 `LogicalPlan` 维护，
//! 节点本身只保存与其语义相关的数据。

use std::fmt;
use std::sync::Arc;

use crate::core::error::{OptimizeError, OptimizeResult};
use crate::core::types::ChunkId;
use crate::core::Expression;
use crate::storage::TableStatistics;

use super::logical_plan::LogicalPlan;

/// 计划节点ID
///
/// 节点在所属计划的节点池中的下标，节点的身份以此为准，而不是结构相等
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 节点类型标签
///
/// 裁剪规则只区分这几类节点，其余节点统一为 `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanNodeType {
    Predicate,
    Validate,
    StoredTable,
    Join,
    Alias,
    Projection,
    Sort,
    Other,
}

/// 集合操作模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperationMode {
    Unique,
    All,
    Positions,
}

/// 连接类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinMode {
    Inner,
    Left,
    Right,
    Cross,
    Semi,
    AntiNullAsFalse,
}

/// 过滤节点
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateNode {
    pub predicate: Expression,
}

impl PredicateNode {
    pub fn new(predicate: Expression) -> Self {
        Self { predicate }
    }

    /// 谓词中的每个列引用是否都来自给定的存储表扫描节点
    pub fn matches_table(&self, plan: &LogicalPlan, scan: NodeId) -> bool {
        if plan.stored_table_node(scan).is_err() {
            return false;
        }

        let mut matches = true;
        self.predicate.visit_column_refs(&mut |column_ref| {
            if column_ref.original_node != scan {
                matches = false;
            }
        });
        matches
    }
}

/// 存储表扫描节点
///
/// 优化器可以在节点上记录被裁剪的数据块，以及裁剪后修正的表统计信息
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTableNode {
    pub table_name: String,
    pruned_chunk_ids: Vec<ChunkId>,
    table_statistics: Option<Arc<TableStatistics>>,
}

impl StoredTableNode {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            pruned_chunk_ids: Vec::new(),
            table_statistics: None,
        }
    }

    pub fn pruned_chunk_ids(&self) -> &[ChunkId] {
        &self.pruned_chunk_ids
    }

    /// 写入被裁剪的数据块，只允许写入一次
    pub fn set_pruned_chunk_ids(&mut self, chunk_ids: Vec<ChunkId>) -> OptimizeResult<()> {
        if !self.pruned_chunk_ids.is_empty() {
            return Err(OptimizeError::PreconditionViolation(format!(
                "扫描表 {} 的节点已经记录了 {} 个被裁剪的数据块",
                self.table_name,
                self.pruned_chunk_ids.len()
            )));
        }
        debug_assert!(
            chunk_ids.windows(2).all(|pair| pair[0] < pair[1]),
            "被裁剪的数据块ID必须严格升序"
        );
        self.pruned_chunk_ids = chunk_ids;
        Ok(())
    }

    /// 修正后的表统计信息，未修正时为 `None`
    pub fn table_statistics(&self) -> Option<&Arc<TableStatistics>> {
        self.table_statistics.as_ref()
    }

    /// 以新的统计信息整体替换旧值
    pub fn set_table_statistics(&mut self, statistics: Arc<TableStatistics>) {
        self.table_statistics = Some(statistics);
    }
}

/// 连接节点
#[derive(Debug, Clone, PartialEq)]
pub struct JoinNode {
    pub mode: JoinMode,
    pub join_predicate: Option<Expression>,
}

/// 别名节点
#[derive(Debug, Clone, PartialEq)]
pub struct AliasNode {
    pub expressions: Vec<Expression>,
    pub aliases: Vec<String>,
}

/// 投影节点
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionNode {
    pub expressions: Vec<Expression>,
}

/// 排序节点
#[derive(Debug, Clone, PartialEq)]
pub struct SortNode {
    pub expressions: Vec<Expression>,
    pub ascending: Vec<bool>,
}

/// 聚合节点
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateNode {
    pub group_by: Vec<Expression>,
}

/// 计划节点枚举
#[derive(Debug, Clone, PartialEq)]
pub enum PlanNodeEnum {
    Predicate(PredicateNode),
    Validate,
    StoredTable(StoredTableNode),
    Join(JoinNode),
    Alias(AliasNode),
    Projection(ProjectionNode),
    Sort(SortNode),
    Aggregate(AggregateNode),
    Limit(usize),
    Union(SetOperationMode),
    Intersect(SetOperationMode),
}

impl PlanNodeEnum {
    pub fn node_type(&self) -> PlanNodeType {
        match self {
            PlanNodeEnum::Predicate(_) => PlanNodeType::Predicate,
            PlanNodeEnum::Validate => PlanNodeType::Validate,
            PlanNodeEnum::StoredTable(_) => PlanNodeType::StoredTable,
            PlanNodeEnum::Join(_) => PlanNodeType::Join,
            PlanNodeEnum::Alias(_) => PlanNodeType::Alias,
            PlanNodeEnum::Projection(_) => PlanNodeType::Projection,
            PlanNodeEnum::Sort(_) => PlanNodeType::Sort,
            PlanNodeEnum::Aggregate(_)
            | PlanNodeEnum::Limit(_)
            | PlanNodeEnum::Union(_)
            | PlanNodeEnum::Intersect(_) => PlanNodeType::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlanNodeEnum::Predicate(_) => "Predicate",
            PlanNodeEnum::Validate => "Validate",
            PlanNodeEnum::StoredTable(_) => "StoredTable",
            PlanNodeEnum::Join(_) => "Join",
            PlanNodeEnum::Alias(_) => "Alias",
            PlanNodeEnum::Projection(_) => "Projection",
            PlanNodeEnum::Sort(_) => "Sort",
            PlanNodeEnum::Aggregate(_) => "Aggregate",
            PlanNodeEnum::Limit(_) => "Limit",
            PlanNodeEnum::Union(_) => "Union",
            PlanNodeEnum::Intersect(_) => "Intersect",
        }
    }

    pub fn as_predicate(&self) -> Option<&PredicateNode> {
        match self {
            PlanNodeEnum::Predicate(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_stored_table(&self) -> Option<&StoredTableNode> {
        match self {
            PlanNodeEnum::StoredTable(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_stored_table_mut(&mut self) -> Option<&mut StoredTableNode> {
        match self {
            PlanNodeEnum::StoredTable(node) => Some(node),
            _ => None,
        }
    }
}
