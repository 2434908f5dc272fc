//! 逻辑计划
//!
//! 以节点池保存的有向无环图：每个节点记录输入（生产者）和输出（消费者）。
//! 同一个节点可以被多个消费者共享，因此计划不是一棵树。

use std::collections::HashSet;

use crate::core::error::{PlanError, PlanResult};
use crate::core::Expression;

use super::nodes::{
    AggregateNode, AliasNode, JoinMode, JoinNode, NodeId, PlanNodeEnum, PlanNodeType,
    PredicateNode, ProjectionNode, SetOperationMode, SortNode, StoredTableNode,
};

/// 向上遍历时对当前节点输出的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpwardVisitation {
    VisitOutputs,
    DoNotVisitOutputs,
}

/// 计划中的一个节点及其连接关系
#[derive(Debug, Clone)]
pub struct PlanNode {
    pub kind: PlanNodeEnum,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
}

impl PlanNode {
    pub fn node_type(&self) -> PlanNodeType {
        self.kind.node_type()
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }
}

/// 逻辑计划
#[derive(Debug, Clone, Default)]
pub struct LogicalPlan {
    nodes: Vec<PlanNode>,
    root: Option<NodeId>,
}

impl LogicalPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 添加节点并把它登记为每个输入的消费者
    pub fn add_node(&mut self, kind: PlanNodeEnum, inputs: &[NodeId]) -> PlanResult<NodeId> {
        for input in inputs {
            self.node(*input)?;
        }

        let id = NodeId(self.nodes.len());
        for input in inputs {
            self.nodes[input.index()].outputs.push(id);
        }
        self.nodes.push(PlanNode {
            kind,
            inputs: inputs.to_vec(),
            outputs: Vec::new(),
        });
        Ok(id)
    }

    pub fn add_stored_table(&mut self, table_name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(PlanNode {
            kind: PlanNodeEnum::StoredTable(StoredTableNode::new(table_name)),
            inputs: Vec::new(),
            outputs: Vec::new(),
        });
        id
    }

    pub fn add_predicate(&mut self, input: NodeId, predicate: Expression) -> PlanResult<NodeId> {
        self.add_node(PlanNodeEnum::Predicate(PredicateNode::new(predicate)), &[input])
    }

    pub fn add_validate(&mut self, input: NodeId) -> PlanResult<NodeId> {
        self.add_node(PlanNodeEnum::Validate, &[input])
    }

    pub fn add_join(
        &mut self,
        left: NodeId,
        right: NodeId,
        mode: JoinMode,
        join_predicate: Option<Expression>,
    ) -> PlanResult<NodeId> {
        self.add_node(
            PlanNodeEnum::Join(JoinNode {
                mode,
                join_predicate,
            }),
            &[left, right],
        )
    }

    pub fn add_alias(
        &mut self,
        input: NodeId,
        expressions: Vec<Expression>,
        aliases: Vec<String>,
    ) -> PlanResult<NodeId> {
        self.add_node(
            PlanNodeEnum::Alias(AliasNode {
                expressions,
                aliases,
            }),
            &[input],
        )
    }

    pub fn add_projection(&mut self, input: NodeId, expressions: Vec<Expression>) -> PlanResult<NodeId> {
        self.add_node(PlanNodeEnum::Projection(ProjectionNode { expressions }), &[input])
    }

    pub fn add_sort(
        &mut self,
        input: NodeId,
        expressions: Vec<Expression>,
        ascending: Vec<bool>,
    ) -> PlanResult<NodeId> {
        self.add_node(
            PlanNodeEnum::Sort(SortNode {
                expressions,
                ascending,
            }),
            &[input],
        )
    }

    pub fn add_aggregate(&mut self, input: NodeId, group_by: Vec<Expression>) -> PlanResult<NodeId> {
        self.add_node(PlanNodeEnum::Aggregate(AggregateNode { group_by }), &[input])
    }

    pub fn add_limit(&mut self, input: NodeId, count: usize) -> PlanResult<NodeId> {
        self.add_node(PlanNodeEnum::Limit(count), &[input])
    }

    pub fn add_union(&mut self, left: NodeId, right: NodeId, mode: SetOperationMode) -> PlanResult<NodeId> {
        self.add_node(PlanNodeEnum::Union(mode), &[left, right])
    }

    pub fn add_intersect(
        &mut self,
        left: NodeId,
        right: NodeId,
        mode: SetOperationMode,
    ) -> PlanResult<NodeId> {
        self.add_node(PlanNodeEnum::Intersect(mode), &[left, right])
    }

    pub fn set_root(&mut self, root: NodeId) -> PlanResult<()> {
        self.node(root)?;
        self.root = Some(root);
        Ok(())
    }

    pub fn root(&self) -> PlanResult<NodeId> {
        self.root.ok_or(PlanError::MissingRoot)
    }

    pub fn node(&self, id: NodeId) -> PlanResult<&PlanNode> {
        self.nodes.get(id.index()).ok_or(PlanError::NodeNotFound(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> PlanResult<&mut PlanNode> {
        self.nodes.get_mut(id.index()).ok_or(PlanError::NodeNotFound(id))
    }

    pub fn node_type(&self, id: NodeId) -> PlanResult<PlanNodeType> {
        self.node(id).map(PlanNode::node_type)
    }

    pub fn outputs(&self, id: NodeId) -> PlanResult<&[NodeId]> {
        self.node(id).map(PlanNode::outputs)
    }

    pub fn inputs(&self, id: NodeId) -> PlanResult<&[NodeId]> {
        self.node(id).map(PlanNode::inputs)
    }

    pub fn predicate_node(&self, id: NodeId) -> PlanResult<&PredicateNode> {
        self.node(id)?
            .kind
            .as_predicate()
            .ok_or(PlanError::NodeTypeMismatch {
                node: id,
                expected: "Predicate",
            })
    }

    pub fn stored_table_node(&self, id: NodeId) -> PlanResult<&StoredTableNode> {
        self.node(id)?
            .kind
            .as_stored_table()
            .ok_or(PlanError::NodeTypeMismatch {
                node: id,
                expected: "StoredTable",
            })
    }

    pub fn stored_table_node_mut(&mut self, id: NodeId) -> PlanResult<&mut StoredTableNode> {
        self.node_mut(id)?
            .kind
            .as_stored_table_mut()
            .ok_or(PlanError::NodeTypeMismatch {
                node: id,
                expected: "StoredTable",
            })
    }

    /// 从 `start` 开始沿输出方向遍历，每个节点最多访问一次
    ///
    /// 访问者返回 `DoNotVisitOutputs` 时不再沿该节点的输出继续
    pub fn visit_upwards<F>(&self, start: NodeId, mut visitor: F) -> PlanResult<()>
    where
        F: FnMut(NodeId, &PlanNode) -> UpwardVisitation,
    {
        let mut visited = HashSet::new();
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let node = self.node(id)?;
            if visitor(id, node) == UpwardVisitation::VisitOutputs {
                stack.extend(node.outputs.iter().rev().copied());
            }
        }
        Ok(())
    }

    /// 从根节点向下收集所有存储表扫描节点，按发现顺序去重
    pub fn find_stored_table_nodes(&self) -> PlanResult<Vec<NodeId>> {
        let mut visited = HashSet::new();
        let mut stack = vec![self.root()?];
        let mut stored_tables = Vec::new();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let node = self.node(id)?;
            if node.node_type() == PlanNodeType::StoredTable {
                stored_tables.push(id);
            }
            stack.extend(node.inputs.iter().rev().copied());
        }
        Ok(stored_tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PredicateCondition;

    fn filtered_union_plan() -> (LogicalPlan, NodeId, NodeId, NodeId) {
        let mut plan = LogicalPlan::new();
        let scan = plan.add_stored_table("t");
        let validate = plan.add_validate(scan).expect("validate");
        let left = plan
            .add_predicate(
                validate,
                Expression::comparison(
                    PredicateCondition::GreaterThan,
                    Expression::column(scan, 0),
                    Expression::literal(95),
                ),
            )
            .expect("predicate");
        let right = plan
            .add_predicate(
                validate,
                Expression::comparison(
                    PredicateCondition::LessThan,
                    Expression::column(scan, 0),
                    Expression::literal(5),
                ),
            )
            .expect("predicate");
        let union = plan
            .add_union(left, right, SetOperationMode::All)
            .expect("union");
        plan.set_root(union).expect("root");
        (plan, scan, validate, union)
    }

    #[test]
    fn test_add_node_links_outputs() {
        let (plan, scan, validate, _) = filtered_union_plan();
        assert_eq!(plan.outputs(scan).expect("scan"), &[validate]);
        assert_eq!(plan.outputs(validate).expect("validate").len(), 2);
        assert_eq!(plan.inputs(validate).expect("validate"), &[scan]);
    }

    #[test]
    fn test_add_node_rejects_unknown_input() {
        let mut plan = LogicalPlan::new();
        let result = plan.add_validate(NodeId(3));
        assert!(matches!(result, Err(PlanError::NodeNotFound(NodeId(3)))));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_visit_upwards_visits_shared_node_once() {
        let (plan, scan, _, union) = filtered_union_plan();
        let mut visited = Vec::new();
        plan.visit_upwards(scan, |id, _| {
            visited.push(id);
            UpwardVisitation::VisitOutputs
        })
        .expect("visit should succeed");

        assert_eq!(visited.len(), plan.len());
        assert_eq!(visited.iter().filter(|id| **id == union).count(), 1);
    }

    #[test]
    fn test_visit_upwards_stops() {
        let (plan, scan, validate, _) = filtered_union_plan();
        let mut visited = Vec::new();
        plan.visit_upwards(scan, |id, node| {
            visited.push(id);
            if node.node_type() == PlanNodeType::Validate {
                UpwardVisitation::DoNotVisitOutputs
            } else {
                UpwardVisitation::VisitOutputs
            }
        })
        .expect("visit should succeed");
        assert_eq!(visited, vec![scan, validate]);
    }

    #[test]
    fn test_find_stored_table_nodes() {
        let mut plan = LogicalPlan::new();
        let a = plan.add_stored_table("a");
        let b = plan.add_stored_table("b");
        let join = plan
            .add_join(a, b, JoinMode::Inner, None)
            .expect("join");
        assert!(matches!(plan.find_stored_table_nodes(), Err(PlanError::MissingRoot)));

        plan.set_root(join).expect("root");
        assert_eq!(plan.find_stored_table_nodes().expect("find"), vec![a, b]);
    }

    #[test]
    fn test_typed_accessors() {
        let (mut plan, scan, validate, _) = filtered_union_plan();
        assert!(plan.stored_table_node(scan).is_ok());
        assert!(matches!(
            plan.stored_table_node(validate),
            Err(PlanError::NodeTypeMismatch { .. })
        ));
        plan.stored_table_node_mut(scan)
            .expect("scan")
            .set_pruned_chunk_ids(vec![crate::core::types::ChunkId(1)])
            .expect("first write should succeed");
        assert_eq!(plan.stored_table_node(scan).expect("scan").pruned_chunk_ids().len(), 1);
    }

    #[test]
    fn test_predicate_matches_table() {
        let mut plan = LogicalPlan::new();
        let a = plan.add_stored_table("a");
        let b = plan.add_stored_table("b");
        let join = plan
            .add_join(a, b, JoinMode::Cross, None)
            .expect("join");
        let on_a = PredicateNode::new(Expression::comparison(
            PredicateCondition::Equals,
            Expression::column(a, 0),
            Expression::literal(1),
        ));
        let on_both = PredicateNode::new(Expression::comparison(
            PredicateCondition::Equals,
            Expression::column(a, 0),
            Expression::column(b, 0),
        ));

        assert!(on_a.matches_table(&plan, a));
        assert!(!on_a.matches_table(&plan, b));
        assert!(!on_both.matches_table(&plan, a));
        assert!(!on_a.matches_table(&plan, join), "非扫描节点不匹配");
    }
}
