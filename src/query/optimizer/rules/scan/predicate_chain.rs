//! 谓词链查找
//!
//! 从存储表扫描节点向上遍历，收集连续作用于该扫描的过滤节点。
//! 遇到多个消费者时按每个消费者分别继续，各自得到独立的谓词链。

use log::trace;

use crate::core::error::{PlanError, PlanResult};
use crate::query::planner::plan::{
    LogicalPlan, NodeId, PlanNodeEnum, PlanNodeType, UpwardVisitation,
};

/// 谓词链：按自下而上顺序排列的过滤节点
pub type PredicateChain = Vec<NodeId>;

/// 谓词链可以穿过的节点类型
fn is_chain_compatible(node_type: PlanNodeType) -> bool {
    matches!(
        node_type,
        PlanNodeType::Predicate
            | PlanNodeType::Validate
            | PlanNodeType::StoredTable
            | PlanNodeType::Join
            | PlanNodeType::Alias
            | PlanNodeType::Projection
            | PlanNodeType::Sort
    )
}

/// 查找作用于扫描节点 `scan` 的所有谓词链
pub fn find_predicate_chains(plan: &LogicalPlan, scan: NodeId) -> PlanResult<Vec<PredicateChain>> {
    find_predicate_chains_recursively(plan, scan, scan, PredicateChain::new())
}

fn find_predicate_chains_recursively(
    plan: &LogicalPlan,
    scan: NodeId,
    start: NodeId,
    mut current_chain: PredicateChain,
) -> PlanResult<Vec<PredicateChain>> {
    let mut chains = Vec::new();
    let mut branch_error: Option<PlanError> = None;

    plan.visit_upwards(start, |id, node| {
        if !is_chain_compatible(node.node_type()) {
            chains.push(current_chain.clone());
            return UpwardVisitation::DoNotVisitOutputs;
        }

        if let PlanNodeEnum::Predicate(predicate) = &node.kind {
            if predicate.matches_table(plan, scan) {
                current_chain.push(id);
            } else {
                trace!("谓词 {} 不作用于扫描 {}，跳过", id, scan);
            }
        }

        match node.outputs() {
            // 计划顶端
            [] => {
                chains.push(current_chain.clone());
                UpwardVisitation::DoNotVisitOutputs
            }
            [_] => UpwardVisitation::VisitOutputs,
            outputs => {
                for output in outputs {
                    match find_predicate_chains_recursively(plan, scan, *output, current_chain.clone()) {
                        Ok(continued) => chains.extend(continued),
                        Err(e) => branch_error = Some(e),
                    }
                }
                UpwardVisitation::DoNotVisitOutputs
            }
        }
    })?;

    match branch_error {
        Some(e) => Err(e),
        None => Ok(chains),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PredicateCondition;
    use crate::core::Expression;
    use crate::query::planner::plan::{JoinMode, SetOperationMode};

    fn greater_than(scan: NodeId, value: i32) -> Expression {
        Expression::comparison(
            PredicateCondition::GreaterThan,
            Expression::column(scan, 0),
            Expression::literal(value),
        )
    }

    #[test]
    fn test_straight_chain_ends_at_other_node() {
        let mut plan = LogicalPlan::new();
        let scan = plan.add_stored_table("t");
        let validate = plan.add_validate(scan).expect("validate");
        let p1 = plan.add_predicate(validate, greater_than(scan, 1)).expect("p1");
        let projection = plan.add_projection(p1, vec![]).expect("projection");
        let p2 = plan.add_predicate(projection, greater_than(scan, 2)).expect("p2");
        let aggregate = plan.add_aggregate(p2, vec![]).expect("aggregate");
        let p3 = plan.add_predicate(aggregate, greater_than(scan, 3)).expect("p3");
        plan.set_root(p3).expect("root");

        let chains = find_predicate_chains(&plan, scan).expect("find");
        assert_eq!(chains, vec![vec![p1, p2]], "聚合节点之上的谓词不属于该链");
    }

    #[test]
    fn test_chain_at_plan_top() {
        let mut plan = LogicalPlan::new();
        let scan = plan.add_stored_table("t");
        let p1 = plan.add_predicate(scan, greater_than(scan, 1)).expect("p1");
        plan.set_root(p1).expect("root");

        assert_eq!(find_predicate_chains(&plan, scan).expect("find"), vec![vec![p1]]);
    }

    #[test]
    fn test_foreign_predicate_is_transparent() {
        let mut plan = LogicalPlan::new();
        let a = plan.add_stored_table("a");
        let b = plan.add_stored_table("b");
        let join = plan.add_join(a, b, JoinMode::Cross, None).expect("join");
        let on_b = plan.add_predicate(join, greater_than(b, 1)).expect("on_b");
        let on_a = plan.add_predicate(on_b, greater_than(a, 1)).expect("on_a");
        let limit = plan.add_limit(on_a, 10).expect("limit");
        plan.set_root(limit).expect("root");

        assert_eq!(find_predicate_chains(&plan, a).expect("find"), vec![vec![on_a]]);
        assert_eq!(find_predicate_chains(&plan, b).expect("find"), vec![vec![on_b]]);
    }

    #[test]
    fn test_fan_out_copies_chain() {
        let mut plan = LogicalPlan::new();
        let scan = plan.add_stored_table("t");
        let shared = plan.add_predicate(scan, greater_than(scan, 0)).expect("shared");
        let left = plan.add_predicate(shared, greater_than(scan, 95)).expect("left");
        let right = plan.add_predicate(shared, greater_than(scan, 50)).expect("right");
        let union = plan.add_union(left, right, SetOperationMode::Positions).expect("union");
        plan.set_root(union).expect("root");

        let chains = find_predicate_chains(&plan, scan).expect("find");
        assert_eq!(chains, vec![vec![shared, left], vec![shared, right]]);
    }

    #[test]
    fn test_no_predicates_yields_empty_chain() {
        let mut plan = LogicalPlan::new();
        let scan = plan.add_stored_table("t");
        let limit = plan.add_limit(scan, 1).expect("limit");
        plan.set_root(limit).expect("root");

        assert_eq!(find_predicate_chains(&plan, scan).expect("find"), vec![PredicateChain::new()]);
    }

    #[test]
    fn test_unknown_scan() {
        let plan = LogicalPlan::new();
        assert!(find_predicate_chains(&plan, NodeId(0)).is_err());
    }
}
