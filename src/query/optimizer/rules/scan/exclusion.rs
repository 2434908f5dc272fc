//! 数据块排除计算
//!
//! 对谓词链中的每个谓词，根据数据块定型时采集的裁剪统计信息判断哪些数据块
//! 一定不包含满足谓词的行。结果按谓词节点缓存，缓存只在一次规则应用内有效。

use std::collections::{BTreeSet, HashMap};

use log::trace;

use crate::core::error::PlanResult;
use crate::core::types::{ChunkId, ColumnId, PredicateCondition};
use crate::core::value::{lossless_cast, Value};
use crate::query::planner::plan::{LogicalPlan, NodeId};
use crate::query::planner::scan_predicate::{PredicateParameter, ScanPredicate};
use crate::storage::Table;

/// 一个规约后的扫描谓词排除的数据块
///
/// 值已经无损转换为列的类型
#[derive(Debug, Clone, PartialEq)]
pub struct PruningPredicate {
    pub column_id: ColumnId,
    pub condition: PredicateCondition,
    pub value: Value,
    pub value2: Option<Value>,
    pub excluded_chunk_ids: BTreeSet<ChunkId>,
}

/// 一个谓词节点的排除结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateExclusion {
    /// 各扫描谓词排除集合的并集
    pub excluded_chunk_ids: BTreeSet<ChunkId>,
    pub pruning_predicates: Vec<PruningPredicate>,
}

/// 一次规则应用的状态
///
/// 持有以谓词节点为键的排除结果缓存，随规则应用一起创建和丢弃
#[derive(Debug, Default)]
pub struct ChunkPruningPass {
    excluded_chunk_ids_by_predicate_node: HashMap<NodeId, PredicateExclusion>,
    evaluations: usize,
    memo_hits: usize,
}

impl ChunkPruningPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// 实际扫描统计信息的谓词节点数
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn memo_hits(&self) -> usize {
        self.memo_hits
    }

    /// 已缓存的谓词节点排除结果
    pub fn exclusion(&self, predicate_node: NodeId) -> Option<&PredicateExclusion> {
        self.excluded_chunk_ids_by_predicate_node.get(&predicate_node)
    }

    /// 计算谓词链排除的数据块：链上任一谓词排除的数据块都可以排除
    pub fn compute_exclude_list(
        &mut self,
        plan: &LogicalPlan,
        table: &Table,
        scan: NodeId,
        predicate_chain: &[NodeId],
    ) -> PlanResult<BTreeSet<ChunkId>> {
        let mut excluded_chunk_ids = BTreeSet::new();
        for &predicate_node in predicate_chain {
            let exclusion = self.predicate_exclusion(plan, table, scan, predicate_node)?;
            excluded_chunk_ids.extend(exclusion.excluded_chunk_ids.iter().copied());
        }
        Ok(excluded_chunk_ids)
    }

    /// 单个谓词节点的排除结果，已缓存时直接复用
    pub fn predicate_exclusion(
        &mut self,
        plan: &LogicalPlan,
        table: &Table,
        scan: NodeId,
        predicate_node: NodeId,
    ) -> PlanResult<&PredicateExclusion> {
        if self.excluded_chunk_ids_by_predicate_node.contains_key(&predicate_node) {
            self.memo_hits += 1;
            trace!("谓词 {} 的排除结果命中缓存", predicate_node);
        } else {
            let exclusion = evaluate_predicate(plan, table, scan, predicate_node)?;
            self.evaluations += 1;
            self.excluded_chunk_ids_by_predicate_node
                .insert(predicate_node, exclusion);
        }

        Ok(&self.excluded_chunk_ids_by_predicate_node[&predicate_node])
    }
}

fn evaluate_predicate(
    plan: &LogicalPlan,
    table: &Table,
    scan: NodeId,
    predicate_node: NodeId,
) -> PlanResult<PredicateExclusion> {
    let predicate = plan.predicate_node(predicate_node)?;
    let mut exclusion = PredicateExclusion::default();

    let Some(scan_predicates) = ScanPredicate::from_expression(&predicate.predicate, scan) else {
        trace!("谓词 {} 无法规约为扫描谓词，不参与裁剪", predicate_node);
        return Ok(exclusion);
    };

    for scan_predicate in &scan_predicates {
        let Some(mut pruning_predicate) = prepare(table, scan_predicate) else {
            trace!("扫描谓词 {} 不能用于裁剪，跳过", scan_predicate);
            continue;
        };
        pruning_predicate.excluded_chunk_ids = excluded_chunks(table, &pruning_predicate);
        exclusion
            .excluded_chunk_ids
            .extend(pruning_predicate.excluded_chunk_ids.iter().copied());
        exclusion.pruning_predicates.push(pruning_predicate);
    }

    Ok(exclusion)
}

/// 把比较值无损转换为列的类型
///
/// 另一侧是列或占位符，或者转换有损时返回 `None`
fn prepare(table: &Table, scan_predicate: &ScanPredicate) -> Option<PruningPredicate> {
    let data_type = table.column_data_type(scan_predicate.column_id)?;
    let cast = |parameter: &PredicateParameter| {
        parameter
            .as_value()
            .and_then(|value| lossless_cast(value, data_type))
    };

    let value = cast(&scan_predicate.value)?;
    let value2 = match &scan_predicate.value2 {
        Some(parameter) => Some(cast(parameter)?),
        None => None,
    };

    Some(PruningPredicate {
        column_id: scan_predicate.column_id,
        condition: scan_predicate.condition,
        value,
        value2,
        excluded_chunk_ids: BTreeSet::new(),
    })
}

/// 裁剪统计信息能够排除的数据块，没有统计信息的数据块不会被排除
fn excluded_chunks(table: &Table, predicate: &PruningPredicate) -> BTreeSet<ChunkId> {
    table
        .chunks()
        .filter(|(_, chunk)| {
            chunk
                .pruning_statistics()
                .and_then(|statistics| statistics.get(predicate.column_id.index()))
                .is_some_and(|statistics| {
                    statistics.does_not_contain(
                        predicate.condition,
                        &predicate.value,
                        predicate.value2.as_ref(),
                    )
                })
        })
        .map(|(chunk_id, _)| chunk_id)
        .collect()
}
