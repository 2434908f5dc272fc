//! 数据块裁剪规则
//!
//! 对计划中的每个存储表扫描节点：
//! 1. 查找作用于它的所有谓词链
//! 2. 根据数据块的裁剪统计信息计算每条链可以排除的数据块
//! 3. 取所有链排除集合的交集写入扫描节点，并修正节点上的表统计信息
//!
//! 不同的谓词链对应扫描结果的不同消费者，只有所有消费者都不需要的数据块才能裁剪。

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, trace};

use crate::core::error::OptimizeResult;
use crate::core::types::ChunkId;
use crate::query::optimizer::rule::{OptContext, OptimizerRule};
use crate::query::planner::plan::{LogicalPlan, NodeId};
use crate::storage::{Chunk, Table, TableStatistics};

use super::exclusion::ChunkPruningPass;
use super::predicate_chain::{find_predicate_chains, PredicateChain};

/// 一次规则应用的结果摘要
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PruningReport {
    /// 每个被裁剪的扫描节点及其裁剪的数据块数
    pub pruned_chunk_counts: Vec<(NodeId, usize)>,
    /// 实际扫描统计信息的谓词节点数
    pub predicate_evaluations: usize,
    /// 命中排除结果缓存的次数
    pub memo_hits: usize,
}

/// 数据块裁剪规则
#[derive(Debug, Default, Clone, Copy)]
pub struct ChunkPruningRule;

impl OptimizerRule for ChunkPruningRule {
    fn name(&self) -> &'static str {
        "ChunkPruningRule"
    }

    fn apply_to_plan(&self, plan: &mut LogicalPlan, ctx: &OptContext) -> OptimizeResult<()> {
        let report = self.prune(plan, ctx)?;
        debug!(
            "ChunkPruningRule: {} 个扫描节点被裁剪, {} 次谓词求值, {} 次缓存命中",
            report.pruned_chunk_counts.len(),
            report.predicate_evaluations,
            report.memo_hits
        );
        Ok(())
    }
}

impl ChunkPruningRule {
    /// 在计划上执行一次裁剪
    ///
    /// 每次调用使用新的排除结果缓存
    pub fn prune(&self, plan: &mut LogicalPlan, ctx: &OptContext) -> OptimizeResult<PruningReport> {
        let mut pass = ChunkPruningPass::new();
        let mut report = PruningReport::default();

        let stored_table_nodes = plan.find_stored_table_nodes()?;
        let chains_by_scan = stored_table_nodes
            .into_iter()
            .map(|scan| find_predicate_chains(plan, scan).map(|chains| (scan, chains)))
            .collect::<Result<Vec<_>, _>>()?;

        for (scan, predicate_chains) in chains_by_scan {
            let table_name = plan.stored_table_node(scan)?.table_name.clone();
            debug!("扫描 {} (表 {}): 找到 {} 条谓词链", scan, table_name, predicate_chains.len());
            if predicate_chains.is_empty() {
                continue;
            }

            let table = ctx.storage_manager().get_table(&table_name)?;
            let exclusion_sets = predicate_chains
                .iter()
                .map(|chain| pass.compute_exclude_list(plan, &table, scan, chain))
                .collect::<Result<Vec<_>, _>>()?;

            let pruned_chunk_ids = intersect_chunk_ids(&exclusion_sets);
            debug!("扫描 {}: 裁剪 {} 个数据块", scan, pruned_chunk_ids.len());
            if pruned_chunk_ids.is_empty() {
                continue;
            }

            let statistics = corrected_statistics(&pass, plan, &table, scan, &predicate_chains, &pruned_chunk_ids)?;

            let stored_table_node = plan.stored_table_node_mut(scan)?;
            debug_assert!(
                stored_table_node.pruned_chunk_ids().is_empty(),
                "扫描节点 {} 已经记录了被裁剪的数据块",
                scan
            );
            stored_table_node.set_pruned_chunk_ids(pruned_chunk_ids.iter().copied().collect())?;
            if let Some(statistics) = statistics {
                stored_table_node.set_table_statistics(statistics);
            }
            report.pruned_chunk_counts.push((scan, pruned_chunk_ids.len()));
        }

        report.predicate_evaluations = pass.evaluations();
        report.memo_hits = pass.memo_hits();
        Ok(report)
    }
}

/// 所有谓词链排除集合的交集
///
/// 没有谓词链或任一集合为空时结果为空
pub fn intersect_chunk_ids(chunk_id_sets: &[BTreeSet<ChunkId>]) -> BTreeSet<ChunkId> {
    let Some((first, rest)) = chunk_id_sets.split_first() else {
        return BTreeSet::new();
    };

    let mut result = first.clone();
    for chunk_ids in rest {
        if result.is_empty() {
            break;
        }
        result = result.intersection(chunk_ids).copied().collect();
    }
    result
}

/// 按谓词链、谓词、扫描谓词的顺序依次修正表统计信息
///
/// 只统计最终被裁剪且尚未被之前的谓词统计过的数据块，每次修正以上一次的结果为基础。
/// 没有任何修正时返回 `None`。
fn corrected_statistics(
    pass: &ChunkPruningPass,
    plan: &LogicalPlan,
    table: &Table,
    scan: NodeId,
    predicate_chains: &[PredicateChain],
    pruned_chunk_ids: &BTreeSet<ChunkId>,
) -> OptimizeResult<Option<Arc<TableStatistics>>> {
    let mut statistics: Option<Arc<TableStatistics>> =
        plan.stored_table_node(scan)?.table_statistics().cloned();
    let mut corrected = false;
    let mut counted_chunk_ids = BTreeSet::new();

    let pruning_predicates = predicate_chains
        .iter()
        .flatten()
        .filter_map(|predicate_node| pass.exclusion(*predicate_node))
        .flat_map(|exclusion| exclusion.pruning_predicates.iter());

    for predicate in pruning_predicates {
        let newly_pruned: Vec<ChunkId> = predicate
            .excluded_chunk_ids
            .intersection(pruned_chunk_ids)
            .filter(|chunk_id| !counted_chunk_ids.contains(*chunk_id))
            .copied()
            .collect();
        let num_rows_pruned: usize = newly_pruned
            .iter()
            .filter_map(|chunk_id| table.get_chunk(*chunk_id))
            .map(Chunk::size)
            .sum();
        counted_chunk_ids.extend(newly_pruned);
        if num_rows_pruned == 0 {
            continue;
        }

        let old_statistics = statistics.unwrap_or_else(|| table.table_statistics());
        trace!(
            "按列 {} 修正统计信息: 移除 {} / {} 行",
            predicate.column_id,
            num_rows_pruned,
            old_statistics.row_count
        );
        statistics = Some(Arc::new(old_statistics.pruned(
            predicate.column_id,
            num_rows_pruned,
            predicate.condition,
            &predicate.value,
            predicate.value2.as_ref(),
        )));
        corrected = true;
    }

    Ok(statistics.filter(|_| corrected))
}
