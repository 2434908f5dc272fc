//! 集成测试共享工具模块
//!
//! 提供测试表、计划构建和结果检查的辅助函数

#![allow(dead_code)]

use std::sync::Arc;

use chunkprune::config::StorageConfig;
use chunkprune::core::{ChunkId, ColumnId, DataType, Expression, PredicateCondition, Value};
use chunkprune::query::optimizer::OptContext;
use chunkprune::query::planner::scan_predicate::ScanPredicate;
use chunkprune::query::planner::{LogicalPlan, NodeId};
use chunkprune::storage::{ColumnDefinition, StorageManager, Table};

pub const TABLE_NAME: &str = "numbers";
pub const CHUNK_SIZE: usize = 10;
pub const CHUNK_COUNT: i32 = 10;

/// 10 个定型数据块，数据块 i 中列 a 为 [10i, 10i+9]，列 f 为 a / 4，列 s 为两位数字的字符串
pub fn numbers_table() -> Table {
    let mut table = Table::new(
        vec![
            ColumnDefinition::new("a", DataType::Int32, false),
            ColumnDefinition::new("f", DataType::Float, false),
            ColumnDefinition::new("s", DataType::String, true),
        ],
        StorageConfig {
            target_chunk_size: CHUNK_SIZE,
            ..StorageConfig::default()
        },
    );
    let rows = (0..CHUNK_COUNT * CHUNK_SIZE as i32)
        .map(|v| {
            vec![
                Value::Int32(v),
                Value::Float(v as f32 / 4.0),
                Value::String(format!("{:02}", v)),
            ]
        })
        .collect();
    table.append_rows(rows).expect("追加测试数据失败");
    table
}

/// 登记了测试表的优化上下文
pub fn context_with(table: Table) -> OptContext {
    let manager = StorageManager::new();
    manager.add_table(TABLE_NAME, table).expect("登记测试表失败");
    OptContext::new(Arc::new(manager))
}

pub fn numbers_context() -> OptContext {
    context_with(numbers_table())
}

/// 列与字面量的比较
pub fn compare(scan: NodeId, column: u16, condition: PredicateCondition, value: impl Into<Value>) -> Expression {
    Expression::comparison(condition, Expression::column(scan, column), Expression::literal(value))
}

/// 扫描 -> 单个谓词 的计划
pub fn single_predicate_plan(
    predicate: impl FnOnce(NodeId) -> Expression,
) -> (LogicalPlan, NodeId) {
    let mut plan = LogicalPlan::new();
    let scan = plan.add_stored_table(TABLE_NAME);
    let expression = predicate(scan);
    let node = plan.add_predicate(scan, expression).expect("添加谓词失败");
    plan.set_root(node).expect("设置根节点失败");
    (plan, scan)
}

pub fn chunk_ids(ids: impl IntoIterator<Item = u32>) -> Vec<ChunkId> {
    ids.into_iter().map(ChunkId).collect()
}

pub fn pruned_chunk_ids(plan: &LogicalPlan, scan: NodeId) -> Vec<ChunkId> {
    plan.stored_table_node(scan)
        .expect("扫描节点不存在")
        .pruned_chunk_ids()
        .to_vec()
}

/// 被裁剪的数据块中没有任何行满足给定的谓词
pub fn assert_no_match_in_pruned_chunks(
    ctx: &OptContext,
    pruned: &[ChunkId],
    predicates: &[ScanPredicate],
) {
    let table = ctx.storage_manager().get_table(TABLE_NAME).expect("测试表不存在");
    for chunk_id in pruned {
        let chunk = table.get_chunk(*chunk_id).expect("数据块不存在");
        for row in 0..chunk.size() {
            let all_match = predicates.iter().all(|predicate| {
                let value = &chunk
                    .segment(predicate.column_id)
                    .expect("列段不存在")
                    .values[row];
                predicate.matches(value)
            });
            assert!(!all_match, "被裁剪的数据块 {} 第 {} 行满足谓词", chunk_id, row);
        }
    }
}

pub fn column(id: u16) -> ColumnId {
    ColumnId(id)
}
