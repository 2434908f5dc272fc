//! 表级统计信息
//!
//! 行数加每列一个统计信息对象，供下游基于代价的决策使用

use crate::core::types::{ColumnId, PredicateCondition};
use crate::core::value::Value;

use super::column_statistics::ColumnStatistics;

/// 表级统计信息
#[derive(Debug, Clone, PartialEq)]
pub struct TableStatistics {
    pub column_statistics: Vec<ColumnStatistics>,
    pub row_count: f64,
}

impl TableStatistics {
    pub fn new(column_statistics: Vec<ColumnStatistics>, row_count: f64) -> Self {
        Self {
            column_statistics,
            row_count,
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_statistics.len()
    }

    pub fn column(&self, column_id: ColumnId) -> Option<&ColumnStatistics> {
        self.column_statistics.get(column_id.index())
    }

    /// 数据块被裁剪后修正统计信息
    ///
    /// 裁剪所依据的列调用 `pruned`，假设被移除的行恰好是不满足谓词的行；
    /// 其余列没有相关性信息，按 `1 - 移除行数 / 原行数` 均匀缩放
    pub fn pruned(
        &self,
        column_id: ColumnId,
        num_rows_pruned: usize,
        condition: PredicateCondition,
        value: &Value,
        value2: Option<&Value>,
    ) -> Self {
        let removed = (num_rows_pruned as f64).min(self.row_count);
        let selectivity = if self.row_count > 0.0 {
            1.0 - removed / self.row_count
        } else {
            0.0
        };

        let column_statistics = self
            .column_statistics
            .iter()
            .enumerate()
            .map(|(index, statistics)| {
                if index == column_id.index() {
                    statistics.pruned(num_rows_pruned, condition, value, value2)
                } else {
                    statistics.scaled(selectivity)
                }
            })
            .collect();

        Self::new(column_statistics, self.row_count - removed)
    }
}
