//! 数据块与列段
//!
//! 数据块是表的水平分区，也是裁剪的基本单位。数据块定型时为每列采集裁剪统计信息；
//! 仍可追加数据的数据块没有统计信息，永远不会被裁剪。

use crate::core::error::{StorageError, StorageResult};
use crate::core::types::{ColumnId, DataType};
use crate::core::value::Value;
use crate::storage::statistics::ColumnStatistics;

/// 一个数据块中一列的数据
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub data_type: DataType,
    pub values: Vec<Value>,
}

impl Segment {
    pub fn new(data_type: DataType, values: Vec<Value>) -> StorageResult<Self> {
        if let Some(bad) = values.iter().find(|value| !value.fits(data_type)) {
            return Err(StorageError::InvalidInput(format!(
                "值 {} 不能存入 {} 类型的列段",
                bad, data_type
            )));
        }
        Ok(Self { data_type, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 数据块
#[derive(Debug, Clone)]
pub struct Chunk {
    segments: Vec<Segment>,
    row_count: usize,
    pruning_statistics: Option<Vec<ColumnStatistics>>,
}

impl Chunk {
    /// 创建可变数据块（尚未定型，没有裁剪统计信息）
    pub fn new(segments: Vec<Segment>) -> StorageResult<Self> {
        let row_count = segments.first().map(Segment::len).unwrap_or(0);
        if segments.iter().any(|segment| segment.len() != row_count) {
            return Err(StorageError::RowCountMismatch(
                "同一数据块中所有列段的行数必须相同".to_string(),
            ));
        }

        Ok(Self {
            segments,
            row_count,
            pruning_statistics: None,
        })
    }

    /// 向可变数据块追加一行
    pub fn append_row(&mut self, row: Vec<Value>) -> StorageResult<()> {
        if self.is_finalized() {
            return Err(StorageError::InvalidInput("不能向已定型的数据块追加数据".to_string()));
        }
        if row.len() != self.segments.len() {
            return Err(StorageError::ColumnCountMismatch {
                expected: self.segments.len(),
                actual: row.len(),
            });
        }
        if let Some(index) = row
            .iter()
            .zip(&self.segments)
            .position(|(value, segment)| !value.fits(segment.data_type))
        {
            return Err(StorageError::ColumnTypeMismatch {
                column: index.to_string(),
                expected: self.segments[index].data_type,
            });
        }

        for (value, segment) in row.into_iter().zip(self.segments.iter_mut()) {
            segment.values.push(value);
        }
        self.row_count += 1;
        Ok(())
    }

    /// 定型数据块并采集每列的裁剪统计信息
    pub fn finalize(&mut self, max_ranges: usize) {
        let statistics = self
            .segments
            .iter()
            .map(|segment| {
                ColumnStatistics::pruning_statistics(segment.data_type, &segment.values, max_ranges)
            })
            .collect();
        self.pruning_statistics = Some(statistics);
    }

    pub fn is_finalized(&self) -> bool {
        self.pruning_statistics.is_some()
    }

    /// 数据块的行数
    pub fn size(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segment(&self, column_id: ColumnId) -> Option<&Segment> {
        self.segments.get(column_id.index())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn pruning_statistics(&self) -> Option<&[ColumnStatistics]> {
        self.pruning_statistics.as_deref()
    }
}
