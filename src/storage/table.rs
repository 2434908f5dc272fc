//! 表
//!
//! 表由列定义和有序的数据块序列组成。除最后一个数据块外，所有数据块在写满时定型；
//! 表级统计信息在首次访问时根据全部数据生成并缓存，追加数据后失效。

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::StorageConfig;
use crate::core::error::{StorageError, StorageResult};
use crate::core::types::{ChunkId, ColumnId, DataType};
use crate::core::value::Value;
use crate::storage::chunk::{Chunk, Segment};
use crate::storage::statistics::{ColumnStatistics, TableStatistics};

/// 列定义
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }
}

/// 表
#[derive(Debug)]
pub struct Table {
    column_definitions: Vec<ColumnDefinition>,
    chunks: Vec<Chunk>,
    config: StorageConfig,
    statistics: RwLock<Option<Arc<TableStatistics>>>,
}

impl Table {
    pub fn new(column_definitions: Vec<ColumnDefinition>, config: StorageConfig) -> Self {
        Self {
            column_definitions,
            chunks: Vec::new(),
            config,
            statistics: RwLock::new(None),
        }
    }

    pub fn column_definitions(&self) -> &[ColumnDefinition] {
        &self.column_definitions
    }

    pub fn column_count(&self) -> usize {
        self.column_definitions.len()
    }

    pub fn column_data_type(&self, column_id: ColumnId) -> Option<DataType> {
        self.column_definitions
            .get(column_id.index())
            .map(|definition| definition.data_type)
    }

    pub fn column_id_by_name(&self, name: &str) -> Option<ColumnId> {
        self.column_definitions
            .iter()
            .position(|definition| definition.name == name)
            .map(|index| ColumnId(index as u16))
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn get_chunk(&self, chunk_id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(chunk_id.index())
    }

    pub fn chunks(&self) -> impl Iterator<Item = (ChunkId, &Chunk)> {
        self.chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| (ChunkId(index as u32), chunk))
    }

    pub fn row_count(&self) -> usize {
        self.chunks.iter().map(Chunk::size).sum()
    }

    /// 追加一个完整的数据块并立即定型
    pub fn append_chunk(&mut self, segments: Vec<Segment>) -> StorageResult<ChunkId> {
        let chunk_id = self.append_mutable_chunk(segments)?;
        self.chunks[chunk_id.index()].finalize(self.config.max_range_filter_ranges);
        Ok(chunk_id)
    }

    /// 追加一个不定型的数据块，它没有裁剪统计信息
    pub fn append_mutable_chunk(&mut self, segments: Vec<Segment>) -> StorageResult<ChunkId> {
        self.check_segments(&segments)?;
        self.finalize_last_chunk();

        let chunk = Chunk::new(segments)?;
        self.chunks.push(chunk);
        self.invalidate_statistics();
        Ok(ChunkId((self.chunks.len() - 1) as u32))
    }

    /// 逐行追加数据，写满 `target_chunk_size` 行的数据块会被定型
    pub fn append_rows(&mut self, rows: Vec<Vec<Value>>) -> StorageResult<()> {
        let target_chunk_size = self.config.target_chunk_size.max(1);

        for row in rows {
            self.check_row(&row)?;
            let needs_new_chunk = self
                .chunks
                .last()
                .map_or(true, |chunk| chunk.is_finalized() || chunk.size() >= target_chunk_size);
            if needs_new_chunk {
                self.finalize_last_chunk();
                let segments = self
                    .column_definitions
                    .iter()
                    .map(|definition| Segment {
                        data_type: definition.data_type,
                        values: Vec::with_capacity(target_chunk_size),
                    })
                    .collect();
                self.chunks.push(Chunk::new(segments)?);
            }

            if let Some(chunk) = self.chunks.last_mut() {
                chunk.append_row(row)?;
                if chunk.size() >= target_chunk_size {
                    chunk.finalize(self.config.max_range_filter_ranges);
                }
            }
        }

        self.invalidate_statistics();
        Ok(())
    }

    /// 定型最后一个仍可变的数据块
    pub fn finalize_last_chunk(&mut self) {
        let max_ranges = self.config.max_range_filter_ranges;
        if let Some(chunk) = self.chunks.last_mut() {
            if !chunk.is_finalized() && chunk.size() > 0 {
                chunk.finalize(max_ranges);
            }
        }
    }

    /// 表级统计信息，首次访问时生成
    pub fn table_statistics(&self) -> Arc<TableStatistics> {
        if let Some(statistics) = self.statistics.read().as_ref() {
            return Arc::clone(statistics);
        }

        let statistics = Arc::new(self.generate_statistics());
        *self.statistics.write() = Some(Arc::clone(&statistics));
        statistics
    }

    fn generate_statistics(&self) -> TableStatistics {
        let column_statistics = self
            .column_definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| {
                let values: Vec<Value> = self
                    .chunks
                    .iter()
                    .filter_map(|chunk| chunk.segment(ColumnId(index as u16)))
                    .flat_map(|segment| segment.values.iter().cloned())
                    .collect();
                ColumnStatistics::table_statistics(
                    definition.data_type,
                    &values,
                    self.config.histogram_bin_count,
                )
            })
            .collect();

        log::debug!(
            "生成表统计信息: {} 列, {} 行, {} 个数据块",
            self.column_count(),
            self.row_count(),
            self.chunk_count()
        );
        TableStatistics::new(column_statistics, self.row_count() as f64)
    }

    fn invalidate_statistics(&mut self) {
        *self.statistics.get_mut() = None;
    }

    fn check_segments(&self, segments: &[Segment]) -> StorageResult<()> {
        if segments.len() != self.column_count() {
            return Err(StorageError::ColumnCountMismatch {
                expected: self.column_count(),
                actual: segments.len(),
            });
        }
        for (segment, definition) in segments.iter().zip(&self.column_definitions) {
            if segment.data_type != definition.data_type {
                return Err(StorageError::ColumnTypeMismatch {
                    column: definition.name.clone(),
                    expected: definition.data_type,
                });
            }
            if !definition.nullable && segment.values.iter().any(Value::is_null) {
                return Err(StorageError::InvalidInput(format!(
                    "列 {} 不允许空值",
                    definition.name
                )));
            }
        }
        Ok(())
    }

    fn check_row(&self, row: &[Value]) -> StorageResult<()> {
        if row.len() != self.column_count() {
            return Err(StorageError::ColumnCountMismatch {
                expected: self.column_count(),
                actual: row.len(),
            });
        }
        for (value, definition) in row.iter().zip(&self.column_definitions) {
            if !value.fits(definition.data_type) {
                return Err(StorageError::ColumnTypeMismatch {
                    column: definition.name.clone(),
                    expected: definition.data_type,
                });
            }
            if value.is_null() && !definition.nullable {
                return Err(StorageError::InvalidInput(format!(
                    "列 {} 不允许空值",
                    definition.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(target_chunk_size: usize) -> StorageConfig {
        StorageConfig {
            target_chunk_size,
            ..StorageConfig::default()
        }
    }

    fn int_table(target_chunk_size: usize) -> Table {
        Table::new(
            vec![ColumnDefinition::new("a", DataType::Int32, false)],
            config(target_chunk_size),
        )
    }

    #[test]
    fn test_append_rows_splits_into_chunks() {
        let mut table = int_table(10);
        let rows = (0..25).map(|v| vec![Value::Int32(v)]).collect();
        table.append_rows(rows).expect("append should succeed");

        assert_eq!(table.chunk_count(), 3);
        assert_eq!(table.row_count(), 25);
        assert!(table.get_chunk(ChunkId(0)).map_or(false, Chunk::is_finalized));
        assert!(table.get_chunk(ChunkId(1)).map_or(false, Chunk::is_finalized));
        assert!(
            !table.get_chunk(ChunkId(2)).map_or(true, Chunk::is_finalized),
            "未写满的最后一个数据块应保持可变"
        );

        table.append_rows(vec![vec![Value::Int32(25)]]).expect("append should succeed");
        assert_eq!(table.chunk_count(), 3);
        assert_eq!(table.get_chunk(ChunkId(2)).map(Chunk::size), Some(6));
    }

    #[test]
    fn test_append_rows_rejects_bad_rows() {
        let mut table = int_table(10);
        assert!(matches!(
            table.append_rows(vec![vec![Value::Int64(1)]]),
            Err(StorageError::ColumnTypeMismatch { .. })
        ));
        assert!(matches!(
            table.append_rows(vec![vec![Value::Null]]),
            Err(StorageError::InvalidInput(_))
        ));
        assert!(matches!(
            table.append_rows(vec![vec![]]),
            Err(StorageError::ColumnCountMismatch { .. })
        ));
    }

    #[test]
    fn test_append_chunk_finalizes_previous_chunk() {
        let mut table = int_table(100);
        let segment = |values: Vec<i32>| {
            Segment::new(DataType::Int32, values.into_iter().map(Value::Int32).collect())
                .expect("segment")
        };
        table.append_mutable_chunk(vec![segment(vec![1, 2])]).expect("append");
        assert!(table.get_chunk(ChunkId(0)).map_or(false, |c| !c.is_finalized()));

        table.append_chunk(vec![segment(vec![3, 4])]).expect("append");
        assert!(table.get_chunk(ChunkId(0)).map_or(false, Chunk::is_finalized));
        assert!(table.get_chunk(ChunkId(1)).map_or(false, Chunk::is_finalized));
    }

    #[test]
    fn test_table_statistics_cached_and_invalidated() {
        let mut table = int_table(10);
        table
            .append_rows((0..20).map(|v| vec![Value::Int32(v)]).collect())
            .expect("append should succeed");

        let first = table.table_statistics();
        assert_eq!(first.row_count, 20.0);
        assert!(Arc::ptr_eq(&first, &table.table_statistics()));

        table.append_rows(vec![vec![Value::Int32(20)]]).expect("append should succeed");
        assert_eq!(table.table_statistics().row_count, 21.0);
    }

    #[test]
    fn test_column_lookup() {
        let table = int_table(10);
        assert_eq!(table.column_id_by_name("a"), Some(ColumnId(0)));
        assert_eq!(table.column_id_by_name("b"), None);
        assert_eq!(table.column_data_type(ColumnId(0)), Some(DataType::Int32));
    }
}
