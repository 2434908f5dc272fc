//! 按列类型分发的单列统计信息
//!
//! 列类型是固定的封闭集合，使用枚举静态分发到具体类型的 `AttributeStatistics<T>`，避免动态分发

use crate::core::types::{DataType, PredicateCondition};
use crate::core::value::Value;

use super::attribute_statistics::AttributeStatistics;
use super::column_type::{typed_values, ArithmeticType, ColumnDataType};
use super::histogram::Histogram;
use super::min_max_filter::MinMaxFilter;
use super::range_filter::RangeFilter;

/// 单列统计信息，按列类型区分
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStatistics {
    Int32(AttributeStatistics<i32>),
    Int64(AttributeStatistics<i64>),
    Float(AttributeStatistics<f32>),
    Double(AttributeStatistics<f64>),
    String(AttributeStatistics<String>),
}

/// 对每个变体执行相同的表达式
macro_rules! dispatch {
    ($self:expr, $stats:ident => $body:expr) => {
        match $self {
            ColumnStatistics::Int32($stats) => $body,
            ColumnStatistics::Int64($stats) => $body,
            ColumnStatistics::Float($stats) => $body,
            ColumnStatistics::Double($stats) => $body,
            ColumnStatistics::String($stats) => $body,
        }
    };
}

/// 对每个变体执行表达式，并以相同变体包装结果
macro_rules! dispatch_map {
    ($self:expr, $stats:ident => $body:expr) => {
        match $self {
            ColumnStatistics::Int32($stats) => ColumnStatistics::Int32($body),
            ColumnStatistics::Int64($stats) => ColumnStatistics::Int64($body),
            ColumnStatistics::Float($stats) => ColumnStatistics::Float($body),
            ColumnStatistics::Double($stats) => ColumnStatistics::Double($body),
            ColumnStatistics::String($stats) => ColumnStatistics::String($body),
        }
    };
}

impl ColumnStatistics {
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnStatistics::Int32(_) => DataType::Int32,
            ColumnStatistics::Int64(_) => DataType::Int64,
            ColumnStatistics::Float(_) => DataType::Float,
            ColumnStatistics::Double(_) => DataType::Double,
            ColumnStatistics::String(_) => DataType::String,
        }
    }

    /// 为一个定型的列段采集裁剪统计信息
    ///
    /// 算术列生成范围过滤器，字符串列生成最小/最大值过滤器；全为空值的列段没有过滤器
    pub fn pruning_statistics(data_type: DataType, values: &[Value], max_ranges: usize) -> Self {
        match data_type {
            DataType::Int32 => ColumnStatistics::Int32(range_statistics(values, max_ranges)),
            DataType::Int64 => ColumnStatistics::Int64(range_statistics(values, max_ranges)),
            DataType::Float => ColumnStatistics::Float(range_statistics(values, max_ranges)),
            DataType::Double => ColumnStatistics::Double(range_statistics(values, max_ranges)),
            DataType::String => {
                let typed = typed_values::<String>(values);
                ColumnStatistics::String(
                    MinMaxFilter::from_values(&typed)
                        .map(AttributeStatistics::with_min_max_filter)
                        .unwrap_or_default(),
                )
            }
        }
    }

    /// 为整列生成表级统计信息（直方图、最小/最大值与空值比例）
    pub fn table_statistics(data_type: DataType, values: &[Value], bin_count: usize) -> Self {
        match data_type {
            DataType::Int32 => ColumnStatistics::Int32(summary_statistics(values, bin_count)),
            DataType::Int64 => ColumnStatistics::Int64(summary_statistics(values, bin_count)),
            DataType::Float => ColumnStatistics::Float(summary_statistics(values, bin_count)),
            DataType::Double => ColumnStatistics::Double(summary_statistics(values, bin_count)),
            DataType::String => ColumnStatistics::String(summary_statistics(values, bin_count)),
        }
    }

    /// 是否可以证明没有值满足谓词
    pub fn does_not_contain(
        &self,
        condition: PredicateCondition,
        value: &Value,
        value2: Option<&Value>,
    ) -> bool {
        dispatch!(self, stats => stats.does_not_contain(condition, value, value2))
    }

    /// 均匀缩放估算的基数
    pub fn scaled(&self, selectivity: f64) -> Self {
        dispatch_map!(self, stats => stats.scaled(selectivity))
    }

    /// 从估算中移除 `num_values_pruned` 个不满足谓词的行
    pub fn pruned(
        &self,
        num_values_pruned: usize,
        condition: PredicateCondition,
        value: &Value,
        value2: Option<&Value>,
    ) -> Self {
        dispatch_map!(self, stats => stats.pruned(num_values_pruned, condition, value, value2))
    }

    pub fn has_range_filter(&self) -> bool {
        dispatch!(self, stats => stats.range_filter.is_some())
    }

    pub fn has_min_max_filter(&self) -> bool {
        dispatch!(self, stats => stats.min_max_filter.is_some())
    }

    /// 直方图估算的非空行数
    pub fn histogram_total_count(&self) -> Option<f64> {
        dispatch!(self, stats => stats.histogram.as_ref().map(|h| h.total_count()))
    }

    pub fn null_value_ratio(&self) -> Option<f64> {
        dispatch!(self, stats => stats.null_value_ratio)
    }
}

fn range_statistics<T: ArithmeticType>(values: &[Value], max_ranges: usize) -> AttributeStatistics<T> {
    let typed = typed_values::<T>(values);
    let statistics = RangeFilter::build_filter(&typed, max_ranges)
        .map(AttributeStatistics::with_range_filter)
        .unwrap_or_default();
    AttributeStatistics {
        contains_nan: values.iter().any(Value::is_nan),
        ..statistics
    }
}

fn summary_statistics<T: ColumnDataType>(values: &[Value], bin_count: usize) -> AttributeStatistics<T> {
    let typed = typed_values::<T>(values);
    let null_value_ratio = if values.is_empty() {
        None
    } else {
        Some((values.len() - typed.len()) as f64 / values.len() as f64)
    };

    AttributeStatistics {
        histogram: Histogram::from_values(&typed, bin_count),
        min_max_filter: MinMaxFilter::from_values(&typed),
        range_filter: None,
        null_value_ratio,
        contains_nan: values.iter().any(Value::is_nan),
    }
}
