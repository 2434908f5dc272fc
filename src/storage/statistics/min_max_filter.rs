//! 最小/最大值过滤器
//!
//! 记录一个列段中的最小值和最大值，可用于任意有序类型

use crate::core::types::PredicateCondition;
use crate::core::value::Value;

use super::column_type::{sort_values, ColumnDataType};
use super::predicate_range::PredicateRange;

/// 最小/最大值过滤器
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxFilter<T> {
    pub min: T,
    pub max: T,
}

impl<T: ColumnDataType> MinMaxFilter<T> {
    pub fn new(min: T, max: T) -> Self {
        debug_assert!(min <= max, "MinMaxFilter 的最小值不能大于最大值");
        Self { min, max }
    }

    /// 从一组非空值构建过滤器，没有值时返回 `None`
    pub fn from_values(values: &[T]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sort_values(&mut sorted);
        let min = sorted.first()?.clone();
        let max = sorted.last()?.clone();
        Some(Self::new(min, max))
    }

    /// 是否可以证明没有值满足谓词
    ///
    /// 无法判断时（例如值类型不符）返回 `false`
    pub fn does_not_contain(
        &self,
        condition: PredicateCondition,
        value: &Value,
        value2: Option<&Value>,
    ) -> bool {
        PredicateRange::<T>::from_condition(condition, value, value2)
            .is_some_and(|range| range.excludes(&self.min, &self.max))
    }

    /// 最小/最大值不随行数变化
    pub fn scaled(&self, _selectivity: f64) -> Self {
        self.clone()
    }

    /// 被移除的数据块中的行不满足谓词，但剩余数据块仍可能包含整个值域，
    /// 因此保持原有边界
    pub fn pruned(
        &self,
        _num_values_pruned: usize,
        _condition: PredicateCondition,
        _value: &Value,
        _value2: Option<&Value>,
    ) -> Self {
        self.clone()
    }
}
