//! 范围过滤器
//!
//! 用若干个互不相交的闭区间覆盖一个列段中的所有值。区间之间的空隙中不存在任何值，
//! 因此它比最小/最大值过滤器更精确，并包含后者的全部信息。只适用于算术类型。

use crate::core::types::PredicateCondition;
use crate::core::value::Value;

use super::column_type::{sort_values, ArithmeticType, ColumnDataType};
use super::predicate_range::PredicateRange;

/// 范围过滤器
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter<T> {
    /// 升序排列且互不相交的闭区间
    ranges: Vec<(T, T)>,
}

impl<T: ArithmeticType> RangeFilter<T> {
    pub fn new(ranges: Vec<(T, T)>) -> Self {
        debug_assert!(!ranges.is_empty(), "RangeFilter 至少需要一个区间");
        debug_assert!(
            ranges.windows(2).all(|w| w[0].1 < w[1].0),
            "RangeFilter 的区间必须升序且互不相交"
        );
        Self { ranges }
    }

    /// 从一组值构建最多 `max_ranges` 个区间的过滤器
    ///
    /// 对去重后的有序值，在相邻值之间最大的 `max_ranges - 1` 个空隙处切分
    pub fn build_filter(values: &[T], max_ranges: usize) -> Option<Self> {
        let mut sorted = values.to_vec();
        sort_values(&mut sorted);
        sorted.dedup_by(|a, b| a == b);

        let first = *sorted.first()?;
        let last = *sorted.last()?;

        let split_count = max_ranges.saturating_sub(1).min(sorted.len() - 1);
        if split_count == 0 {
            return Some(Self::new(vec![(first, last)]));
        }

        let mut gaps: Vec<(f64, usize)> = sorted
            .windows(2)
            .enumerate()
            .map(|(index, pair)| (T::distance(pair[0], pair[1]), index))
            .collect();
        gaps.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut split_after: Vec<usize> = gaps.iter().take(split_count).map(|(_, index)| *index).collect();
        split_after.sort_unstable();

        let mut ranges = Vec::with_capacity(split_count + 1);
        let mut start = 0;
        for index in split_after {
            ranges.push((sorted[start], sorted[index]));
            start = index + 1;
        }
        ranges.push((sorted[start], last));

        Some(Self::new(ranges))
    }
}

// 只有构造受限于算术类型，查询对任意有序类型都成立
impl<T: ColumnDataType> RangeFilter<T> {
    pub fn ranges(&self) -> &[(T, T)] {
        &self.ranges
    }

    /// 是否可以证明没有值满足谓词
    pub fn does_not_contain(
        &self,
        condition: PredicateCondition,
        value: &Value,
        value2: Option<&Value>,
    ) -> bool {
        match PredicateRange::<T>::from_condition(condition, value, value2) {
            Some(range) => {
                !self.ranges.is_empty() && self.ranges.iter().all(|(min, max)| range.excludes(min, max))
            }
            None => false,
        }
    }

    pub fn scaled(&self, _selectivity: f64) -> Self {
        self.clone()
    }

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
