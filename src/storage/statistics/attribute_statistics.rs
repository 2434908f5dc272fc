//! 单列统计信息
//!
//! 一个列（或一个列段）的统计信息集合：直方图、最小/最大值过滤器、范围过滤器和空值比例。
//! 数据块的裁剪统计信息只包含过滤器，表级统计信息额外包含直方图。

use crate::core::types::PredicateCondition;
use crate::core::value::Value;

use super::column_type::{ArithmeticType, ColumnDataType};
use super::histogram::Histogram;
use super::min_max_filter::MinMaxFilter;
use super::range_filter::RangeFilter;

/// 单列统计信息
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeStatistics<T> {
    pub histogram: Option<Histogram<T>>,
    pub min_max_filter: Option<MinMaxFilter<T>>,
    pub range_filter: Option<RangeFilter<T>>,
    pub null_value_ratio: Option<f64>,
    /// 列段中存在 NaN。过滤器不覆盖 NaN，而 NaN 满足 `!=`
    pub contains_nan: bool,
}

impl<T> Default for AttributeStatistics<T> {
    fn default() -> Self {
        Self {
            histogram: None,
            min_max_filter: None,
            range_filter: None,
            null_value_ratio: None,
            contains_nan: false,
        }
    }
}

impl<T: ColumnDataType> AttributeStatistics<T> {
    pub fn with_min_max_filter(filter: MinMaxFilter<T>) -> Self {
        Self {
            min_max_filter: Some(filter),
            ..Self::default()
        }
    }

    /// 是否可以证明没有值满足谓词
    ///
    /// 范围过滤器包含最小/最大值过滤器的全部信息，两者不会同时存在；
    /// 任意一个过滤器能够排除即可排除
    pub fn does_not_contain(
        &self,
        condition: PredicateCondition,
        value: &Value,
        value2: Option<&Value>,
    ) -> bool {
        debug_assert!(
            self.range_filter.is_none() || self.min_max_filter.is_none(),
            "列段不应同时拥有 MinMaxFilter 和 RangeFilter"
        );

        if self.contains_nan && condition == PredicateCondition::NotEquals {
            return false;
        }

        let excluded_by_range = self
            .range_filter
            .as_ref()
            .is_some_and(|filter| filter.does_not_contain(condition, value, value2));
        let excluded_by_min_max = self
            .min_max_filter
            .as_ref()
            .is_some_and(|filter| filter.does_not_contain(condition, value, value2));

        excluded_by_range || excluded_by_min_max
    }

    /// 均匀缩放
    pub fn scaled(&self, selectivity: f64) -> Self {
        Self {
            histogram: self.histogram.as_ref().map(|h| h.scaled(selectivity)),
            min_max_filter: self.min_max_filter.as_ref().map(|f| f.scaled(selectivity)),
            range_filter: self.range_filter.as_ref().map(|f| f.scaled(selectivity)),
            null_value_ratio: self.null_value_ratio,
            contains_nan: self.contains_nan,
        }
    }

    /// 移除 `num_values_pruned` 个不满足谓词的行
    pub fn pruned(
        &self,
        num_values_pruned: usize,
        condition: PredicateCondition,
        value: &Value,
        value2: Option<&Value>,
    ) -> Self {
        Self {
            histogram: self
                .histogram
                .as_ref()
                .map(|h| h.pruned(num_values_pruned, condition, value, value2)),
            min_max_filter: self
                .min_max_filter
                .as_ref()
                .map(|f| f.pruned(num_values_pruned, condition, value, value2)),
            range_filter: self
                .range_filter
                .as_ref()
                .map(|f| f.pruned(num_values_pruned, condition, value, value2)),
            null_value_ratio: self.null_value_ratio,
            contains_nan: self.contains_nan,
        }
    }
}

impl<T: ArithmeticType> AttributeStatistics<T> {
    pub fn with_range_filter(filter: RangeFilter<T>) -> Self {
        Self {
            range_filter: Some(filter),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_filter_is_authoritative() {
        let stats = AttributeStatistics::with_range_filter(RangeFilter::new(vec![(0, 9), (20, 29)]));
        assert!(stats.does_not_contain(PredicateCondition::Equals, &Value::Int32(15), None));
        assert!(!stats.does_not_contain(PredicateCondition::Equals, &Value::Int32(25), None));
    }

    #[test]
    fn test_min_max_filter() {
        let stats = AttributeStatistics::with_min_max_filter(MinMaxFilter::new(
            "b".to_string(),
            "d".to_string(),
        ));
        assert!(stats.does_not_contain(PredicateCondition::LessThan, &Value::from("b"), None));
        assert!(!stats.does_not_contain(PredicateCondition::LessThanEquals, &Value::from("b"), None));
    }

    #[test]
    fn test_nan_blocks_not_equals_only() {
        let stats = AttributeStatistics {
            contains_nan: true,
            ..AttributeStatistics::with_range_filter(RangeFilter::new(vec![(1.0f32, 1.0)]))
        };
        assert!(
            !stats.does_not_contain(PredicateCondition::NotEquals, &Value::Float(1.0), None),
            "NaN 满足 !=，含 NaN 的列段不能被排除"
        );
        assert!(stats.does_not_contain(PredicateCondition::Equals, &Value::Float(2.0), None));
        assert!(stats.does_not_contain(PredicateCondition::GreaterThan, &Value::Float(1.0), None));
    }

    #[test]
    fn test_without_filters_never_prunes() {
        let stats = AttributeStatistics::<i32>::default();
        assert!(!stats.does_not_contain(PredicateCondition::Equals, &Value::Int32(1), None));
    }

    #[test]
    fn test_scaled_and_pruned_keep_filters() {
        let values: Vec<i64> = (0..40).collect();
        let stats = AttributeStatistics {
            histogram: Histogram::from_values(&values, 4),
            min_max_filter: MinMaxFilter::from_values(&values),
            range_filter: None,
            null_value_ratio: Some(0.0),
            contains_nan: false,
        };

        let scaled = stats.scaled(0.25);
        assert_eq!(scaled.min_max_filter, stats.min_max_filter);
        assert_eq!(scaled.histogram.as_ref().map(|h| h.total_count()), Some(10.0));

        let pruned = stats.pruned(10, PredicateCondition::GreaterThanEquals, &Value::Int64(10), None);
        assert_eq!(pruned.histogram.as_ref().map(|h| h.bins().len()), Some(3));
        assert_eq!(pruned.null_value_ratio, Some(0.0));
    }
}
