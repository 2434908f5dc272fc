//! 等高直方图
//!
//! 将一列的非空值按顺序切分为行数大致相等的桶，每个桶记录值域、行数和不同值数量。
//! 相同的值总是落在同一个桶中。

use crate::core::types::PredicateCondition;
use crate::core::value::Value;

use super::column_type::{sort_values, ColumnDataType};
use super::predicate_range::PredicateRange;

/// 直方图桶
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin<T> {
    pub min: T,
    pub max: T,
    pub height: f64,
    pub distinct_count: f64,
}

/// 等高直方图
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram<T> {
    bins: Vec<HistogramBin<T>>,
}

impl<T: ColumnDataType> Histogram<T> {
    pub fn new(bins: Vec<HistogramBin<T>>) -> Self {
        Self { bins }
    }

    /// 从一组非空值构建最多 `bin_count` 个桶的直方图，没有值时返回 `None`
    pub fn from_values(values: &[T], bin_count: usize) -> Option<Self> {
        if values.is_empty() || bin_count == 0 {
            return None;
        }

        let mut sorted = values.to_vec();
        sort_values(&mut sorted);

        let target_height = sorted.len().div_ceil(bin_count);
        let mut bins: Vec<HistogramBin<T>> = Vec::with_capacity(bin_count);
        let mut index = 0;

        while index < sorted.len() {
            let start = index;
            let mut distinct_count = 0usize;
            while index < sorted.len() && (index - start < target_height || sorted[index] == sorted[index - 1]) {
                if index == start || sorted[index] != sorted[index - 1] {
                    distinct_count += 1;
                }
                index += 1;
            }
            bins.push(HistogramBin {
                min: sorted[start].clone(),
                max: sorted[index - 1].clone(),
                height: (index - start) as f64,
                distinct_count: distinct_count as f64,
            });
        }

        Some(Self::new(bins))
    }

    pub fn bins(&self) -> &[HistogramBin<T>] {
        &self.bins
    }

    pub fn total_count(&self) -> f64 {
        self.bins.iter().map(|bin| bin.height).sum()
    }

    pub fn total_distinct_count(&self) -> f64 {
        self.bins.iter().map(|bin| bin.distinct_count).sum()
    }

    /// 均匀缩放所有桶的行数
    pub fn scaled(&self, selectivity: f64) -> Self {
        let bins = self
            .bins
            .iter()
            .map(|bin| {
                let height = bin.height * selectivity;
                HistogramBin {
                    min: bin.min.clone(),
                    max: bin.max.clone(),
                    height,
                    distinct_count: bin.distinct_count.min(height),
                }
            })
            .filter(|bin| bin.height > 0.0)
            .collect();
        Self::new(bins)
    }

    /// 移除 `num_values_pruned` 个不满足谓词的行
    ///
    /// 优先从值域与谓词不相交的桶中按高度比例移除；这些桶的行数不足时，
    /// 剩余部分从其他桶中均匀移除。无法解析谓词时退化为均匀缩放。
    pub fn pruned(
        &self,
        num_values_pruned: usize,
        condition: PredicateCondition,
        value: &Value,
        value2: Option<&Value>,
    ) -> Self {
        let total = self.total_count();
        if total <= 0.0 {
            return self.clone();
        }
        let to_remove = (num_values_pruned as f64).min(total);

        let range = match PredicateRange::<T>::from_condition(condition, value, value2) {
            Some(range) => range,
            None => return self.scaled(1.0 - to_remove / total),
        };

        let non_matching: Vec<bool> = self
            .bins
            .iter()
            .map(|bin| range.excludes(&bin.min, &bin.max))
            .collect();
        let non_matching_total: f64 = self
            .bins
            .iter()
            .zip(&non_matching)
            .filter(|(_, excluded)| **excluded)
            .map(|(bin, _)| bin.height)
            .sum();

        let removed_from_non_matching = to_remove.min(non_matching_total);
        let remainder = to_remove - removed_from_non_matching;
        let matching_total = total - non_matching_total;

        let bins = self
            .bins
            .iter()
            .zip(&non_matching)
            .map(|(bin, excluded)| {
                let height = if *excluded {
                    bin.height - removed_from_non_matching * bin.height / non_matching_total
                } else if remainder > 0.0 && matching_total > 0.0 {
                    bin.height - remainder * bin.height / matching_total
                } else {
                    bin.height
                };
                HistogramBin {
                    min: bin.min.clone(),
                    max: bin.max.clone(),
                    height,
                    distinct_count: bin.distinct_count.min(height),
                }
            })
            .filter(|bin| bin.height > f64::EPSILON)
            .collect();

        Self::new(bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential_histogram() -> Histogram<i32> {
        let values: Vec<i32> = (0..100).collect();
        Histogram::from_values(&values, 10).expect("histogram should be built")
    }

    #[test]
    fn test_from_values_equal_height() {
        let histogram = sequential_histogram();
        assert_eq!(histogram.bins().len(), 10);
        assert_eq!(histogram.bins()[0].min, 0);
        assert_eq!(histogram.bins()[0].max, 9);
        assert_eq!(histogram.total_count(), 100.0);
        assert_eq!(histogram.total_distinct_count(), 100.0);
    }

    #[test]
    fn test_equal_values_stay_in_one_bin() {
        let values = vec![1, 1, 1, 1, 2, 3];
        let histogram = Histogram::from_values(&values, 3).expect("histogram should be built");
        assert_eq!(histogram.bins()[0].min, 1);
        assert_eq!(histogram.bins()[0].max, 1);
        assert_eq!(histogram.bins()[0].height, 4.0);
        assert_eq!(histogram.total_count(), 6.0);
    }

    #[test]
    fn test_scaled() {
        let histogram = sequential_histogram().scaled(0.5);
        assert_eq!(histogram.total_count(), 50.0);
        assert_eq!(histogram.bins()[0].distinct_count, 5.0);
    }

    #[test]
    fn test_pruned_removes_non_matching_bins() {
        let histogram = sequential_histogram().pruned(
            90,
            PredicateCondition::GreaterThan,
            &Value::Int32(95),
            None,
        );
        assert_eq!(histogram.bins().len(), 1, "只应保留包含 90..99 的桶");
        assert_eq!(histogram.bins()[0].min, 90);
        assert!((histogram.total_count() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_pruned_remainder_is_spread_over_matching_bins() {
        let histogram = sequential_histogram().pruned(
            20,
            PredicateCondition::LessThan,
            &Value::Int32(95),
            None,
        );
        // 没有与谓词完全不相交的桶，全部从其余桶中均匀移除
        assert!((histogram.total_count() - 80.0).abs() < 1e-9);
        assert_eq!(histogram.bins().len(), 10);
    }

    #[test]
    fn test_pruned_with_unusable_value_scales() {
        let histogram = sequential_histogram().pruned(
            50,
            PredicateCondition::Equals,
            &Value::from("x"),
            None,
        );
        assert!((histogram.total_count() - 50.0).abs() < 1e-9);
    }
}
