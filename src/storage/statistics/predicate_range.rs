//! 谓词取值范围
//!
//! 把 (条件, 值, 值2) 形式的扫描谓词转换为满足谓词的取值集合，
//! 过滤器和直方图都通过它判断某个值域是否与谓词完全不相交

use crate::core::types::PredicateCondition;
use crate::core::value::Value;

use super::column_type::ColumnDataType;

#[derive(Debug, Clone, PartialEq)]
pub struct RangeBound<T> {
    pub value: T,
    pub inclusive: bool,
}

impl<T> RangeBound<T> {
    fn inclusive(value: T) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    fn exclusive(value: T) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }
}

/// 满足谓词的取值集合
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateRange<T> {
    /// 连续区间，缺失的边界表示无界
    Interval {
        lower: Option<RangeBound<T>>,
        upper: Option<RangeBound<T>>,
    },
    /// 除某个值之外的所有值
    AllExcept(T),
    /// 没有任何值满足谓词（例如下界大于上界的区间条件）
    Empty,
}

impl<T: ColumnDataType> PredicateRange<T> {
    /// 构建谓词的取值集合
    ///
    /// 值的类型与 `T` 不符，或区间条件缺少第二个值时返回 `None`，
    /// 调用方应将其视为"无法判断"
    pub fn from_condition(
        condition: PredicateCondition,
        value: &Value,
        value2: Option<&Value>,
    ) -> Option<Self> {
        let value = T::from_value(value)?;

        let range = match condition {
            PredicateCondition::Equals => PredicateRange::Interval {
                lower: Some(RangeBound::inclusive(value.clone())),
                upper: Some(RangeBound::inclusive(value)),
            },
            PredicateCondition::NotEquals => PredicateRange::AllExcept(value),
            PredicateCondition::LessThan => PredicateRange::Interval {
                lower: None,
                upper: Some(RangeBound::exclusive(value)),
            },
            PredicateCondition::LessThanEquals => PredicateRange::Interval {
                lower: None,
                upper: Some(RangeBound::inclusive(value)),
            },
            PredicateCondition::GreaterThan => PredicateRange::Interval {
                lower: Some(RangeBound::exclusive(value)),
                upper: None,
            },
            PredicateCondition::GreaterThanEquals => PredicateRange::Interval {
                lower: Some(RangeBound::inclusive(value)),
                upper: None,
            },
            PredicateCondition::BetweenInclusive
            | PredicateCondition::BetweenLowerExclusive
            | PredicateCondition::BetweenUpperExclusive
            | PredicateCondition::BetweenExclusive => {
                let upper = T::from_value(value2?)?;
                let both_inclusive =
                    condition.is_lower_inclusive() && condition.is_upper_inclusive();
                let empty = value > upper || (value == upper && !both_inclusive);
                if empty {
                    PredicateRange::Empty
                } else {
                    PredicateRange::Interval {
                        lower: Some(RangeBound {
                            value,
                            inclusive: condition.is_lower_inclusive(),
                        }),
                        upper: Some(RangeBound {
                            value: upper,
                            inclusive: condition.is_upper_inclusive(),
                        }),
                    }
                }
            }
        };

        Some(range)
    }

    /// 闭区间 `[min, max]` 中是否一定没有值满足谓词
    pub fn excludes(&self, min: &T, max: &T) -> bool {
        match self {
            PredicateRange::Empty => true,
            PredicateRange::AllExcept(value) => min == value && max == value,
            PredicateRange::Interval { lower, upper } => {
                let below_lower = lower.as_ref().is_some_and(|bound| {
                    if bound.inclusive {
                        *max < bound.value
                    } else {
                        *max <= bound.value
                    }
                });
                let above_upper = upper.as_ref().is_some_and(|bound| {
                    if bound.inclusive {
                        *min > bound.value
                    } else {
                        *min >= bound.value
                    }
                });
                below_lower || above_upper
            }
        }
    }

    /// 单个值是否满足谓词
    pub fn contains(&self, value: &T) -> bool {
        !self.excludes(value, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(condition: PredicateCondition, value: i32, value2: Option<i32>) -> PredicateRange<i32> {
        let value2 = value2.map(Value::Int32);
        PredicateRange::from_condition(condition, &Value::Int32(value), value2.as_ref())
            .expect("range should be built")
    }

    #[test]
    fn test_comparison_exclusion() {
        let gt = range(PredicateCondition::GreaterThan, 95, None);
        assert!(gt.excludes(&80, &89));
        assert!(gt.excludes(&80, &95));
        assert!(!gt.excludes(&90, &99));

        let le = range(PredicateCondition::LessThanEquals, 10, None);
        assert!(!le.excludes(&10, &19));
        assert!(le.excludes(&11, &19));
    }

    #[test]
    fn test_between_exclusion() {
        let between = range(PredicateCondition::BetweenLowerExclusive, 10, Some(20));
        assert!(between.excludes(&0, &10), "下界为开区间");
        assert!(!between.excludes(&20, &30), "上界为闭区间");
        assert!(between.excludes(&21, &30));
    }

    #[test]
    fn test_inverted_between_is_empty() {
        assert_eq!(range(PredicateCondition::BetweenInclusive, 20, Some(10)), PredicateRange::Empty);
        assert_eq!(range(PredicateCondition::BetweenExclusive, 5, Some(5)), PredicateRange::Empty);
        assert_ne!(range(PredicateCondition::BetweenInclusive, 5, Some(5)), PredicateRange::Empty);
    }

    #[test]
    fn test_not_equals_only_excludes_single_value_range() {
        let ne = range(PredicateCondition::NotEquals, 7, None);
        assert!(ne.excludes(&7, &7));
        assert!(!ne.excludes(&7, &8));
    }

    #[test]
    fn test_type_mismatch_is_unusable() {
        let result = PredicateRange::<i32>::from_condition(
            PredicateCondition::Equals,
            &Value::Int64(1),
            None,
        );
        assert!(result.is_none());

        let missing_upper = PredicateRange::<i32>::from_condition(
            PredicateCondition::BetweenInclusive,
            &Value::Int32(1),
            None,
        );
        assert!(missing_upper.is_none());
    }
}
