//! 谓词条件定义
//!
//! 定义列与标量比较时使用的谓词条件，供扫描谓词规范化与统计信息过滤共同使用

use serde::{Deserialize, Serialize};
use std::fmt;

/// 谓词条件
///
/// `Between*` 系列条件需要两个比较值，其余条件只需要一个
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateCondition {
    Equals,
    NotEquals,
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
    /// lower <= x <= upper
    BetweenInclusive,
    /// lower < x <= upper
    BetweenLowerExclusive,
    /// lower <= x < upper
    BetweenUpperExclusive,
    /// lower < x < upper
    BetweenExclusive,
}

impl PredicateCondition {
    /// 获取条件的名称
    pub fn name(&self) -> &'static str {
        match self {
            PredicateCondition::Equals => "=",
            PredicateCondition::NotEquals => "!=",
            PredicateCondition::LessThan => "<",
            PredicateCondition::LessThanEquals => "<=",
            PredicateCondition::GreaterThan => ">",
            PredicateCondition::GreaterThanEquals => ">=",
            PredicateCondition::BetweenInclusive => "BETWEEN INCLUSIVE",
            PredicateCondition::BetweenLowerExclusive => "BETWEEN LOWER EXCLUSIVE",
            PredicateCondition::BetweenUpperExclusive => "BETWEEN UPPER EXCLUSIVE",
            PredicateCondition::BetweenExclusive => "BETWEEN EXCLUSIVE",
        }
    }

    /// 是否为区间条件
    pub fn is_between(&self) -> bool {
        matches!(
            self,
            PredicateCondition::BetweenInclusive
                | PredicateCondition::BetweenLowerExclusive
                | PredicateCondition::BetweenUpperExclusive
                | PredicateCondition::BetweenExclusive
        )
    }

    /// 交换左右操作数后的等价条件
    ///
    /// `5 < a` 等价于 `a > 5`；区间条件没有左右之分，原样返回
    pub fn flip(&self) -> Self {
        match self {
            PredicateCondition::LessThan => PredicateCondition::GreaterThan,
            PredicateCondition::LessThanEquals => PredicateCondition::GreaterThanEquals,
            PredicateCondition::GreaterThan => PredicateCondition::LessThan,
            PredicateCondition::GreaterThanEquals => PredicateCondition::LessThanEquals,
            other => *other,
        }
    }

    /// 区间条件的下界是否闭合
    pub fn is_lower_inclusive(&self) -> bool {
        matches!(
            self,
            PredicateCondition::BetweenInclusive | PredicateCondition::BetweenUpperExclusive
        )
    }

    /// 区间条件的上界是否闭合
    pub fn is_upper_inclusive(&self) -> bool {
        matches!(
            self,
            PredicateCondition::BetweenInclusive | PredicateCondition::BetweenLowerExclusive
        )
    }
}

impl fmt::Display for PredicateCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
