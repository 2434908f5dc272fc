//! 扫描谓词
//!
//! 把作用于某个存储表扫描节点的谓词表达式规约为
//! （列、比较条件、值、可选的第二个值）的形式。只有合取形式的列与标量比较可以规约，
//! 析取、取反以及引用其他节点的谓词无法规约。

use std::cmp::Ordering;
use std::fmt;

use crate::core::types::{ColumnId, PredicateCondition};
use crate::core::value::{lossless_cast, Value};
use crate::core::{ColumnRef, Expression};

use super::plan::NodeId;

/// 比较的另一侧
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateParameter {
    Value(Value),
    Column(ColumnId),
    Placeholder(u16),
}

impl PredicateParameter {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            PredicateParameter::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for PredicateParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateParameter::Value(value) => write!(f, "{}", value),
            PredicateParameter::Column(column_id) => write!(f, "列{}", column_id),
            PredicateParameter::Placeholder(id) => write!(f, "?{}", id),
        }
    }
}

/// 规约后的扫描谓词
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPredicate {
    pub column_id: ColumnId,
    pub condition: PredicateCondition,
    pub value: PredicateParameter,
    pub value2: Option<PredicateParameter>,
}

impl ScanPredicate {
    /// 把表达式规约为若干个扫描谓词，它们的合取与原表达式等价
    ///
    /// 无法规约时返回 `None`
    pub fn from_expression(expression: &Expression, scan: NodeId) -> Option<Vec<ScanPredicate>> {
        let mut predicates = Vec::new();
        collect(expression, scan, &mut predicates)?;
        Some(predicates)
    }

    /// 在单个值上求值
    ///
    /// 另一侧是列或占位符，或者值无法无损转换为列值的类型时无法判断，返回 `true`
    pub fn matches(&self, value: &Value) -> bool {
        let Some(data_type) = value.data_type() else {
            return false;
        };
        let Some(first) = self.value.as_value().and_then(|v| lossless_cast(v, data_type)) else {
            return true;
        };

        // NaN 与任何值都不相等，也没有大小关系
        if value.is_nan() {
            return self.condition == PredicateCondition::NotEquals;
        }

        if self.condition.is_between() {
            let Some(second) = self
                .value2
                .as_ref()
                .and_then(PredicateParameter::as_value)
                .and_then(|v| lossless_cast(v, data_type))
            else {
                return true;
            };
            let lower_ok = match value.partial_cmp(&first) {
                Some(Ordering::Greater) => true,
                Some(Ordering::Equal) => self.condition.is_lower_inclusive(),
                _ => false,
            };
            let upper_ok = match value.partial_cmp(&second) {
                Some(Ordering::Less) => true,
                Some(Ordering::Equal) => self.condition.is_upper_inclusive(),
                _ => false,
            };
            return lower_ok && upper_ok;
        }

        let Some(ordering) = value.partial_cmp(&first) else {
            return false;
        };
        match self.condition {
            PredicateCondition::Equals => ordering == Ordering::Equal,
            PredicateCondition::NotEquals => ordering != Ordering::Equal,
            PredicateCondition::LessThan => ordering == Ordering::Less,
            PredicateCondition::LessThanEquals => ordering != Ordering::Greater,
            PredicateCondition::GreaterThan => ordering == Ordering::Greater,
            PredicateCondition::GreaterThanEquals => ordering != Ordering::Less,
            _ => true,
        }
    }
}

impl fmt::Display for ScanPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "列{} {} {}", self.column_id, self.condition, self.value)?;
        if let Some(value2) = &self.value2 {
            write!(f, " AND {}", value2)?;
        }
        Ok(())
    }
}

fn collect(expression: &Expression, scan: NodeId, predicates: &mut Vec<ScanPredicate>) -> Option<()> {
    match expression {
        Expression::And(left, right) => {
            collect(left, scan, predicates)?;
            collect(right, scan, predicates)
        }
        Expression::Comparison {
            condition,
            left,
            right,
        } => {
            let predicate = match (scan_column(left, scan), scan_column(right, scan)) {
                (Some(column_id), _) => ScanPredicate {
                    column_id,
                    condition: *condition,
                    value: parameter(right, scan)?,
                    value2: None,
                },
                (None, Some(column_id)) => ScanPredicate {
                    column_id,
                    condition: condition.flip(),
                    value: parameter(left, scan)?,
                    value2: None,
                },
                (None, None) => return None,
            };
            predicates.push(predicate);
            Some(())
        }
        Expression::Between {
            condition,
            operand,
            lower,
            upper,
        } => {
            let column_id = scan_column(operand, scan)?;
            predicates.push(ScanPredicate {
                column_id,
                condition: *condition,
                value: parameter(lower, scan)?,
                value2: Some(parameter(upper, scan)?),
            });
            Some(())
        }
        _ => None,
    }
}

fn scan_column(expression: &Expression, scan: NodeId) -> Option<ColumnId> {
    match expression {
        Expression::Column(ColumnRef {
            original_node,
            column_id,
        }) if *original_node == scan => Some(*column_id),
        _ => None,
    }
}

fn parameter(expression: &Expression, scan: NodeId) -> Option<PredicateParameter> {
    match expression {
        Expression::Literal(Value::Null) => None,
        Expression::Literal(value) => Some(PredicateParameter::Value(value.clone())),
        Expression::Placeholder(id) => Some(PredicateParameter::Placeholder(*id)),
        _ => scan_column(expression, scan).map(PredicateParameter::Column),
    }
}
