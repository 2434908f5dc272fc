//! 表达式定义
//!
//! 逻辑计划中谓词、投影等节点使用的表达式树。列引用记录其最初定义所在的
//! 计划节点，从而可以判断一个谓词是否完全作用于某个存储表扫描节点。

use crate::core::types::operators::PredicateCondition;
use crate::core::types::ColumnId;
use crate::core::value::Value;
use crate::query::planner::plan::NodeId;

/// 列引用
///
/// `original_node` 是定义该列的节点（通常是存储表扫描节点），`column_id`
/// 是该列在完整表定义中的下标，不受列裁剪影响
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub original_node: NodeId,
    pub column_id: ColumnId,
}

impl ColumnRef {
    pub fn new(original_node: NodeId, column_id: ColumnId) -> Self {
        Self {
            original_node,
            column_id,
        }
    }
}

/// 表达式
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Column(ColumnRef),
    Literal(Value),
    /// 预编译语句中的占位符，值在优化阶段未知
    Placeholder(u16),
    Comparison {
        condition: PredicateCondition,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Between {
        condition: PredicateCondition,
        operand: Box<Expression>,
        lower: Box<Expression>,
        upper: Box<Expression>,
    },
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
}

impl Expression {
    pub fn column(original_node: NodeId, column_id: u16) -> Self {
        Expression::Column(ColumnRef::new(original_node, ColumnId(column_id)))
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    pub fn comparison(condition: PredicateCondition, left: Expression, right: Expression) -> Self {
        debug_assert!(!condition.is_between(), "区间条件应使用 Expression::between 构造");
        Expression::Comparison {
            condition,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn between(
        condition: PredicateCondition,
        operand: Expression,
        lower: Expression,
        upper: Expression,
    ) -> Self {
        debug_assert!(condition.is_between(), "Expression::between 需要区间条件");
        Expression::Between {
            condition,
            operand: Box::new(operand),
            lower: Box::new(lower),
            upper: Box::new(upper),
        }
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::Or(Box::new(left), Box::new(right))
    }

    pub fn not(inner: Expression) -> Self {
        Expression::Not(Box::new(inner))
    }

    /// 访问表达式中的所有列引用
    pub fn visit_column_refs<F>(&self, visitor: &mut F)
    where
        F: FnMut(&ColumnRef),
    {
        match self {
            Expression::Column(column) => visitor(column),
            Expression::Literal(_) | Expression::Placeholder(_) => {}
            Expression::Comparison { left, right, .. } => {
                left.visit_column_refs(visitor);
                right.visit_column_refs(visitor);
            }
            Expression::Between {
                operand,
                lower,
                upper,
                ..
            } => {
                operand.visit_column_refs(visitor);
                lower.visit_column_refs(visitor);
                upper.visit_column_refs(visitor);
            }
            Expression::And(left, right) | Expression::Or(left, right) => {
                left.visit_column_refs(visitor);
                right.visit_column_refs(visitor);
            }
            Expression::Not(inner) => inner.visit_column_refs(visitor),
        }
    }

    /// 收集表达式中的所有列引用
    pub fn column_refs(&self) -> Vec<ColumnRef> {
        let mut columns = Vec::new();
        self.visit_column_refs(&mut |column| columns.push(*column));
        columns
    }
}
