//! 列类型映射
//!
//! 将封闭的 `DataType` 集合映射到具体的 Rust 标量类型，统计信息对象以此为泛型参数

use std::fmt::Debug;

use crate::core::types::DataType;
use crate::core::value::Value;

/// 可以存入列的标量类型
pub trait ColumnDataType: Clone + PartialOrd + Debug + Send + Sync + 'static {
    const DATA_TYPE: DataType;

    /// 从同类型的值中取出标量，类型不符、`Null` 或 NaN 时返回 `None`
    fn from_value(value: &Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

/// 算术类型，只有算术类型才会生成范围过滤器
pub trait ArithmeticType: ColumnDataType + Copy {
    /// 两个值之间的距离，用于在构建范围过滤器时寻找最大的空隙
    fn distance(low: Self, high: Self) -> f64;
}

impl ColumnDataType for i32 {
    const DATA_TYPE: DataType = DataType::Int32;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Int32(self)
    }
}

impl ColumnDataType for i64 {
    const DATA_TYPE: DataType = DataType::Int64;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Int64(self)
    }
}

impl ColumnDataType for f32 {
    const DATA_TYPE: DataType = DataType::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl ColumnDataType for f64 {
    const DATA_TYPE: DataType = DataType::Double;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Double(self)
    }
}

impl ColumnDataType for String {
    const DATA_TYPE: DataType = DataType::String;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl ArithmeticType for i32 {
    fn distance(low: Self, high: Self) -> f64 {
        f64::from(high) - f64::from(low)
    }
}

impl ArithmeticType for i64 {
    fn distance(low: Self, high: Self) -> f64 {
        high as f64 - low as f64
    }
}

impl ArithmeticType for f32 {
    fn distance(low: Self, high: Self) -> f64 {
        f64::from(high) - f64::from(low)
    }
}

impl ArithmeticType for f64 {
    fn distance(low: Self, high: Self) -> f64 {
        high - low
    }
}

/// 从一组值中取出指定类型的非空标量
pub fn typed_values<T: ColumnDataType>(values: &[Value]) -> Vec<T> {
    values.iter().filter_map(T::from_value).collect()
}

/// 排序标量，调用方保证不含 NaN
pub fn sort_values<T: ColumnDataType>(values: &mut [T]) {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
}
