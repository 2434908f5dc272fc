use super::types::Value;
use crate::core::types::DataType;

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

/// f32 可以精确表示的最大整数
const FLOAT_EXACT_INTEGER_LIMIT: u64 = 1 << 24;
/// f64 可以精确表示的最大整数
const DOUBLE_EXACT_INTEGER_LIMIT: u64 = 1 << 53;

/// 将值无损转换为目标类型
///
/// 只有当转换不会造成截断、舍入或溢出时才返回 `Some`。`Null`、NaN
/// 以及字符串与数值之间的转换均返回 `None`。
pub fn lossless_cast(value: &Value, target: DataType) -> Option<Value> {
    match (value, target) {
        (Value::Null, _) => None,

        (Value::Int32(v), DataType::Int32) => Some(Value::Int32(*v)),
        (Value::Int32(v), DataType::Int64) => Some(Value::Int64(i64::from(*v))),
        (Value::Int32(v), DataType::Float) => {
            (u64::from(v.unsigned_abs()) <= FLOAT_EXACT_INTEGER_LIMIT).then(|| Value::Float(*v as f32))
        }
        (Value::Int32(v), DataType::Double) => Some(Value::Double(f64::from(*v))),

        (Value::Int64(v), DataType::Int32) => i32::try_from(*v).ok().map(Value::Int32),
        (Value::Int64(v), DataType::Int64) => Some(Value::Int64(*v)),
        (Value::Int64(v), DataType::Float) => {
            (v.unsigned_abs() <= FLOAT_EXACT_INTEGER_LIMIT).then(|| Value::Float(*v as f32))
        }
        (Value::Int64(v), DataType::Double) => {
            (v.unsigned_abs() <= DOUBLE_EXACT_INTEGER_LIMIT).then(|| Value::Double(*v as f64))
        }

        (Value::Float(v), target) => cast_floating(f64::from(*v), target),
        (Value::Double(v), target) => cast_floating(*v, target),

        (Value::String(s), DataType::String) => Some(Value::String(s.clone())),
        _ => None,
    }
}

fn cast_floating(value: f64, target: DataType) -> Option<Value> {
    if value.is_nan() {
        return None;
    }

    match target {
        DataType::Double => Some(Value::Double(value)),
        DataType::Float => {
            let narrowed = value as f32;
            (f64::from(narrowed) == value).then_some(Value::Float(narrowed))
        }
        DataType::Int32 => {
            let integral = value.fract() == 0.0
                && value >= f64::from(i32::MIN)
                && value <= f64::from(i32::MAX);
            integral.then(|| Value::Int32(value as i32))
        }
        DataType::Int64 => {
            // 2^63 本身已超出 i64 范围
            let integral = value.fract() == 0.0 && value >= -(2f64.powi(63)) && value < 2f64.powi(63);
            integral.then(|| Value::Int64(value as i64))
        }
        DataType::String => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widening_and_narrowing() {
        assert_eq!(lossless_cast(&Value::Int32(7), DataType::Int64), Some(Value::Int64(7)));
        assert_eq!(lossless_cast(&Value::Int64(7), DataType::Int32), Some(Value::Int32(7)));
        assert_eq!(lossless_cast(&Value::Int64(i64::from(i32::MAX) + 1), DataType::Int32), None);
    }

    #[test]
    fn test_integer_to_floating() {
        assert_eq!(lossless_cast(&Value::Int32(1 << 24), DataType::Float), Some(Value::Float(16_777_216.0)));
        assert_eq!(lossless_cast(&Value::Int32((1 << 24) + 1), DataType::Float), None);
        assert_eq!(lossless_cast(&Value::Int64((1 << 53) + 1), DataType::Double), None);
        assert_eq!(lossless_cast(&Value::Int32(-3), DataType::Double), Some(Value::Double(-3.0)));
    }

    #[test]
    fn test_floating_to_integer() {
        assert_eq!(lossless_cast(&Value::Double(42.0), DataType::Int32), Some(Value::Int32(42)));
        assert_eq!(lossless_cast(&Value::Double(42.5), DataType::Int32), None);
        assert_eq!(lossless_cast(&Value::Float(1e20), DataType::Int32), None);
        assert_eq!(lossless_cast(&Value::Double(f64::INFINITY), DataType::Int64), None);
    }

    #[test]
    fn test_double_to_float_requires_exact_round_trip() {
        assert_eq!(lossless_cast(&Value::Double(0.5), DataType::Float), Some(Value::Float(0.5)));
        assert_eq!(lossless_cast(&Value::Double(0.1), DataType::Float), None, "0.1 无法被 f32 精确表示");
        assert_eq!(lossless_cast(&Value::Double(f64::NAN), DataType::Double), None);
    }

    #[test]
    fn test_string_and_null() {
        assert_eq!(lossless_cast(&Value::from("x"), DataType::String), Some(Value::from("x")));
        assert_eq!(lossless_cast(&Value::from("1"), DataType::Int32), None);
        assert_eq!(lossless_cast(&Value::Int32(1), DataType::String), None);
        assert_eq!(lossless_cast(&Value::Null, DataType::Int32), None);
    }
}
