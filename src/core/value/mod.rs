//! Value 模块 - 列存储值类型系统
//!
//! 此模块提供了存储引擎中的标量值类型，包括：
//! - 核心类型定义 (`types.rs`)
//! - 比较逻辑 (`comparison.rs`)
//! - 类型转换与无损转换 (`conversion.rs`)

pub mod comparison;
pub mod conversion;
pub mod types;

// 重新导出所有公共类型和功能
pub use conversion::lossless_cast;
pub use types::*;
