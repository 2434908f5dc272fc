// 核心类型系统模块
//
// 包含列存储的核心类型定义，包括统一的数据类型、列/数据块标识、表达式和谓词条件

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod expression;
pub mod operators;

/// 统一的列数据类型枚举
///
/// 存储引擎支持的列类型是固定的封闭集合，统计信息对象按此集合静态分发
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Int32,
    Int64,
    Float,
    Double,
    String,
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int32 => "int",
            DataType::Int64 => "long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 列标识（表定义中的列下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnId(pub u16);

impl ColumnId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 数据块标识（表内数据块的顺序下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkId(pub u32);

impl ChunkId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 重新导出常用类型
pub use expression::{ColumnRef, Expression};
pub use operators::PredicateCondition;
