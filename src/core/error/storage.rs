//! 存储层错误类型
//!
//! 涵盖表、数据块的创建与查找相关的错误

use thiserror::Error;

use crate::core::types::DataType;

/// 存储层结果类型
pub type StorageResult<T> = Result<T, StorageError>;

/// 存储层错误类型
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    #[error("表未找到: {0}")]
    TableNotFound(String),
    #[error("表已存在: {0}")]
    TableAlreadyExists(String),
    #[error("列数量不匹配: 期望 {expected}, 实际 {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },
    #[error("列 {column} 类型不匹配: 期望 {expected}")]
    ColumnTypeMismatch { column: String, expected: DataType },
    #[error("数据块行数不一致: {0}")]
    RowCountMismatch(String),
    #[error("无效输入: {0}")]
    InvalidInput(String),
}

impl From<String> for StorageError {
    fn from(s: String) -> Self {
        StorageError::InvalidInput(s)
    }
}

impl From<&str> for StorageError {
    fn from(s: &str) -> Self {
        StorageError::InvalidInput(s.to_string())
    }
}
