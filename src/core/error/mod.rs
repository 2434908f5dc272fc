//! 统一错误处理系统
//!
//! ## 设计理念
//!
//! 1. **按层划分**：存储层、计划层、优化器各自定义错误枚举
//! 2. **不可用即跳过**：无法用于裁剪的谓词、有损类型转换、缺失的统计信息都不是错误，
//!    在控制流中以 `None` 或空集合表达，永远不会上升为错误
//! 3. **统一接口**：`DBResult<T>` 提供统一的返回类型，简化错误传播

use thiserror::Error;

// 子模块
pub mod optimize;
pub mod plan;
pub mod storage;

// 重新导出所有错误类型
pub use optimize::{OptimizeError, OptimizeResult};
pub use plan::{PlanError, PlanResult};
pub use storage::{StorageError, StorageResult};

/// 统一的数据库错误类型
#[derive(Error, Debug, Clone)]
pub enum DBError {
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    #[error("计划错误: {0}")]
    Plan(#[from] PlanError),

    #[error("优化错误: {0}")]
    Optimize(#[from] OptimizeError),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 统一的结果类型
pub type DBResult<T> = Result<T, DBError>;

impl From<toml::de::Error> for DBError {
    fn from(err: toml::de::Error) -> Self {
        DBError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DBError {
    fn from(err: toml::ser::Error) -> Self {
        DBError::Config(err.to_string())
    }
}

impl From<std::io::Error> for DBError {
    fn from(err: std::io::Error) -> Self {
        DBError::Internal(err.to_string())
    }
}
