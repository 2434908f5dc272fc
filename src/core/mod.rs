pub mod error;
pub mod types;
pub mod value;

// 错误和结果类型
pub use error::{
    DBError, DBResult, OptimizeError, OptimizeResult, PlanError, PlanResult, StorageError,
    StorageResult,
};

// 核心数据类型
pub use value::*;

// 表达式系统类型
pub use types::expression::{ColumnRef, Expression};
pub use types::operators::PredicateCondition;
pub use types::{ChunkId, ColumnId, DataType};
