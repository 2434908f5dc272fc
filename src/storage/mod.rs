//! 存储模块
//!
//! 按数据块组织的列存储表，以及数据块定型时采集的裁剪统计信息
//!
//! ## 模块结构
//!
//! - `chunk` - 数据块与列段
//! - `table` - 表定义与数据块序列
//! - `manager` - 表管理器，按名称查找表
//! - `statistics` - 过滤器、直方图与表统计信息

pub mod chunk;
pub mod manager;
pub mod statistics;
pub mod table;

pub use chunk::{Chunk, Segment};
pub use manager::StorageManager;
pub use statistics::{ColumnStatistics, TableStatistics};
pub use table::{ColumnDefinition, Table};

pub use crate::core::StorageError;
