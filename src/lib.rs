//! chunkprune - 基于统计信息的数据块裁剪
//!
//! 本 crate 实现查询优化器中的数据块裁剪规则：根据每个数据块的列统计信息，
//! 证明某个数据块不可能包含满足扫描之上谓词链的任何行，从而在执行前将其排除。

pub mod config;
pub mod core;
pub mod query;
pub mod storage;
pub mod utils;
