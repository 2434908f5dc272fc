//! 优化规则模块
//!
//! ## 扫描优化规则 (scan)
//! - `ChunkPruningRule` - 根据数据块统计信息裁剪不可能包含匹配行的数据块

pub mod scan;

pub use scan::*;
