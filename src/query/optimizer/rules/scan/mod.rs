//! 扫描优化规则
//!
//! - `chunk_pruning` - 数据块裁剪规则
//! - `predicate_chain` - 查找作用于扫描节点的谓词链
//! - `exclusion` - 根据裁剪统计信息计算可排除的数据块

pub mod chunk_pruning;
pub mod exclusion;
pub mod predicate_chain;

pub use chunk_pruning::{intersect_chunk_ids, ChunkPruningRule, PruningReport};
pub use exclusion::{ChunkPruningPass, PredicateExclusion, PruningPredicate};
pub use predicate_chain::{find_predicate_chains, PredicateChain};
