//! 统计信息模块
//!
//! 提供数据块裁剪与代价估算所需的统计信息对象
//!
//! ## 模块结构
//!
//! - `column_type` - 列类型到 Rust 标量类型的静态映射
//! - `predicate_range` - 谓词条件对应的取值范围
//! - `min_max_filter` - 最小/最大值过滤器
//! - `range_filter` - 多区间范围过滤器（仅算术类型）
//! - `histogram` - 等高直方图
//! - `attribute_statistics` - 单列统计信息
//! - `column_statistics` - 按列类型分发的单列统计信息
//! - `table_statistics` - 表级统计信息

pub mod attribute_statistics;
pub mod column_statistics;
pub mod column_type;
pub mod histogram;
pub mod min_max_filter;
pub mod predicate_range;
pub mod range_filter;
pub mod table_statistics;

pub use attribute_statistics::AttributeStatistics;
pub use column_statistics::ColumnStatistics;
pub use column_type::{ArithmeticType, ColumnDataType};
pub use histogram::{Histogram, HistogramBin};
pub use min_max_filter::MinMaxFilter;
pub use range_filter::RangeFilter;
pub use table_statistics::TableStatistics;
