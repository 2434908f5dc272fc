use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::DBResult;

/// 日志配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "chunkprune".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            max_files: 5,
        }
    }
}

/// 优化器配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct OptimizerConfig {
    /// 是否启用数据块裁剪规则
    pub enable_chunk_pruning: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enable_chunk_pruning: true,
        }
    }
}

/// 存储配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// 每个数据块的目标行数
    pub target_chunk_size: usize,
    /// 数据块定型时范围过滤器的最大区间数
    pub max_range_filter_ranges: usize,
    /// 生成表统计信息时直方图的桶数
    pub histogram_bin_count: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            target_chunk_size: 65_535,
            max_range_filter_ranges: 10,
            histogram_bin_count: 20,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub optimizer: OptimizerConfig,
    pub storage: StorageConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> DBResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> DBResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.optimizer.enable_chunk_pruning);
        assert_eq!(config.storage.target_chunk_size, 65_535);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_config_load_save() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temporary file");

        let mut config = Config::default();
        config.storage.max_range_filter_ranges = 4;
        let toml_content =
            toml::to_string_pretty(&config).expect("Failed to serialize config to TOML");
        temp_file
            .write_all(toml_content.as_bytes())
            .expect("Failed to write TOML content to temporary file");

        let loaded_config =
            Config::load(temp_file.path()).expect("Failed to load config from temporary file");
        assert_eq!(loaded_config.storage.max_range_filter_ranges, 4);
        assert_eq!(config.log.file, loaded_config.log.file);
    }

    #[test]
    fn test_config_partial_sections() {
        let config: Config = toml::from_str("[optimizer]\nenable_chunk_pruning = false\n")
            .expect("Failed to parse partial config");
        assert!(!config.optimizer.enable_chunk_pruning);
        assert_eq!(config.storage.histogram_bin_count, 20, "缺失的配置段应使用默认值");
    }
}
