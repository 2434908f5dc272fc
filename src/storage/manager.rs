//! 表管理器模块
//!
//! 按名称登记所有表，提供线程安全的访问

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{StorageError, StorageResult};
use crate::storage::table::Table;

/// 表管理器
#[derive(Debug, Default)]
pub struct StorageManager {
    /// 表（以表名为键）
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl StorageManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一张表，同名表已存在时报错
    pub fn add_table(&self, name: impl Into<String>, table: Table) -> StorageResult<Arc<Table>> {
        let name = name.into();
        let mut tables = self.tables.write();
        if tables.contains_key(&name) {
            return Err(StorageError::TableAlreadyExists(name));
        }

        let table = Arc::new(table);
        log::debug!("登记表 {}: {} 个数据块", name, table.chunk_count());
        tables.insert(name, Arc::clone(&table));
        Ok(table)
    }

    /// 获取表
    pub fn get_table(&self, name: &str) -> StorageResult<Arc<Table>> {
        self.tables
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::TableNotFound(name.to_string()))
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    /// 删除表
    pub fn drop_table(&self, name: &str) -> StorageResult<()> {
        self.tables
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StorageError::TableNotFound(name.to_string()))
    }

    /// 所有表名，按字典序排列
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }
}
