//! In-Memory Report Store Implementation

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{CacheError, KeyValueStorePort};

/// 内存报告存储（进程退出即丢失）
pub struct InMemoryReportStore {
    entries: DashMap<String, String>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryReportStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStorePort for InMemoryReportStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: String) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value);
        tracing::debug!(key = %key, "Report stored in memory");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}
