//! Sled-based Report Store Implementation

use async_trait::async_trait;
use sled::Db;

use crate::application::ports::{CacheError, KeyValueStorePort};

/// 所有报告 key 的前缀
const KEY_PREFIX: &str = "report:";

/// Sled 存储配置
#[derive(Debug, Clone)]
pub struct SledStoreConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledStoreConfig {
    fn default() -> Self {
        Self {
            db_path: "data/moderation.sled".to_string(),
        }
    }
}

/// Sled 报告存储
pub struct SledReportStore {
    db: Db,
}

impl SledReportStore {
    /// 创建新的存储实例
    pub fn new(config: &SledStoreConfig) -> Result<Self, CacheError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| CacheError::DatabaseError(e.to_string()))?;

        tracing::info!(
            db_path = %config.db_path,
            entries = db.scan_prefix(KEY_PREFIX).count(),
            "SledReportStore initialized"
        );

        Ok(Self { db })
    }

    fn storage_key(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }
}

#[async_trait]
impl KeyValueStorePort for SledReportStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self.db.get(Self::storage_key(key)) {
            Ok(Some(data)) => {
                let value = String::from_utf8(data.to_vec())
                    .map_err(|e| CacheError::SerializationError(e.to_string()))?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(CacheError::DatabaseError(e.to_string())),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<(), CacheError> {
        self.db
            .insert(Self::storage_key(key), value.as_bytes())
            .map_err(|e| CacheError::DatabaseError(e.to_string()))?;

        tracing::debug!(key = %key, size_bytes = value.len(), "Report stored");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.db
            .remove(Self::storage_key(key))
            .map_err(|e| CacheError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn flush(&self) -> Result<(), CacheError> {
        let bytes = self
            .db
            .flush_async()
            .await
            .map_err(|e| CacheError::DatabaseError(e.to_string()))?;

        tracing::debug!(bytes, "Report store flushed");
        Ok(())
    }
}
