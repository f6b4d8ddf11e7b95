//! Report Cache - 按书籍身份缓存审核报告
//!
//! key 由书名 + 作者计算得到，值为 JSON 序列化的 [`CachePayload`]。
//! 不做过期处理，是否失效由调用方根据 updatedAt 判断。

use std::sync::Arc;

use crate::application::ports::{generate_cache_key, CacheError, KeyValueStorePort};
use crate::domain::moderation::CachePayload;

/// 审核报告缓存
#[derive(Clone)]
pub struct ReportCache {
    store: Arc<dyn KeyValueStorePort>,
}

impl ReportCache {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    /// 读取报告
    ///
    /// 无法解析的旧值视为未命中
    pub async fn get(&self, book_name: &str, author: &str) -> Result<Option<CachePayload>, CacheError> {
        let key = generate_cache_key(book_name, author);

        let Some(value) = self.store.get(&key).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<CachePayload>(&value) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) => {
                tracing::warn!(
                    cache_key = %key,
                    error = %e,
                    "Cached report could not be decoded, treating as miss"
                );
                Ok(None)
            }
        }
    }

    /// 写入（覆盖）报告
    pub async fn put(&self, book_name: &str, author: &str, payload: &CachePayload) -> Result<(), CacheError> {
        let key = generate_cache_key(book_name, author);
        let value = serde_json::to_string(payload)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;

        self.store.put(&key, value).await?;

        tracing::info!(
            cache_key = %key,
            book_name = %book_name,
            author = %author,
            flagged_items = payload.flagged_items.len(),
            "Moderation report cached"
        );
        Ok(())
    }

    /// 删除报告
    pub async fn remove(&self, book_name: &str, author: &str) -> Result<(), CacheError> {
        let key = generate_cache_key(book_name, author);
        self.store.remove(&key).await?;

        tracing::info!(cache_key = %key, book_name = %book_name, "Moderation report removed");
        Ok(())
    }

    /// 落盘（进程退出前调用）
    pub async fn flush(&self) -> Result<(), CacheError> {
        self.store.flush().await
    }
}
