//! Key-Value Store Port - 审核报告缓存存储
//!
//! 只暴露按 key 读写删三个操作，具体实现可以是 Sled、内存或远程存储

use async_trait::async_trait;
use thiserror::Error;

/// 身份字段之间的分隔符（ASCII Unit Separator，不会出现在书名/作者中）
const IDENTITY_SEPARATOR: char = '\u{1F}';

/// Key-Value Store 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Key-Value Store Port
///
/// 同一 key 的并发写入以最后一次为准，不需要额外加锁
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// 读取 key 对应的值
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// 写入（覆盖）key 对应的值
    async fn put(&self, key: &str, value: String) -> Result<(), CacheError>;

    /// 删除 key，不存在时不报错
    async fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// 将缓冲的写入落盘；纯内存实现无需处理
    async fn flush(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

/// 生成缓存 key
///
/// 使用 md5(book_name + 分隔符 + author) 的十六进制小写形式，
/// 进程重启后同一身份始终映射到同一个 key
pub fn generate_cache_key(book_name: &str, author: &str) -> String {
    let identity = format!("{}{}{}", book_name, IDENTITY_SEPARATOR, author);
    let digest = md5::compute(identity.as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_stable() {
        let a = generate_cache_key("斗破苍穹", "天蚕土豆");
        let b = generate_cache_key("斗破苍穹", "天蚕土豆");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_cache_key_distinguishes_identity_boundary() {
        assert_ne!(generate_cache_key("ab", "c"), generate_cache_key("a", "bc"));
        assert_ne!(generate_cache_key("book", "one"), generate_cache_key("book", "two"));
    }

    #[test]
    fn test_cache_key_known_value() {
        let expected = format!("{:x}", md5::compute("book\u{1F}author".as_bytes()));
        assert_eq!(generate_cache_key("book", "author"), expected);
    }
}
