//! Configuration Types
//!
//! 定义所有配置结构体

use serde::{Deserialize, Serialize};

use crate::domain::moderation::ModerationConfig;

/// 应用主配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 审核配置
    #[serde(default)]
    pub moderation: ModerationConfig,

    /// 报告缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 报告缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 是否启用持久化缓存（关闭时使用进程内缓存）
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Sled 数据库路径
    #[serde(default = "default_cache_db_path")]
    pub db_path: String,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_db_path() -> String {
    "data/moderation.sled".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            db_path: default_cache_db_path(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
