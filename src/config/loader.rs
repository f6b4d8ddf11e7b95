//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（moderation.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::moderation::ModerationPolicy;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["moderation", "moderation.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `NOVEL_MOD_`，层级分隔符 `__`）
/// 2. 配置文件（moderation.toml 或 moderation.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `NOVEL_MOD_MODERATION__LINE_SCORE_THRESHOLD=3.0`
/// - `NOVEL_MOD_MODERATION__TARGET_CHARSET=GBK`
/// - `NOVEL_MOD_CACHE__DB_PATH=/data/moderation.sled`
/// - `NOVEL_MOD_LOG__LEVEL=debug`
///
/// 正则列表只能通过配置文件设置
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 标量默认值（最低优先级），列表默认值由 serde 提供
    builder = builder
        .set_default("moderation.line_score_threshold", 2.0)?
        .set_default("moderation.chapter_score_threshold", 3.5)?
        .set_default("moderation.fallback_chunk_size", 200)?
        .set_default("moderation.min_chapter_count", 5)?
        .set_default("moderation.fallback_min_characters", 100_000)?
        .set_default("moderation.target_charset", "UTF-8")?
        .set_default("moderation.summary_max_length", 200)?
        .set_default("moderation.heading_max_chars", 50)?
        .set_default("cache.enabled", true)?
        .set_default("cache.db_path", "data/moderation.sled")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    builder = builder.add_source(
        Environment::with_prefix("NOVEL_MOD")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
///
/// 审核参数（阈值、分块大小、字符集、正则）的校验与构建审核策略共用同一套规则
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    ModerationPolicy::new(config.moderation.clone())
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if config.cache.enabled && config.cache.db_path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Cache db_path cannot be empty when cache is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    let moderation = &config.moderation;
    tracing::info!("=== Moderation Configuration ===");
    tracing::info!("Line Score Threshold: {}", moderation.line_score_threshold);
    tracing::info!("Chapter Score Threshold: {}", moderation.chapter_score_threshold);
    tracing::info!(
        "Fallback: chunk={} lines, min_chapters={}, min_characters={}",
        moderation.fallback_chunk_size,
        moderation.min_chapter_count,
        moderation.fallback_min_characters
    );
    tracing::info!("Target Charset: {}", moderation.target_charset);
    tracing::info!("Ad Patterns: {}", moderation.ad_patterns.len());
    tracing::info!("Severity Patterns: {}", moderation.patterns.len());
    tracing::info!("Cache Enabled: {}", config.cache.enabled);
    if config.cache.enabled {
        tracing::info!("Cache Path: {}", config.cache.db_path);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("================================");
}
