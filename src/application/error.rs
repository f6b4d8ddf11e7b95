//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::CacheError;
use crate::domain::moderation::ModerationError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 输入无效（文件不存在、非普通文件、空文本等）
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 读取失败
    #[error("IO error: {0}")]
    IoError(String),

    /// 审核配置错误（正则、字符集）
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 缓存存储错误
    #[error("Cache error: {0}")]
    CacheError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<ModerationError> for ApplicationError {
    fn from(err: ModerationError) -> Self {
        match err {
            ModerationError::InvalidInput(message) => Self::ValidationError(message),
            ModerationError::Io(e) => Self::IoError(e.to_string()),
            other @ (ModerationError::InvalidPattern { .. }
            | ModerationError::UnsupportedCharset(_)) => Self::ConfigurationError(other.to_string()),
        }
    }
}

impl From<CacheError> for ApplicationError {
    fn from(err: CacheError) -> Self {
        Self::CacheError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApplicationError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("analysis task failed: {}", err))
    }
}
