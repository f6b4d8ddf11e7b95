//! Moderation Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("无效的输入: {0}")]
    InvalidInput(String),

    #[error("文件读取错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("无效的正则表达式 `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("不支持的字符集: {0}")]
    UnsupportedCharset(String),
}

impl ModerationError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
