//! Moderation Commands

use std::path::PathBuf;

/// 待分析内容来源
#[derive(Debug, Clone)]
pub enum BookSource {
    /// 本地文件（按配置的字符集解码）
    File(PathBuf),
    /// 已解码文本
    Text(String),
    /// 原始字节（按配置的字符集解码）
    Bytes(Vec<u8>),
}

/// 分析书籍命令
///
/// 默认先查缓存，命中则直接返回；force 为 true 时忽略缓存重新分析
#[derive(Debug, Clone)]
pub struct AnalyzeBook {
    pub book_name: String,
    pub author: String,
    pub source: BookSource,
    pub force: bool,
}

/// 删除书籍审核报告命令
#[derive(Debug, Clone)]
pub struct InvalidateBookReport {
    pub book_name: String,
    pub author: String,
}
