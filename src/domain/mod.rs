//! Domain Layer - 领域层
//!
//! 限界上下文:
//! - Moderation Context: 内容审核（严重等级、审核策略、分析结果）
//!
//! 分析流水线（纯同步计算，无共享可变状态）:
//! 原始输入 → 文本读取 → 章节切分 → 内容分析 → 汇总结果

pub mod moderation;

mod chapter_splitter;
mod content_analyzer;
mod text_reader;

pub use chapter_splitter::{ChapterSplitter, DocumentSurvey};
pub use content_analyzer::ContentAnalyzer;
pub use text_reader::{DecodedLines, Lines, TextReader, TextSource};

