//! Moderation Context - 内容审核限界上下文
//!
//! 职责:
//! - 严重等级与权重
//! - 审核配置及预编译策略
//! - 章节、章节分析、整本分析结果
//! - 缓存报告

mod entities;
mod errors;
mod policy;
mod report;
mod severity;
mod value_objects;

pub use entities::{AnalysisResult, Chapter, ChapterAnalysis, SplitOutcome, SplitStrategy};
pub use errors::ModerationError;
pub use policy::{ModerationPolicy, SeverityPattern};
pub use report::{CachePayload, FlaggedItem};
pub use severity::SeverityLevel;
pub use value_objects::{ModerationConfig, SeverityPatterns};
