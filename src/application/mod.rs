//! 应用层 - 用例编排
//!
//! 包含：
//! - facade: 审核门面（文件 / 文本分析）
//! - ports: 六边形架构端口定义（KeyValueStorePort）
//! - report_cache: 审核报告缓存
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod facade;
pub mod ports;
pub mod queries;
pub mod report_cache;

// Re-exports
pub use commands::{
    AnalyzeBook,
    BookSource,
    InvalidateBookReport,
    // Handlers
    handlers::{AnalyzeBookHandler, AnalyzeBookResponse, InvalidateBookReportHandler},
};

pub use error::ApplicationError;
pub use facade::ModerationFacade;

pub use ports::{generate_cache_key, CacheError, KeyValueStorePort};

pub use queries::{handlers::GetBookReportHandler, GetBookReport};

pub use report_cache::ReportCache;
