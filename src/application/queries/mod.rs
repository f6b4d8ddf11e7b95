//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：读取缓存报告

mod report_queries;

pub mod handlers;

pub use report_queries::*;
