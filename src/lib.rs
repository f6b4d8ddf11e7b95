//! Novel Moderation - 小说内容审核引擎
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Moderation Context: 严重等级、审核策略、章节与分析结果
//! - 文本读取 → 章节切分 → 内容分析 流水线
//!
//! 应用层 (application/):
//! - Facade: 单次调用的审核入口
//! - Ports: KeyValueStorePort
//! - ReportCache: 按书名 + 作者缓存审核报告
//! - Commands / Queries: 带缓存的分析、报告查询与删除
//!
//! 基础设施层 (infrastructure/):
//! - Persistence: Sled 报告存储
//! - Memory: 内存报告存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::ModerationFacade;
pub use config::{load_config, AppConfig};
pub use domain::moderation::{AnalysisResult, ModerationConfig, ModerationError, SeverityLevel};
