//! Memory Layer - In-Memory State Management
//!
//! 内存版报告存储，用于禁用持久化缓存的场景和测试

mod report_store;

pub use report_store::InMemoryReportStore;
