//! Sled 嵌入式存储

mod report_store;

pub use report_store::{SledReportStore, SledStoreConfig};
