//! Query Handlers 实现

mod report_handlers;

pub use report_handlers::*;
