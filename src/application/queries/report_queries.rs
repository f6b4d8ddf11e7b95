//! Report Queries

/// 查询书籍审核报告
#[derive(Debug, Clone)]
pub struct GetBookReport {
    pub book_name: String,
    pub author: String,
}
