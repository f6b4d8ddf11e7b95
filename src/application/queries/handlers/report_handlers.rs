//! Report Query Handlers

use crate::application::error::ApplicationError;
use crate::application::queries::GetBookReport;
use crate::application::report_cache::ReportCache;
use crate::domain::moderation::CachePayload;

/// GetBookReport Handler
pub struct GetBookReportHandler {
    cache: ReportCache,
}

impl GetBookReportHandler {
    pub fn new(cache: ReportCache) -> Self {
        Self { cache }
    }

    pub async fn handle(&self, query: GetBookReport) -> Result<Option<CachePayload>, ApplicationError> {
        Ok(self.cache.get(&query.book_name, &query.author).await?)
    }
}
