//! Moderation Command Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{AnalyzeBook, BookSource, InvalidateBookReport};
use crate::application::error::ApplicationError;
use crate::application::facade::ModerationFacade;
use crate::application::report_cache::ReportCache;
use crate::domain::moderation::{AnalysisResult, CachePayload};

// ============================================================================
// AnalyzeBook
// ============================================================================

/// 分析书籍响应
#[derive(Debug, Clone)]
pub struct AnalyzeBookResponse {
    pub payload: CachePayload,
    /// 仅在本次实际执行了分析时存在
    pub result: Option<AnalysisResult>,
    pub from_cache: bool,
}

/// AnalyzeBook Handler - 带缓存的分析
pub struct AnalyzeBookHandler {
    facade: Arc<ModerationFacade>,
    cache: ReportCache,
}

impl AnalyzeBookHandler {
    pub fn new(facade: Arc<ModerationFacade>, cache: ReportCache) -> Self {
        Self { facade, cache }
    }

    pub async fn handle(&self, command: AnalyzeBook) -> Result<AnalyzeBookResponse, ApplicationError> {
        if command.book_name.trim().is_empty() {
            return Err(ApplicationError::validation("book name cannot be empty"));
        }

        if !command.force {
            if let Some(payload) = self.cache.get(&command.book_name, &command.author).await? {
                tracing::debug!(
                    book_name = %command.book_name,
                    author = %command.author,
                    updated_at = payload.updated_at,
                    "Moderation report served from cache"
                );
                return Ok(AnalyzeBookResponse {
                    payload,
                    result: None,
                    from_cache: true,
                });
            }
        }

        // 分析是 CPU 密集的同步计算，放到阻塞线程池执行
        let facade = self.facade.clone();
        let source = command.source;
        let result = tokio::task::spawn_blocking(move || match source {
            BookSource::File(path) => facade.analyze_file(&path),
            BookSource::Text(text) => facade.analyze_text(&text),
            BookSource::Bytes(bytes) => facade.analyze_bytes(&bytes),
        })
        .await??;

        let payload = CachePayload::from_result(&result, Utc::now());
        self.cache
            .put(&command.book_name, &command.author, &payload)
            .await?;

        tracing::info!(
            book_name = %command.book_name,
            author = %command.author,
            chapters = result.total_chapters,
            flagged = result.flagged_chapters,
            total_score = result.total_score,
            "Book analyzed"
        );

        Ok(AnalyzeBookResponse {
            payload,
            result: Some(result),
            from_cache: false,
        })
    }
}

// ============================================================================
// InvalidateBookReport
// ============================================================================

/// InvalidateBookReport Handler
pub struct InvalidateBookReportHandler {
    cache: ReportCache,
}

impl InvalidateBookReportHandler {
    pub fn new(cache: ReportCache) -> Self {
        Self { cache }
    }

    pub async fn handle(&self, command: InvalidateBookReport) -> Result<(), ApplicationError> {
        self.cache.remove(&command.book_name, &command.author).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::moderation::{ModerationConfig, SeverityPatterns};
    use crate::infrastructure::memory::InMemoryReportStore;

    fn setup() -> (AnalyzeBookHandler, ReportCache) {
        let facade = ModerationFacade::new(ModerationConfig {
            patterns: SeverityPatterns {
                severe: vec!["murder".into()],
                ..SeverityPatterns::empty()
            },
            ..ModerationConfig::default()
        })
        .unwrap();
        let cache = ReportCache::new(Arc::new(InMemoryReportStore::new()));
        (AnalyzeBookHandler::new(Arc::new(facade), cache.clone()), cache)
    }

    fn command(text: &str, force: bool) -> AnalyzeBook {
        AnalyzeBook {
            book_name: "Dark Tales".into(),
            author: "Anon".into(),
            source: BookSource::Text(text.into()),
            force,
        }
    }

    #[tokio::test]
    async fn test_analyze_then_serve_from_cache() {
        let (handler, cache) = setup();
        let text = "Chapter 1\nmurder murder\nChapter 2\ncalm";

        let first = handler.handle(command(text, false)).await.unwrap();
        assert!(!first.from_cache);
        assert_eq!(first.payload.checked_chapters, 2);
        assert_eq!(first.payload.flagged_items.len(), 1);
        assert_eq!(first.payload.flagged_items[0].chapter_title, "Chapter 1");

        let stored = cache.get("Dark Tales", "Anon").await.unwrap();
        assert_eq!(stored, Some(first.payload.clone()));

        // 缓存命中时不会重新分析，即使内容不同
        let second = handler.handle(command("Chapter 1\ncalm", false)).await.unwrap();
        assert!(second.from_cache);
        assert!(second.result.is_none());
        assert_eq!(second.payload, first.payload);
    }

    #[tokio::test]
    async fn test_force_reanalyzes() {
        let (handler, _) = setup();
        handler
            .handle(command("Chapter 1\nmurder murder", false))
            .await
            .unwrap();

        let forced = handler.handle(command("Chapter 1\ncalm", true)).await.unwrap();
        assert!(!forced.from_cache);
        assert!(forced.payload.flagged_items.is_empty());
    }

    #[tokio::test]
    async fn test_blank_text_is_validation_error() {
        let (handler, cache) = setup();
        let result = handler.handle(command("   ", false)).await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert!(cache.get("Dark Tales", "Anon").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_analyze_raw_bytes() {
        let (handler, cache) = setup();
        let response = handler
            .handle(AnalyzeBook {
                book_name: "Dark Tales".into(),
                author: "Anon".into(),
                source: BookSource::Bytes(b"Chapter 1\nmurder \xFF murder\n".to_vec()),
                force: false,
            })
            .await
            .unwrap();

        assert_eq!(response.payload.flagged_items.len(), 1);
        assert_eq!(cache.get("Dark Tales", "Anon").await.unwrap(), Some(response.payload));
    }

    #[tokio::test]
    async fn test_invalidate() {
        let (handler, cache) = setup();
        handler
            .handle(command("Chapter 1\nmurder murder", false))
            .await
            .unwrap();

        InvalidateBookReportHandler::new(cache.clone())
            .handle(InvalidateBookReport {
                book_name: "Dark Tales".into(),
                author: "Anon".into(),
            })
            .await
            .unwrap();

        assert!(cache.get("Dark Tales", "Anon").await.unwrap().is_none());
    }
}
