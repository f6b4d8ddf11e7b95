//! Moderation Context - 缓存报告
//!
//! 缓存中保存的是精简报告而不是完整分析结果

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AnalysisResult;

/// 被标记章节条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedItem {
    pub chapter_index: usize,
    pub chapter_title: String,
    pub score: f64,
    pub flagged_lines_count: usize,
}

/// 缓存报告
///
/// 线格式（JSON）:
/// `{checkedChapters, skippedChapters, flaggedItems: [...], updatedAt}`，
/// updatedAt 为毫秒时间戳
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachePayload {
    pub checked_chapters: usize,
    pub skipped_chapters: usize,
    pub flagged_items: Vec<FlaggedItem>,
    pub updated_at: i64,
}

impl CachePayload {
    /// 从分析结果生成报告
    pub fn from_result(result: &AnalysisResult, updated_at: DateTime<Utc>) -> Self {
        let flagged_items = result
            .details
            .iter()
            .map(|analysis| FlaggedItem {
                chapter_index: analysis.index,
                chapter_title: analysis.title.clone(),
                score: analysis.score,
                flagged_lines_count: analysis.flagged_lines.len(),
            })
            .collect();

        Self {
            checked_chapters: result.total_chapters.saturating_sub(result.skipped_chapters),
            skipped_chapters: result.skipped_chapters,
            flagged_items,
            updated_at: updated_at.timestamp_millis(),
        }
    }
}
