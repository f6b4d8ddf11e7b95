//! 内容分析器
//!
//! 逐章、逐行按严重等级加权打分：
//! - 行得分 = Σ weight(level) × 命中次数
//! - 行得分达到行阈值才计入章节得分（噪声下限）
//! - 章节得分达到章节阈值（含）即标记
//!
//! 各章之间没有共享可变状态，使用 rayon 并行打分，collect 保持原章节顺序

use rayon::prelude::*;

use super::moderation::{AnalysisResult, Chapter, ChapterAnalysis, ModerationPolicy, SplitOutcome};

/// 内容分析器
pub struct ContentAnalyzer<'p> {
    policy: &'p ModerationPolicy,
}

impl<'p> ContentAnalyzer<'p> {
    pub fn new(policy: &'p ModerationPolicy) -> Self {
        Self { policy }
    }

    /// 分析单个章节
    pub fn analyze_chapter(&self, chapter: &Chapter) -> ChapterAnalysis {
        let mut score = 0.0;
        let mut flagged_lines = Vec::new();

        for line in chapter.lines() {
            let line_score = self.policy.line_score(line);
            if self.policy.is_line_flagged(line_score) {
                score += line_score;
                flagged_lines.push(line.clone());
            }
        }

        ChapterAnalysis {
            index: chapter.index(),
            title: chapter.title().to_string(),
            score,
            flagged_lines,
            is_flagged: self.policy.is_chapter_flagged(score),
        }
    }

    /// 分析全部章节并汇总
    pub fn analyze(&self, outcome: &SplitOutcome) -> AnalysisResult {
        let chapters = &outcome.chapters;

        let analyses: Vec<ChapterAnalysis> = chapters
            .par_iter()
            .map(|chapter| self.analyze_chapter(chapter))
            .collect();

        let total_characters = chapters.iter().map(Chapter::char_count).sum();
        let skipped_chapters = chapters.iter().filter(|c| c.is_empty()).count();
        let summary = build_summary(chapters, self.policy.config().summary_max_length);

        let result = AnalysisResult::aggregate(
            analyses,
            outcome.strategy,
            total_characters,
            skipped_chapters,
            summary,
        );

        tracing::debug!(
            chapters = result.total_chapters,
            flagged = result.flagged_chapters,
            skipped = result.skipped_chapters,
            total_score = result.total_score,
            "Chapters scored"
        );

        result
    }
}

/// 拼接过滤后的正文（行间以换行分隔），截断到 max_chars 个字符
fn build_summary(chapters: &[Chapter], max_chars: usize) -> String {
    let mut summary = String::new();
    let mut count = 0;

    'chapters: for chapter in chapters {
        for line in chapter.lines() {
            if count >= max_chars {
                break 'chapters;
            }
            if !summary.is_empty() {
                summary.push('\n');
                count += 1;
            }
            summary.push_str(line);
            count += line.chars().count();
        }
    }

    if count > max_chars {
        if let Some((cut, _)) = summary.char_indices().nth(max_chars) {
            summary.truncate(cut);
        }
    }

    summary
}
