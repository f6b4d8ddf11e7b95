//! Moderation Context - Entities

use serde::{Deserialize, Serialize};

/// 章节（分析流水线的中间产物）
///
/// 不变量:
/// - index 按出现顺序从 0 开始
/// - lines 已去除广告行与空行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    index: usize,
    title: String,
    lines: Vec<String>,
}

impl Chapter {
    pub fn new(index: usize, title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            index,
            title: title.into(),
            lines,
        }
    }

    /// 回退切分生成的虚拟章节，标题为 "Part N"（N 从 1 开始）
    pub fn synthetic(index: usize, lines: Vec<String>) -> Self {
        Self::new(index, format!("Part {}", index + 1), lines)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 正文字符数（按 Unicode 字符计）
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).sum()
    }
}

/// 章节切分策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// 按标题识别切分
    Headings,
    /// 按固定行数切分
    Fallback,
}

impl SplitStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Headings => "headings",
            Self::Fallback => "fallback",
        }
    }
}

/// 切分结果
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub strategy: SplitStrategy,
    pub chapters: Vec<Chapter>,
}

/// 单章分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterAnalysis {
    pub index: usize,
    pub title: String,
    pub score: f64,
    /// 达到行阈值的原始行，保持原顺序
    pub flagged_lines: Vec<String>,
    pub is_flagged: bool,
}

/// 整本分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 所有章节得分之和（含未标记章节）
    pub total_score: f64,
    pub flagged_chapters: usize,
    pub total_chapters: usize,
    /// flagged_chapters / total_chapters，无章节时为 0
    pub flagged_rate: f64,
    pub total_characters: usize,
    /// 过滤后正文为空的章节数
    pub skipped_chapters: usize,
    pub strategy: SplitStrategy,
    pub summary: String,
    /// 仅包含被标记的章节，按章节顺序
    pub details: Vec<ChapterAnalysis>,
}

impl AnalysisResult {
    /// 汇总各章分析结果
    ///
    /// `analyses` 必须已按章节顺序排列
    pub fn aggregate(
        analyses: Vec<ChapterAnalysis>,
        strategy: SplitStrategy,
        total_characters: usize,
        skipped_chapters: usize,
        summary: String,
    ) -> Self {
        let total_chapters = analyses.len();
        let total_score = analyses.iter().map(|a| a.score).sum();
        let details: Vec<ChapterAnalysis> = analyses.into_iter().filter(|a| a.is_flagged).collect();
        let flagged_chapters = details.len();
        let flagged_rate = if total_chapters == 0 {
            0.0
        } else {
            flagged_chapters as f64 / total_chapters as f64
        };

        Self {
            total_score,
            flagged_chapters,
            total_chapters,
            flagged_rate,
            total_characters,
            skipped_chapters,
            strategy,
            summary,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(index: usize, score: f64, is_flagged: bool) -> ChapterAnalysis {
        ChapterAnalysis {
            index,
            title: format!("第{}章", index + 1),
            score,
            flagged_lines: Vec::new(),
            is_flagged,
        }
    }

    #[test]
    fn test_synthetic_title() {
        let chapter = Chapter::synthetic(2, vec!["一行".into()]);
        assert_eq!(chapter.title(), "Part 3");
        assert_eq!(chapter.index(), 2);
        assert_eq!(chapter.char_count(), 2);
    }

    #[test]
    fn test_aggregate_empty() {
        let result = AnalysisResult::aggregate(Vec::new(), SplitStrategy::Fallback, 0, 0, String::new());
        assert_eq!(result.total_chapters, 0);
        assert_eq!(result.flagged_rate, 0.0);
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_aggregate_keeps_only_flagged_details_in_order() {
        let analyses = vec![
            analysis(0, 4.0, true),
            analysis(1, 2.0, false),
            analysis(2, 6.0, true),
        ];
        let result = AnalysisResult::aggregate(analyses, SplitStrategy::Headings, 10, 0, "x".into());

        assert_eq!(result.total_score, 12.0);
        assert_eq!(result.flagged_chapters, 2);
        assert_eq!(result.total_chapters, 3);
        assert!((result.flagged_rate - 2.0 / 3.0).abs() < f64::EPSILON);
        let indices: Vec<usize> = result.details.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = AnalysisResult::aggregate(vec![analysis(0, 4.0, true)], SplitStrategy::Headings, 3, 0, "abc".into());
        let value = serde_json::to_value(&result).unwrap();

        for field in [
            "totalScore",
            "flaggedChapters",
            "totalChapters",
            "flaggedRate",
            "totalCharacters",
            "summary",
            "details",
        ] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
        assert!(value["details"][0].get("flaggedLines").is_some());
        assert_eq!(value["details"][0]["isFlagged"], true);
        assert_eq!(value["strategy"], "headings");
    }
}
