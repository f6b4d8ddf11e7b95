//! Moderation Context - Value Objects

use serde::{Deserialize, Serialize};

use super::SeverityLevel;

/// 审核配置（不可变）
///
/// 同一份配置可被多个分析调用共享；正则在 [`ModerationPolicy`](super::ModerationPolicy)
/// 构建时统一编译一次。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationConfig {
    /// 单行加权得分达到此值才记为命中行，并计入章节得分
    pub line_score_threshold: f64,

    /// 章节得分达到此值（含）即标记该章节
    pub chapter_score_threshold: f64,

    /// 回退切分时每个虚拟章节的行数
    pub fallback_chunk_size: usize,

    /// 标题识别数量低于此值时考虑回退切分
    pub min_chapter_count: usize,

    /// 文档字符数达到此值时，即使识别到少量标题也回退切分
    pub fallback_min_characters: usize,

    /// 字节输入的解码字符集（WHATWG 标签，如 "UTF-8"、"GBK"）
    pub target_charset: String,

    /// 摘要最大字符数
    pub summary_max_length: usize,

    /// 标题行最大字符数，超过则视为正文
    pub heading_max_chars: usize,

    /// 广告行正则（大小写不敏感，命中任意一条即丢弃整行）
    pub ad_patterns: Vec<String>,

    /// 按严重等级分组的敏感词正则
    pub patterns: SeverityPatterns,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            line_score_threshold: 2.0,
            chapter_score_threshold: 3.5,
            fallback_chunk_size: 200,
            min_chapter_count: 5,
            fallback_min_characters: 100_000,
            target_charset: "UTF-8".to_string(),
            summary_max_length: 200,
            heading_max_chars: 50,
            ad_patterns: default_ad_patterns(),
            patterns: SeverityPatterns::default(),
        }
    }
}

fn default_ad_patterns() -> Vec<String> {
    [
        r"(?:https?://|www\.)[\w.-]+",
        r"本站|首发|最新章节|一秒记住|手机阅读|请收藏",
        r"(?:read|download)\s+(?:more|free)\s+(?:at|on)\b",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// 敏感词正则分组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityPatterns {
    pub mild: Vec<String>,
    pub moderate: Vec<String>,
    pub severe: Vec<String>,
}

impl SeverityPatterns {
    /// 空词表
    pub fn empty() -> Self {
        Self {
            mild: Vec::new(),
            moderate: Vec::new(),
            severe: Vec::new(),
        }
    }

    /// 指定等级的正则列表
    pub fn for_level(&self, level: SeverityLevel) -> &[String] {
        match level {
            SeverityLevel::Mild => &self.mild,
            SeverityLevel::Moderate => &self.moderate,
            SeverityLevel::Severe => &self.severe,
        }
    }

    pub fn len(&self) -> usize {
        self.mild.len() + self.moderate.len() + self.severe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SeverityPatterns {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            mild: owned(&["该死", "混蛋", r"\bdamn\b", r"\bbastard\b"]),
            moderate: owned(&["血腥", "暴力", r"\bgore\b", r"\bbrutal(?:ity)?\b"]),
            severe: owned(&["杀人", "毒品", r"\bmurder(?:ed|s)?\b", r"\bdrugs?\b"]),
        }
    }
}
