//! Moderation Context - 编译后的审核策略
//!
//! 持有不可变配置以及预编译的正则，构建一次后跨调用、跨线程共享

use encoding_rs::Encoding;
use regex::{Regex, RegexBuilder};

use super::{ModerationConfig, ModerationError, SeverityLevel};

/// 内置章节标题规则（中文 / 英文）
///
/// 英文序号支持阿拉伯数字、罗马数字（1-399）和英文数词，序号后必须是行尾或分隔符
const HEADING_PATTERNS: &[&str] = &[
    r"^第[0-9０-９零〇一二三四五六七八九十百千万两]+[章节回卷集部篇]",
    concat!(
        r"^(?:chapter|chap\.?)\s*(?:",
        r"\d+",
        r"|c{1,3}(?:xc|xl|l?x{0,3})(?:ix|iv|v?i{0,3})",
        r"|(?:xc|xl|l?x{1,3}|l)(?:ix|iv|v?i{0,3})",
        r"|ix|iv|v?i{1,3}|v",
        r"|(?:one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen",
        r"|fifteen|sixteen|seventeen|eighteen|nineteen|twenty|thirty|forty|fifty|sixty",
        r"|seventy|eighty|ninety|hundred)",
        r"(?:[\s\-](?:one|two|three|four|five|six|seven|eight|nine|hundred))*",
        r")(?:$|[\s:.：,，\-—])",
    ),
    r"^(?:序章|序言|楔子|引子|尾声|后记|番外)",
    r"^(?:prologue|epilogue)\b",
];

/// 带严重等级的敏感词规则
#[derive(Debug, Clone)]
pub struct SeverityPattern {
    level: SeverityLevel,
    regex: Regex,
}

impl SeverityPattern {
    /// 单行内的加权得分：weight × 非重叠命中次数
    pub fn score(&self, line: &str) -> f64 {
        let count = self.regex.find_iter(line).count();
        (self.level.weight() as usize * count) as f64
    }
}

/// 审核策略
///
/// 不变量:
/// - 所有阈值非负
/// - fallback_chunk_size >= 1
/// - 正则只在构建时编译一次
#[derive(Debug, Clone)]
pub struct ModerationPolicy {
    config: ModerationConfig,
    encoding: &'static Encoding,
    ad_patterns: Vec<Regex>,
    heading_patterns: Vec<Regex>,
    severity_patterns: Vec<SeverityPattern>,
}

impl ModerationPolicy {
    /// 校验配置并编译全部正则
    pub fn new(config: ModerationConfig) -> Result<Self, ModerationError> {
        validate(&config)?;

        let encoding = Encoding::for_label(config.target_charset.trim().as_bytes())
            .ok_or_else(|| ModerationError::UnsupportedCharset(config.target_charset.clone()))?;

        let ad_patterns = config
            .ad_patterns
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>, _>>()?;

        let heading_patterns = HEADING_PATTERNS
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>, _>>()?;

        let mut severity_patterns = Vec::with_capacity(config.patterns.len());
        for level in SeverityLevel::ALL {
            for pattern in config.patterns.for_level(level) {
                severity_patterns.push(SeverityPattern {
                    level,
                    regex: compile(pattern)?,
                });
            }
        }

        tracing::debug!(
            charset = encoding.name(),
            ad_patterns = ad_patterns.len(),
            severity_patterns = severity_patterns.len(),
            "Moderation policy compiled"
        );

        Ok(Self {
            config,
            encoding,
            ad_patterns,
            heading_patterns,
            severity_patterns,
        })
    }

    pub fn config(&self) -> &ModerationConfig {
        &self.config
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// 返回第一条命中的广告规则序号（仅用于诊断，匹配本身不分先后）
    pub fn matching_ad_pattern(&self, line: &str) -> Option<usize> {
        self.ad_patterns.iter().position(|re| re.is_match(line))
    }

    pub fn is_ad_line(&self, line: &str) -> bool {
        self.matching_ad_pattern(line).is_some()
    }

    /// 判断是否为章节标题行
    pub fn is_heading(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() || line.chars().count() > self.config.heading_max_chars {
            return false;
        }
        if self.is_ad_line(line) {
            return false;
        }
        self.heading_patterns.iter().any(|re| re.is_match(line))
    }

    /// 过滤单行：丢弃空行和广告行，保留的行原样返回（含缩进）
    pub fn retain(&self, line: &str) -> Option<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(index) = self.matching_ad_pattern(trimmed) {
            tracing::trace!(pattern = index, "Advertising line dropped");
            return None;
        }
        Some(line.to_string())
    }

    /// 单行加权得分（多个等级的命中累加）
    pub fn line_score(&self, line: &str) -> f64 {
        self.severity_patterns.iter().map(|p| p.score(line)).sum()
    }

    /// 行是否命中：必须有实际匹配且达到行阈值
    pub fn is_line_flagged(&self, score: f64) -> bool {
        score > 0.0 && score >= self.config.line_score_threshold
    }

    /// 章节是否标记：score >= chapter_score_threshold（含边界）
    ///
    /// 例外：零分章节永不标记。阈值配置为 0 时与字面的含边界比较不同，
    /// 没有任何命中（包括正文被全部过滤）的章节不会被标记
    pub fn is_chapter_flagged(&self, score: f64) -> bool {
        score > 0.0 && score >= self.config.chapter_score_threshold
    }
}

fn compile(pattern: &str) -> Result<Regex, ModerationError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ModerationError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

fn validate(config: &ModerationConfig) -> Result<(), ModerationError> {
    for (name, value) in [
        ("line_score_threshold", config.line_score_threshold),
        ("chapter_score_threshold", config.chapter_score_threshold),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ModerationError::invalid_input(format!(
                "{} must be a non-negative number, got {}",
                name, value
            )));
        }
    }

    if config.fallback_chunk_size == 0 {
        return Err(ModerationError::invalid_input(
            "fallback_chunk_size must be at least 1",
        ));
    }

    if config.heading_max_chars == 0 {
        return Err(ModerationError::invalid_input(
            "heading_max_chars must be at least 1",
        ));
    }

    Ok(())
}
