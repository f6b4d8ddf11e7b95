//! 章节切分器
//!
//! 切分策略：
//! 1. 第一遍扫描：统计标题行数量和文档总字符数
//! 2. 根据统计结果选择按标题切分或按固定行数回退切分
//! 3. 第二遍扫描：按选定策略生成章节，同时过滤广告行和空行

use std::io;

use super::moderation::{Chapter, ModerationError, ModerationPolicy, SplitOutcome, SplitStrategy};
use super::text_reader::{Lines, TextReader, TextSource};

/// 第一遍扫描的统计结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSurvey {
    pub heading_count: usize,
    pub line_count: usize,
    pub total_characters: usize,
}

/// 章节切分器
pub struct ChapterSplitter<'p> {
    policy: &'p ModerationPolicy,
}

impl<'p> ChapterSplitter<'p> {
    pub fn new(policy: &'p ModerationPolicy) -> Self {
        Self { policy }
    }

    /// 切分文档
    pub fn split(
        &self,
        reader: &TextReader,
        source: &TextSource<'_>,
    ) -> Result<SplitOutcome, ModerationError> {
        let survey = self.survey(reader.lines(source)?)?;
        let strategy = self.choose_strategy(&survey);

        tracing::debug!(
            headings = survey.heading_count,
            lines = survey.line_count,
            characters = survey.total_characters,
            strategy = strategy.as_str(),
            "Split strategy chosen"
        );

        let lines = reader.lines(source)?;
        let chapters = match strategy {
            SplitStrategy::Headings => self.split_by_headings(lines)?,
            SplitStrategy::Fallback => self.split_into_chunks(lines)?,
        };

        Ok(SplitOutcome { strategy, chapters })
    }

    /// 统计标题数与字符数
    pub fn survey(&self, lines: Lines<'_>) -> io::Result<DocumentSurvey> {
        let mut survey = DocumentSurvey::default();
        for line in lines {
            let line = line?;
            survey.line_count += 1;
            survey.total_characters += line.chars().count();
            if self.policy.is_heading(&line) {
                survey.heading_count += 1;
            }
        }
        Ok(survey)
    }

    /// 选择切分策略
    ///
    /// 以下情况回退为固定行数切分：
    /// - 没有识别到任何标题
    /// - 标题数低于 min_chapter_count，且文档字符数达到 fallback_min_characters
    pub fn choose_strategy(&self, survey: &DocumentSurvey) -> SplitStrategy {
        let config = self.policy.config();

        if survey.heading_count == 0 {
            return SplitStrategy::Fallback;
        }
        if survey.heading_count < config.min_chapter_count
            && survey.total_characters >= config.fallback_min_characters
        {
            return SplitStrategy::Fallback;
        }
        SplitStrategy::Headings
    }

    /// 按标题切分
    ///
    /// 标题行本身只作为章节标题，不计入正文；第一个标题之前的内容并入第一章
    fn split_by_headings(&self, lines: Lines<'_>) -> io::Result<Vec<Chapter>> {
        let mut chapters = Vec::new();
        let mut preface: Vec<String> = Vec::new();
        let mut current: Option<(String, Vec<String>)> = None;

        for line in lines {
            let line = line?;

            if self.policy.is_heading(&line) {
                let body = match current.take() {
                    Some((title, body)) => {
                        chapters.push(Chapter::new(chapters.len(), title, body));
                        Vec::new()
                    }
                    None => std::mem::take(&mut preface),
                };
                current = Some((line.trim().to_string(), body));
                continue;
            }

            if let Some(kept) = self.policy.retain(&line) {
                match current.as_mut() {
                    Some((_, body)) => body.push(kept),
                    None => preface.push(kept),
                }
            }
        }

        match current {
            Some((title, body)) => chapters.push(Chapter::new(chapters.len(), title, body)),
            // 两次扫描之间来源发生变化时才会走到这里
            None if !preface.is_empty() => chapters.push(Chapter::synthetic(0, preface)),
            None => {}
        }

        Ok(chapters)
    }

    /// 按固定行数切分
    ///
    /// 以原始行数计数（广告行同样占位），因此全是广告的文档仍会得到空正文章节
    fn split_into_chunks(&self, lines: Lines<'_>) -> io::Result<Vec<Chapter>> {
        let chunk_size = self.policy.config().fallback_chunk_size.max(1);
        let mut chapters = Vec::new();
        let mut body: Vec<String> = Vec::new();
        let mut seen = 0usize;

        for line in lines {
            let line = line?;
            if seen > 0 && seen % chunk_size == 0 {
                chapters.push(Chapter::synthetic(chapters.len(), std::mem::take(&mut body)));
            }
            seen += 1;
            if let Some(kept) = self.policy.retain(&line) {
                body.push(kept);
            }
        }

        if seen > 0 {
            chapters.push(Chapter::synthetic(chapters.len(), body));
        }

        Ok(chapters)
    }
}
