//! Moderation Facade - 审核入口
//!
//! 组合 文本读取 → 章节切分 → 内容分析，对外只暴露单次调用接口。
//! 只持有不可变策略，可在多个线程间直接共享。

use std::path::Path;
use std::sync::Arc;

use crate::domain::moderation::{AnalysisResult, ModerationConfig, ModerationError, ModerationPolicy};
use crate::domain::{ChapterSplitter, ContentAnalyzer, TextReader, TextSource};

/// 审核门面
#[derive(Debug, Clone)]
pub struct ModerationFacade {
    policy: Arc<ModerationPolicy>,
    reader: TextReader,
}

impl ModerationFacade {
    /// 从配置构建（编译全部正则）
    pub fn new(config: ModerationConfig) -> Result<Self, ModerationError> {
        Ok(Self::from_policy(Arc::new(ModerationPolicy::new(config)?)))
    }

    /// 复用已编译的策略
    pub fn from_policy(policy: Arc<ModerationPolicy>) -> Self {
        let reader = TextReader::new(policy.encoding());
        Self { policy, reader }
    }

    pub fn policy(&self) -> &ModerationPolicy {
        &self.policy
    }

    /// 分析文件
    ///
    /// 路径不存在或不是普通文件时返回 InvalidInput
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisResult, ModerationError> {
        let path = path.as_ref();

        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ModerationError::invalid_input(format!(
                    "file not found: {}",
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Err(ModerationError::invalid_input(format!(
                "not a regular file: {}",
                path.display()
            )));
        }

        let result = self.run(&TextSource::File(path))?;
        tracing::info!(
            path = %path.display(),
            chapters = result.total_chapters,
            flagged = result.flagged_chapters,
            "File analyzed"
        );
        Ok(result)
    }

    /// 分析已解码文本
    ///
    /// 空文本或只含空白时返回 InvalidInput
    pub fn analyze_text(&self, text: &str) -> Result<AnalysisResult, ModerationError> {
        if text.trim().is_empty() {
            return Err(ModerationError::invalid_input("text is empty"));
        }

        let result = self.run(&TextSource::Text(text))?;
        tracing::info!(
            chapters = result.total_chapters,
            flagged = result.flagged_chapters,
            "Text analyzed"
        );
        Ok(result)
    }

    /// 分析原始字节（按配置的字符集解码）
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult, ModerationError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ModerationError::invalid_input("input is empty"));
        }
        self.run(&TextSource::Bytes(bytes))
    }

    fn run(&self, source: &TextSource<'_>) -> Result<AnalysisResult, ModerationError> {
        let outcome = ChapterSplitter::new(&self.policy).split(&self.reader, source)?;
        Ok(ContentAnalyzer::new(&self.policy).analyze(&outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::moderation::{SeverityPatterns, SplitStrategy};
    use std::io::Write;

    fn facade() -> ModerationFacade {
        ModerationFacade::new(ModerationConfig {
            ad_patterns: vec![r"^\[AD\].*$".into()],
            patterns: SeverityPatterns {
                severe: vec!["murder".into()],
                ..SeverityPatterns::empty()
            },
            ..ModerationConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_blank_text_rejected() {
        let facade = facade();
        assert!(matches!(facade.analyze_text(""), Err(ModerationError::InvalidInput(_))));
        assert!(matches!(
            facade.analyze_text(" \n\t  \n"),
            Err(ModerationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_file_rejected() {
        let result = facade().analyze_file("/definitely/not/here.txt");
        assert!(matches!(result, Err(ModerationError::InvalidInput(_))));
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = facade().analyze_file(dir.path());
        assert!(matches!(result, Err(ModerationError::InvalidInput(_))));
    }

    #[test]
    fn test_three_clean_chapters() {
        let text = "Chapter 1\nThe sun rose.\nChapter 2\nBirds sang.\nChapter 3\nThe end.";
        let result = facade().analyze_text(text).unwrap();

        assert_eq!(result.strategy, SplitStrategy::Headings);
        assert_eq!(result.total_chapters, 3);
        assert_eq!(result.flagged_chapters, 0);
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.flagged_rate, 0.0);
    }

    #[test]
    fn test_single_severe_line() {
        let text = "Chapter 1\nmurder murder murder murder\nquiet line";
        let result = facade().analyze_text(text).unwrap();

        assert_eq!(result.total_chapters, 1);
        assert_eq!(result.flagged_chapters, 1);
        assert_eq!(result.total_score, 12.0);
        assert_eq!(result.flagged_rate, 1.0);
        assert_eq!(result.details[0].flagged_lines, vec!["murder murder murder murder".to_string()]);
    }

    #[test]
    fn test_fallback_chunk_count() {
        let text: String = (0..5000).map(|i| format!("plain line {}\n", i)).collect();
        let facade = facade();
        let result = facade.analyze_text(&text).unwrap();

        let chunk = facade.policy().config().fallback_chunk_size;
        assert_eq!(result.strategy, SplitStrategy::Fallback);
        assert_eq!(result.total_chapters, (5000 + chunk - 1) / chunk);
    }

    #[test]
    fn test_only_ads() {
        let text = "[AD] buy now\n[AD] murder mystery sale\n[AD] visit us";
        let result = facade().analyze_text(text).unwrap();

        assert!(result.total_chapters > 0);
        assert_eq!(result.skipped_chapters, result.total_chapters);
        assert_eq!(result.total_characters, 0);
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.summary, "");
    }

    #[test]
    fn test_ad_line_contributes_nothing() {
        let facade = facade();
        let clean = facade.analyze_text("Chapter 1\nhello").unwrap();
        let with_ad = facade
            .analyze_text("Chapter 1\nhello\n[AD] murder murder murder")
            .unwrap();

        assert_eq!(clean.total_score, with_ad.total_score);
        assert_eq!(clean.total_characters, with_ad.total_characters);
        assert_eq!(clean.summary, with_ad.summary);
    }

    #[test]
    fn test_analyze_text_is_idempotent() {
        let text = "Chapter 1\nmurder here murder there\nChapter 2\ncalm";
        let facade = facade();
        let first = facade.analyze_text(text).unwrap();
        let second = facade.analyze_text(text).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_flagged_rate_bounds() {
        let facade = facade();
        for text in [
            "x",
            "Chapter 1\nmurder murder",
            "Chapter 1\na\nChapter 2\nmurder murder\nChapter 3\nb",
        ] {
            let result = facade.analyze_text(text).unwrap();
            assert!(result.flagged_rate >= 0.0 && result.flagged_rate <= 1.0);
            assert!(result.flagged_chapters <= result.total_chapters);
        }
    }

    #[test]
    fn test_file_and_text_agree() {
        let text = "第一章 开始\n他说了声该死。\n第二章 继续\n杀人 杀人\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let facade = ModerationFacade::new(ModerationConfig::default()).unwrap();
        let from_file = facade.analyze_file(file.path()).unwrap();
        let from_text = facade.analyze_text(text).unwrap();

        assert_eq!(from_file, from_text);
        assert_eq!(from_file.flagged_chapters, 1);
    }

    #[test]
    fn test_gbk_file() {
        let facade = ModerationFacade::new(ModerationConfig {
            target_charset: "GBK".into(),
            ..ModerationConfig::default()
        })
        .unwrap();
        let (bytes, _, _) = encoding_rs::GBK.encode("第一章 开始\n杀人 杀人\n");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let result = facade.analyze_file(file.path()).unwrap();
        assert_eq!(result.details[0].title, "第一章 开始");
        assert_eq!(result.details[0].score, 6.0);
    }

    #[test]
    fn test_indented_lines_kept_verbatim() {
        let text = "Chapter 1\n\u{3000}\u{3000}murder murder  \nok";
        let result = facade().analyze_text(text).unwrap();

        assert_eq!(
            result.details[0].flagged_lines,
            vec!["\u{3000}\u{3000}murder murder  ".to_string()]
        );
        // 缩进和尾随空白计入字符数：17 + 2
        assert_eq!(result.total_characters, 19);
    }

    #[test]
    fn test_english_word_headings() {
        let text = "Chapter One\nfirst\nChapter Two\nsecond\nChapter Three\nthird";
        let result = facade().analyze_text(text).unwrap();

        assert_eq!(result.strategy, SplitStrategy::Headings);
        assert_eq!(result.total_chapters, 3);
    }

    #[test]
    fn test_prose_line_does_not_open_chapter() {
        let text = "Chapter 1\nHe sat down.\nChapter did not matter to him.";
        let result = facade().analyze_text(text).unwrap();

        assert_eq!(result.total_chapters, 1);
    }

    #[test]
    fn test_bytes_with_malformed_sequence_recover() {
        let bytes = b"Chapter 1\nmurder \xFF\xFE murder\nChapter 2\ncalm\n";
        let result = facade().analyze_bytes(bytes).unwrap();

        assert_eq!(result.total_chapters, 2);
        assert_eq!(result.flagged_chapters, 1);
        assert_eq!(result.details[0].score, 6.0);
        assert!(result.details[0].flagged_lines[0].contains('\u{FFFD}'));
    }

    #[test]
    fn test_gbk_bytes() {
        let facade = ModerationFacade::new(ModerationConfig {
            target_charset: "GBK".into(),
            ..ModerationConfig::default()
        })
        .unwrap();
        let (bytes, _, _) = encoding_rs::GBK.encode("第一章 开始\n杀人 杀人\n");

        let result = facade.analyze_bytes(&bytes).unwrap();
        assert_eq!(result.details[0].title, "第一章 开始");
        assert!(matches!(
            facade.analyze_bytes(b" \n\t"),
            Err(ModerationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_shared_across_threads() {
        let facade = facade();
        let text = "Chapter 1\nmurder murder\nChapter 2\nfine";
        let expected = facade.analyze_text(text).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| facade.analyze_text(text).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
