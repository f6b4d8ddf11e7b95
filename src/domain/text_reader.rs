//! 文本读取器
//!
//! 将字节流按目标字符集流式解码为行序列：
//! - 非法字节序列替换为 U+FFFD，不中断读取
//! - 行尾的 `\n` / `\r\n` 被去除
//! - 同一个 [`TextSource`] 可重复读取（每次重新打开）

use encoding_rs::{CoderResult, Decoder, Encoding};
use std::borrow::Cow;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// 每次读取的字节数
const READ_CHUNK: usize = 8 * 1024;

/// 行迭代器
pub type Lines<'a> = Box<dyn Iterator<Item = io::Result<Cow<'a, str>>> + 'a>;

/// 文本来源
#[derive(Debug, Clone, Copy)]
pub enum TextSource<'a> {
    /// 已解码的字符串，跳过编码处理
    Text(&'a str),
    /// 内存中的原始字节
    Bytes(&'a [u8]),
    /// 文件路径
    File(&'a Path),
}

/// 文本读取器
#[derive(Debug, Clone, Copy)]
pub struct TextReader {
    encoding: &'static Encoding,
}

impl TextReader {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// 打开一个新的行序列
    ///
    /// 仅当底层文件无法打开时返回错误；读取中途的 IO 错误通过迭代项返回
    pub fn lines<'a>(&self, source: &TextSource<'a>) -> io::Result<Lines<'a>> {
        match *source {
            TextSource::Text(text) => Ok(Box::new(text.lines().map(|l| Ok(Cow::Borrowed(l))))),
            TextSource::Bytes(bytes) => Ok(Box::new(
                DecodedLines::new(bytes, self.encoding).map(|r| r.map(Cow::Owned)),
            )),
            TextSource::File(path) => {
                let file = File::open(path)?;
                Ok(Box::new(
                    DecodedLines::new(file, self.encoding).map(|r| r.map(Cow::Owned)),
                ))
            }
        }
    }
}

/// 流式解码行迭代器
pub struct DecodedLines<R> {
    reader: R,
    decoder: Decoder,
    buf: Vec<u8>,
    pending: String,
    ready: VecDeque<String>,
    finished: bool,
    replaced: bool,
}

impl<R: Read> DecodedLines<R> {
    pub fn new(reader: R, encoding: &'static Encoding) -> Self {
        Self {
            reader,
            // 带 BOM 嗅探：存在 BOM 时以 BOM 指示的编码为准
            decoder: encoding.new_decoder(),
            buf: vec![0; READ_CHUNK],
            pending: String::new(),
            ready: VecDeque::new(),
            finished: false,
            replaced: false,
        }
    }

    /// 读入下一块字节并解码，把完整的行放入 ready 队列
    fn fill(&mut self) -> io::Result<()> {
        let n = loop {
            match self.reader.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        let last = n == 0;

        let mut src = &self.buf[..n];
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(src.len())
                .unwrap_or(src.len() * 3 + 16);
            self.pending.reserve(needed);

            let (result, read, replaced) = self.decoder.decode_to_string(src, &mut self.pending, last);
            if replaced && !self.replaced {
                self.replaced = true;
                tracing::warn!(
                    encoding = self.decoder.encoding().name(),
                    "Malformed byte sequence replaced during decoding"
                );
            }
            src = &src[read..];

            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }

        self.drain_complete_lines();

        if last {
            self.finished = true;
            if !self.pending.is_empty() {
                let rest = std::mem::take(&mut self.pending);
                self.ready.push_back(strip_cr(&rest).to_string());
            }
        }

        Ok(())
    }

    fn drain_complete_lines(&mut self) {
        let mut start = 0;
        while let Some(pos) = self.pending[start..].find('\n') {
            let end = start + pos;
            self.ready.push_back(strip_cr(&self.pending[start..end]).to_string());
            start = end + 1;
        }
        self.pending.drain(..start);
    }
}

impl<R: Read> Iterator for DecodedLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Some(Ok(line));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.fill() {
                self.finished = true;
                return Some(Err(e));
            }
        }
    }
}

#[inline]
fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
