//! Block-structured line tokenizer
//!
//! Both text asset formats share one line convention: a line that is exactly
//! `<<...>>` is a block header, everything else is free text belonging to the
//! block above it. This module only classifies lines; what a header means is
//! decided by the dialogue and database builders.
//!
//! There is no escaping. A text line that happens to look like `<<...>>` is a
//! header.

mod decode;

pub use decode::{decode_text, read_text_asset};

/// One classified input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawLine<'a> {
    /// `<<content>>` spanning the whole line; holds `content`.
    BlockHeader(&'a str),
    /// Any other line, without its line terminator.
    TextLine(&'a str),
}

/// A classified line together with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberedLine<'a> {
    pub number: usize,
    pub line: RawLine<'a>,
}

/// Lazy, single-pass iterator over the classified lines of a text asset.
#[derive(Debug, Clone)]
pub struct BlockLines<'a> {
    rest: &'a str,
    number: usize,
}

impl<'a> BlockLines<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            rest: source,
            number: 0,
        }
    }
}

impl<'a> Iterator for BlockLines<'a> {
    type Item = NumberedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let (line, rest) = match self.rest.find('\n') {
            Some(pos) => (&self.rest[..pos], &self.rest[pos + 1..]),
            None => (self.rest, ""),
        };
        self.rest = rest;
        self.number += 1;

        // CRLF files: the CR belongs to the terminator, not the content
        let line = line.strip_suffix('\r').unwrap_or(line);

        Some(NumberedLine {
            number: self.number,
            line: classify(line),
        })
    }
}

/// Tokenize a whole text asset.
#[must_use]
pub fn lines(source: &str) -> BlockLines<'_> {
    BlockLines::new(source)
}

/// Classify a single line (without terminator).
///
/// Matches `^<<([^>]+)>>$`: at least one character between the markers and
/// no `>` anywhere inside.
#[must_use]
pub fn classify(line: &str) -> RawLine<'_> {
    match header_content(line) {
        Some(content) => RawLine::BlockHeader(content),
        None => RawLine::TextLine(line),
    }
}

fn header_content(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("<<")?.strip_suffix(">>")?;
    if inner.is_empty() || inner.contains('>') {
        None
    } else {
        Some(inner)
    }
}

/// Strip trailing whitespace (space, tab, line breaks, form feed, vertical
/// tab and NUL) from the right only.
///
/// Non-ASCII whitespace such as the ideographic space is kept; it is
/// content in CJK texts.
#[must_use]
pub fn rstrip(text: &str) -> &str {
    text.trim_end_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c', '\0'])
}

/// Accumulates the free-text lines of one block.
#[derive(Debug, Clone, Default)]
pub(crate) struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub(crate) fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// Take the accumulated text, right-stripped, leaving the buffer empty.
    pub(crate) fn take(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        rstrip(&text).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_classification() {
        assert_eq!(classify("<<A>>"), RawLine::BlockHeader("A"));
        assert_eq!(classify("<<face: X, 2>>"), RawLine::BlockHeader("face: X, 2"));
        assert_eq!(classify("<<<A>>"), RawLine::BlockHeader("<A"));
        assert_eq!(classify("<<>>"), RawLine::TextLine("<<>>"));
        assert_eq!(classify("<<a>>>"), RawLine::TextLine("<<a>>>"));
        assert_eq!(classify("<<a>b>>"), RawLine::TextLine("<<a>b>>"));
    }

    #[test]
    fn test_header_must_span_whole_line() {
        assert_eq!(classify(" <<A>>"), RawLine::TextLine(" <<A>>"));
        assert_eq!(classify("<<A>> "), RawLine::TextLine("<<A>> "));
        assert_eq!(classify("Say <<A>> now"), RawLine::TextLine("Say <<A>> now"));
    }

    #[test]
    fn test_line_numbers_and_terminators() {
        let tokens: Vec<_> = lines("<<A>>\r\nHello\r\n\nWorld").collect();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].number, 1);
        assert_eq!(tokens[0].line, RawLine::BlockHeader("A"));
        assert_eq!(tokens[1].line, RawLine::TextLine("Hello"));
        assert_eq!(tokens[2].line, RawLine::TextLine(""));
        assert_eq!(tokens[3].number, 4);
        assert_eq!(tokens[3].line, RawLine::TextLine("World"));
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        assert_eq!(lines("").count(), 0);
    }

    #[test]
    fn test_rstrip_keeps_leading_and_cjk_space() {
        assert_eq!(rstrip("\n  Hi\n\n \t\n"), "\n  Hi");
        assert_eq!(rstrip("こんにちは\u{3000}"), "こんにちは\u{3000}");
    }

    #[test]
    fn test_text_buffer_take() {
        let mut buffer = TextBuffer::default();
        buffer.push_line("");
        buffer.push_line("Line");
        buffer.push_line("");
        assert_eq!(buffer.take(), "\nLine");
        assert_eq!(buffer.take(), "");
    }
}
