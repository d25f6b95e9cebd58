//! Line primitives shared by resume structuring, the optimizer and the export layout.

use std::borrow::Cow;

/// A raw document line with its position and indentation, before trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// Zero-based index in the document, blank lines included.
    pub position: usize,
    /// Leading whitespace, in characters.
    pub indentation: usize,
    pub text: &'a str,
}

impl<'a> RawLine<'a> {
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Normalized, trimmed lines with blank lines dropped.
pub fn content_lines(text: &str) -> Vec<String> {
    normalize_newlines(text)
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Lines split on `\n` only, blank lines dropped, surrounding whitespace kept.
pub fn non_blank_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect()
}

pub fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Iterates over every `\n`-separated line with its position and indentation.
pub fn raw_lines(content: &str) -> impl Iterator<Item = RawLine<'_>> {
    content.split('\n').enumerate().map(|(position, text)| RawLine {
        position,
        indentation: leading_whitespace(text),
        text,
    })
}

/// Length as the browser counts it (UTF-16 code units). Length thresholds in the
/// heuristics were tuned against that count.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
