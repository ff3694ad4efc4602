//! One `(data, hash)` pair parsed from an input line
//!
//! Tokens are kept as raw bytes so that inputs which are not valid UTF-8
//! keep their identity; text conversion only happens for display.

use std::borrow::Cow;

/// Token separators of the pair format: ASCII space, tab, newline,
/// vertical tab, form feed and carriage return
pub fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

/// A single record from a pair file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// First token of the line
    pub data: Vec<u8>,
    /// Second token of the line
    pub hash: Vec<u8>,
    /// 1-based source line number
    pub source_line: usize,
}

impl Record {
    /// Create a new record
    pub fn new(data: impl Into<Vec<u8>>, hash: impl Into<Vec<u8>>, source_line: usize) -> Self {
        Self {
            data: data.into(),
            hash: hash.into(),
            source_line,
        }
    }

    /// Parse the first two separator-delimited tokens of `line`.
    ///
    /// Returns `None` when the line holds fewer than two tokens; anything
    /// after the second token is ignored.
    pub fn parse(line: &[u8], source_line: usize) -> Option<Self> {
        let mut tokens = line
            .split(|&b| is_separator(b))
            .filter(|token| !token.is_empty());
        let data = tokens.next()?;
        let hash = tokens.next()?;
        Some(Self::new(data, hash, source_line))
    }

    /// Data token as text, invalid UTF-8 replaced
    pub fn data_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Hash token as text, invalid UTF-8 replaced
    pub fn hash_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.hash)
    }
}
