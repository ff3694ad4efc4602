//! Streaming reader for message files: one message per line
//!
//! Messages are raw bytes; they are hashed exactly as they appear in the file.

use crate::reader::{open_source, InputProgress, LineSource};
use crate::{Error, Result};
use hashprobe_core::record::is_separator;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Reads messages to be hashed, one per line.
///
/// Messages end up as the first token of a pair line, so a message that
/// contains whitespace is rejected with a warning instead of producing a
/// line the collision counter would misread.
pub struct MessageReader<R: Read> {
    source: LineSource<R>,
    rejected: usize,
}

impl<R: Read> MessageReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_total_bytes(reader, None)
    }

    pub fn with_total_bytes(reader: R, total_bytes: Option<u64>) -> Self {
        Self {
            source: LineSource::new(reader, total_bytes),
            rejected: 0,
        }
    }

    /// Number of lines skipped because they contained whitespace
    pub fn rejected_lines(&self) -> usize {
        self.rejected
    }
}

impl MessageReader<Box<dyn Read>> {
    /// Open a message file, gunzipping `.gz` files
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (source, total_bytes) = open_source(path)?;
        Ok(Self::with_total_bytes(source, total_bytes))
    }
}

impl<R: Read> InputProgress for MessageReader<R> {
    fn total_bytes(&self) -> Option<u64> {
        self.source.total_bytes()
    }

    fn bytes_processed(&self) -> u64 {
        self.source.bytes_processed()
    }

    fn lines_processed(&self) -> usize {
        self.source.lines_processed()
    }
}

impl<R: Read> Iterator for MessageReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut line = match self.source.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => return Some(Err(Error::Io(e))),
            };

            if line.last() == Some(&b'\n') {
                line.pop();
            }
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            if line.is_empty() {
                continue;
            }

            if line.iter().any(|&b| is_separator(b)) {
                self.rejected += 1;
                warn!(
                    "Skipping line {}: message {:?} contains whitespace",
                    self.source.line_number(),
                    String::from_utf8_lossy(&line)
                );
                continue;
            }

            return Some(Ok(line));
        }
    }
}
