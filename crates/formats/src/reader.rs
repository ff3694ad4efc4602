//! Shared line-oriented input plumbing
//!
//! Opens plain or gzip-compressed files (or stdin) and hands out lines while
//! tracking how far the pass has progressed.

use crate::{Error, MessageReader, PairReader, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Default read buffer size (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Progress accessors common to every reader
pub trait InputProgress {
    /// Total input size in bytes, if known
    fn total_bytes(&self) -> Option<u64>;

    /// Bytes consumed so far
    fn bytes_processed(&self) -> u64;

    /// Lines consumed so far, skipped lines included
    fn lines_processed(&self) -> usize;
}

/// Buffered line source with byte and line accounting
pub(crate) struct LineSource<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    bytes_read: u64,
    total_bytes: Option<u64>,
}

impl<R: Read> LineSource<R> {
    pub(crate) fn new(reader: R, total_bytes: Option<u64>) -> Self {
        Self {
            reader: BufReader::with_capacity(DEFAULT_BUFFER_SIZE, reader),
            line_number: 0,
            bytes_read: 0,
            total_bytes,
        }
    }

    /// Read the next line as raw bytes, newline included. `Ok(None)` at
    /// end of input.
    pub(crate) fn next_line(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let n = self.reader.read_until(b'\n', &mut line)?;
        if n == 0 {
            return Ok(None);
        }
        self.bytes_read += n as u64;
        self.line_number += 1;
        Ok(Some(line))
    }

    pub(crate) fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: Read> InputProgress for LineSource<R> {
    fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    fn lines_processed(&self) -> usize {
        self.line_number
    }
}

/// Open `path` for reading, gunzipping `.gz` files.
///
/// Returns the byte source and its size when it is known (plain files only).
pub fn open_source<P: AsRef<Path>>(path: P) -> Result<(Box<dyn Read>, Option<u64>)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let total_bytes = file.metadata()?.len();

    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => {
            debug!("Opening gzip-compressed input: {:?}", path);
            Ok((Box::new(GzDecoder::new(file)), None))
        }
        _ => {
            debug!("Opening plain input: {:?} ({} bytes)", path, total_bytes);
            Ok((Box::new(file), Some(total_bytes)))
        }
    }
}

/// Open a `<data> <hash>` pair file
pub fn open_pairs<P: AsRef<Path>>(path: P) -> Result<PairReader<Box<dyn Read>>> {
    PairReader::open(path)
}

/// Open a message file, or stdin when no path is given
pub fn open_messages(path: Option<&Path>) -> Result<MessageReader<Box<dyn Read>>> {
    match path {
        Some(path) => MessageReader::open(path),
        None => {
            debug!("Reading messages from stdin");
            let stdin: Box<dyn Read> = Box::new(std::io::stdin());
            Ok(MessageReader::with_total_bytes(stdin, None))
        }
    }
}
