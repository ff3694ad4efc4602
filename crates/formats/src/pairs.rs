//! Streaming reader for `<data> <hash> [ignored...]` pair files
//!
//! Blank lines are skipped silently. Lines holding a single token cannot
//! form a record: they are logged, counted and skipped, and the pass goes on.

use crate::reader::{open_source, InputProgress, LineSource};
use crate::{Error, Record, Result};
use hashprobe_core::record::is_separator;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Streaming pair-file reader that processes input line by line
pub struct PairReader<R: Read> {
    source: LineSource<R>,
    malformed: usize,
}

impl<R: Read> PairReader<R> {
    /// Create a new pair reader from any Read source
    pub fn new(reader: R) -> Self {
        Self::with_total_bytes(reader, None)
    }

    /// Create a pair reader whose input size is known up front
    pub fn with_total_bytes(reader: R, total_bytes: Option<u64>) -> Self {
        Self {
            source: LineSource::new(reader, total_bytes),
            malformed: 0,
        }
    }

    /// Number of non-blank lines skipped for having fewer than two tokens
    pub fn malformed_lines(&self) -> usize {
        self.malformed
    }
}

impl PairReader<Box<dyn Read>> {
    /// Open a pair file, gunzipping `.gz` files
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (source, total_bytes) = open_source(path)?;
        Ok(Self::with_total_bytes(source, total_bytes))
    }
}

impl<R: Read> InputProgress for PairReader<R> {
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

impl<R: Read> Iterator for PairReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.source.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => return Some(Err(Error::Io(e))),
            };

            if line.iter().all(|&b| is_separator(b)) {
                continue;
            }

            let line_number = self.source.line_number();
            match Record::parse(&line, line_number) {
                Some(record) => return Some(Ok(record)),
                None => {
                    self.malformed += 1;
                    warn!(
                        "Skipping line {}: expected `<data> <hash>`, got {:?}",
                        line_number,
                        String::from_utf8_lossy(&line).trim()
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn read_all(data: &str) -> (Vec<Record>, usize) {
        let mut reader = PairReader::new(data.as_bytes());
        let records = reader.by_ref().collect::<Result<Vec<_>>>().unwrap();
        (records, reader.malformed_lines())
    }

    #[test]
    fn test_pair_reader_basic() {
        let (records, malformed) = read_all("a h1\nb h1\nc h2\n");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], Record::new("a", "h1", 1));
        assert_eq!(records[2], Record::new("c", "h2", 3));
        assert_eq!(malformed, 0);
    }

    #[test]
    fn test_pair_reader_ignores_trailing_tokens() {
        let (records, _) = read_all("word   1A2B  extra tokens\n");
        assert_eq!(records, vec![Record::new("word", "1A2B", 1)]);
    }

    #[test]
    fn test_pair_reader_with_empty_lines() {
        let (records, malformed) = read_all("a h1\n\n   \nb h2\n\n");

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].source_line, 4);
        assert_eq!(malformed, 0);
    }

    #[test]
    fn test_pair_reader_skips_single_token_lines() {
        let (records, malformed) = read_all("a h1\nlonely\nb h1\n");

        // Should skip the short line and continue
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data, b"a");
        assert_eq!(records[1].data, b"b");
        assert_eq!(malformed, 1);
    }

    #[test]
    fn test_pair_reader_crlf() {
        let (records, _) = read_all("a h1\r\nb h2\r\n");
        assert_eq!(records[0].hash, b"h1");
        assert_eq!(records[1].hash, b"h2");
    }

    #[test]
    fn test_pair_reader_empty_input() {
        let (records, malformed) = read_all("");
        assert!(records.is_empty());
        assert_eq!(malformed, 0);
    }

    #[test]
    fn test_pair_reader_progress_tracking() {
        let mut reader = PairReader::new("a h1\nb h2".as_bytes());

        assert_eq!(reader.lines_processed(), 0);
        assert_eq!(reader.bytes_processed(), 0);

        let _ = reader.next();
        assert_eq!(reader.lines_processed(), 1);
        assert_eq!(reader.bytes_processed(), 5);

        let _ = reader.next();
        assert_eq!(reader.lines_processed(), 2);
        assert_eq!(reader.bytes_processed(), 9);
    }

    #[test]
    fn test_pair_reader_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "hello 1A").unwrap();
        writeln!(temp_file, "world 1A").unwrap();
        temp_file.flush().unwrap();

        let reader = PairReader::open(temp_file.path()).unwrap();
        let records: Vec<_> = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_pair_reader_open_missing_file() {
        match PairReader::open("/definitely/not/here.txt") {
            Err(Error::FileNotFound { path, .. }) => {
                assert_eq!(path, Path::new("/definitely/not/here.txt"));
            }
            _ => panic!("expected FileNotFound"),
        }
    }

    #[test]
    fn test_pair_reader_keeps_invalid_utf8_data_distinct() {
        let mut reader = PairReader::new(&b"a\xFF X\na\xFE X\n"[..]);
        let records = reader.by_ref().collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data, b"a\xFF");
        assert_eq!(records[1].data, b"a\xFE");
        assert_eq!(records[0].hash, records[1].hash);
        assert_eq!(reader.malformed_lines(), 0);
    }

    #[test]
    fn test_pair_reader_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("txt.gz");

        {
            let file = File::create(&temp_path).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            writeln!(encoder, "compressed 1F").unwrap();
            writeln!(encoder, "data 2E").unwrap();
            encoder.finish().unwrap();
        }

        let reader = crate::open_pairs(&temp_path).unwrap();
        assert_eq!(reader.total_bytes(), None);
        let records: Vec<_> = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data, b"compressed");
        assert_eq!(records[1].hash, b"2E");

        std::fs::remove_file(temp_path).unwrap();
    }
}
