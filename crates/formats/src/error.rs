//! Error types for input readers

use std::path::PathBuf;
use thiserror::Error;

/// Reader errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input path is missing or cannot be opened for reading
    #[error("Cannot open input file {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for reader operations
pub type Result<T> = std::result::Result<T, Error>;
