//! Input readers for hashprobe
//!
//! This crate provides streaming readers for pair files (`<data> <hash>`)
//! and message files (one message per line), with transparent gzip support.

pub mod error;
pub mod messages;
pub mod pairs;
pub mod reader;

pub use error::{Error, Result};
pub use messages::MessageReader;
pub use pairs::PairReader;
pub use reader::{open_messages, open_pairs, open_source, InputProgress};
pub use hashprobe_core::Record;
