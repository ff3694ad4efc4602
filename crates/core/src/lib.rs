//! Hash collision measurement for short messages
//!
//! This crate provides the hash algorithms under test, the pair record
//! type, the single-pass collision counter, message generators and the
//! text/JSON rendering of collision reports.

pub mod collision;
pub mod compare;
pub mod error;
pub mod generate;
pub mod hash;
pub mod record;
pub mod report;

pub use collision::{CollisionCounter, CollisionGroup, CollisionReport, CollisionStats, Outcome};
pub use error::{Error, Result};
pub use hash::HashAlgorithm;
pub use record::Record;
